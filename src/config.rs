use crate::error::{EditorError, Result};
use crate::surface::Font;
use serde::{Deserialize, Serialize};

/// Tunables for the editor.
///
/// Every field has a default, so a JSON config only needs the keys it wants
/// to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Node count given to layers inserted by a drop.
    pub default_node_count: u32,
    /// Node count of the Input and Output layers.
    pub io_node_count: u32,
    /// Normalized padding between a layer and its edit highlight.
    pub edit_padding: f32,
    /// Corner radius of Standard layers, in pixels.
    pub corner_radius: f32,
    pub label_font: Font,
    /// Layer types offered for dragging onto the surface.
    pub palette: Vec<String>,
    /// Pixel size of a palette thumbnail as `(width, height)`.
    pub thumbnail_size: (f32, f32),
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_node_count: 10,
            io_node_count: 100,
            edit_padding: 0.02,
            corner_radius: 10.0,
            label_font: Font::default(),
            palette: vec!["Sigmoid".into(), "ReLu".into(), "Tanh".into()],
            thumbnail_size: (150.0, 30.0),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(EditorError::Config)
    }
}
