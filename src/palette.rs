//! The strip of draggable layer types next to the drawing surface.

use crate::config::EditorConfig;
use crate::layer::{Activation, Layer};
use crate::surface::{PathSurface, Surface};

/// One draggable layer type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Type name carried by the drag payload.
    pub type_name: String,
    pub activation: Option<Activation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    thumbnail_size: (f32, f32),
}

impl Palette {
    pub fn from_config(config: &EditorConfig) -> Self {
        let entries = config
            .palette
            .iter()
            .map(|type_name| PaletteEntry {
                type_name: type_name.clone(),
                activation: type_name.parse().ok(),
            })
            .collect();
        Self { entries, thumbnail_size: config.thumbnail_size }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Draw every entry's thumbnail onto its own surface.
    pub fn render_thumbnails(&self, config: &EditorConfig) -> Vec<PathSurface> {
        let (w, h) = self.thumbnail_size;
        self.entries
            .iter()
            .map(|entry| {
                let mut surface = PathSurface::new(w, h);
                render_thumbnail(&entry.type_name, &mut surface, config);
                surface
            })
            .collect()
    }
}

/// Draw a hidden layer that fills the whole surface, labelled `type_name`.
pub fn render_thumbnail<S: Surface + ?Sized>(type_name: &str, surface: &mut S, config: &EditorConfig) {
    surface.clear();
    Layer::thumbnail(type_name).draw_shape(surface, config);
}
