//! The scene: an ordered chain of layers plus interaction state.
//!
//! Index 0 is always the Input layer and the last index is always the
//! Output layer; everything between is a Standard layer, in connection
//! order. Hidden layers only enter through [`Scene::append_layer`], which
//! always inserts right before Output.
//!
//! The scene also tracks which layer is hovered, whether it is grabbed, and
//! which layer the external edit panel is bound to. At most one layer is
//! hovered and at most one is being edited at any time.

use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::geometry::Point;
use crate::layer::{Activation, Layer, LayerKind};
use crate::render::render_scene;
use crate::surface::Surface;
use log::{debug, info};

/// Name and node count of a layer, as shown in the edit panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSnapshot {
    pub name: String,
    pub node_count: u32,
    pub activation: Option<Activation>,
}

impl From<&Layer> for LayerSnapshot {
    fn from(layer: &Layer) -> Self {
        Self {
            name: layer.name().to_string(),
            node_count: layer.node_count(),
            activation: layer.activation(),
        }
    }
}

/// The host page's form for editing a layer's name and node count.
///
/// The controller notifies the panel only after it has released the scene,
/// so implementations may read back through the controller.
pub trait EditPanel {
    /// Show the panel populated with `layer`'s current values.
    fn show(&self, layer: &LayerSnapshot);

    /// Hide the panel.
    fn hide(&self);

    /// Show (`Some`) or clear (`None`) the node-count validation message.
    fn set_node_count_error(&self, _error: Option<&EditorError>) {}
}

/// Edit panel that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEditPanel;

impl EditPanel for NoEditPanel {
    fn show(&self, _layer: &LayerSnapshot) {}
    fn hide(&self) {}
}

/// Read-only outside the crate: every change goes through
/// [`LayerEditorController`](crate::LayerEditorController).
///
/// ```compile_fail
/// let mut scene = slint_layer_editor::Scene::default();
/// scene.append_layer("Sigmoid", 10);
/// ```
#[derive(Debug)]
pub struct Scene {
    layers: Vec<Layer>,
    hover_index: Option<usize>,
    grabbed: bool,
    grab_offset: Point,
    editing_index: Option<usize>,
    config: EditorConfig,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Scene {
    /// A scene holding only `[Input, Output]`.
    pub fn new(config: EditorConfig) -> Self {
        let layers = vec![
            Layer::input(config.io_node_count),
            Layer::output(config.io_node_count),
        ];
        Self {
            layers,
            hover_index: None,
            grabbed: false,
            grab_offset: Point::default(),
            editing_index: None,
            config,
        }
    }

    // === Accessors ===

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false: a scene holds at least Input and Output.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn hover_index(&self) -> Option<usize> {
        self.hover_index
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn grab_offset(&self) -> Point {
        self.grab_offset
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.editing_index
    }

    pub fn editing_layer(&self) -> Option<&Layer> {
        self.editing_index.and_then(|i| self.layers.get(i))
    }

    /// Index of the first layer, in list order, whose box contains `p`.
    pub fn hit_test(&self, p: Point) -> Option<usize> {
        self.layers.iter().position(|layer| layer.bbox().contains(p))
    }

    // === Insertion ===

    /// Resolve `requested` against existing names by bumping a trailing
    /// number (or appending `" 1"`) until no layer has the name.
    pub fn unique_name(&self, requested: &str) -> String {
        let mut name = requested.to_string();
        while self.layers.iter().any(|layer| layer.name() == name) {
            name = bump_name_suffix(&name);
        }
        name
    }

    /// Insert a new Standard layer right before Output and open it for
    /// editing. Returns the index of the new layer.
    pub(crate) fn append_layer(&mut self, name: &str, node_count: u32) -> usize {
        let resolved = self.unique_name(name);
        let index = self.layers.len() - 1;
        info!("Inserting layer {:?} ({} nodes) at index {}", resolved, node_count, index);

        self.layers.insert(index, Layer::standard(resolved, node_count));

        // Indices at or past the insertion point shifted right by one.
        if let Some(h) = self.hover_index.as_mut() {
            if *h >= index {
                *h += 1;
            }
        }
        if let Some(e) = self.editing_index.as_mut() {
            if *e >= index {
                *e += 1;
            }
        }

        self.set_editing(index);
        index
    }

    pub(crate) fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    // === Hover ===

    /// Mark `index` as hovered. Call [`clear_hover`](Self::clear_hover)
    /// first; hover is not cleared here.
    pub(crate) fn set_hover(&mut self, index: usize) {
        if let Some(layer) = self.layers.get_mut(index) {
            layer.set_hover();
            self.hover_index = Some(index);
        }
    }

    pub(crate) fn clear_hover(&mut self) {
        if let Some(layer) = self.hover_index.and_then(|i| self.layers.get_mut(i)) {
            layer.clear_hover();
        }
        self.hover_index = None;
    }

    // === Grab ===

    /// Start dragging the hovered layer from `p`. No-op without a hover.
    ///
    /// Grabbing always opens the grabbed layer in the edit panel.
    pub(crate) fn begin_grab(&mut self, p: Point) {
        let Some(index) = self.hover_index else {
            return;
        };
        let position = self.layers[index].bbox().position();
        self.grabbed = true;
        self.grab_offset = p - position;
        debug!("Grabbed layer {} at offset {:?}", index, self.grab_offset);
        self.set_editing(index);
    }

    /// Move the hovered layer so the grab point follows `p`.
    pub(crate) fn drag_to(&mut self, p: Point) {
        let Some(index) = self.hover_index else {
            return;
        };
        let target = p - self.grab_offset;
        self.layers[index].bbox_mut().set_position(target);
    }

    pub(crate) fn end_grab(&mut self) {
        self.grabbed = false;
    }

    // === Editing ===

    /// Bind the edit panel to `index`.
    pub(crate) fn set_editing(&mut self, index: usize) {
        if index >= self.layers.len() {
            return;
        }
        self.clear_editing();
        self.editing_index = Some(index);
        self.layers[index].set_editing(true);
    }

    pub(crate) fn clear_editing(&mut self) {
        if let Some(layer) = self.editing_index.and_then(|i| self.layers.get_mut(i)) {
            layer.set_editing(false);
        }
        self.editing_index = None;
    }

    /// Rename the layer being edited.
    ///
    /// Rejected when another layer already uses `name`; renaming a layer to
    /// its own name is accepted.
    pub(crate) fn rename_editing(&mut self, name: &str) -> Result<()> {
        let index = self.editing_index.ok_or(EditorError::NoEditingLayer)?;
        let taken = self
            .layers
            .iter()
            .enumerate()
            .any(|(i, layer)| i != index && layer.name() == name);
        if taken {
            return Err(EditorError::DuplicateName { name: name.to_string() });
        }
        info!("Renaming layer {} to {:?}", index, name);
        self.layers[index].set_name(name.to_string());
        Ok(())
    }

    /// Apply node-count text typed into the edit panel.
    ///
    /// Invalid input leaves the layer's count unchanged.
    pub(crate) fn set_editing_node_count(&mut self, text: &str) -> Result<u32> {
        let index = self.editing_index.ok_or(EditorError::NoEditingLayer)?;
        match parse_node_count(text) {
            Ok(count) => {
                self.layers[index].set_node_count(count);
                Ok(count)
            }
            Err(err) => {
                debug!("Rejected node count {:?}: {}", text, err);
                Err(err)
            }
        }
    }

    // === Rendering ===

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        render_scene(self, surface);
    }

    /// Checks the structural invariants. Used by tests.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let n = self.layers.len();
        if n < 2 {
            return Err(format!("scene has {} layers", n));
        }
        if self.layers[0].kind() != LayerKind::Input {
            return Err("first layer is not Input".into());
        }
        if self.layers[n - 1].kind() != LayerKind::Output {
            return Err("last layer is not Output".into());
        }
        if let Some(i) = self.layers[1..n - 1]
            .iter()
            .position(|l| l.kind() != LayerKind::Standard)
        {
            return Err(format!("layer {} is not Standard", i + 1));
        }

        let hovered: Vec<usize> = (0..n).filter(|&i| self.layers[i].is_hovered()).collect();
        if hovered.len() > 1 || hovered.first().copied() != self.hover_index {
            return Err(format!("hover flags {:?} vs index {:?}", hovered, self.hover_index));
        }
        let editing: Vec<usize> = (0..n).filter(|&i| self.layers[i].is_editing()).collect();
        if editing.len() > 1 || editing.first().copied() != self.editing_index {
            return Err(format!("editing flags {:?} vs index {:?}", editing, self.editing_index));
        }
        if self.grabbed && self.hover_index.is_none() {
            return Err("grabbed without a hovered layer".into());
        }
        for (i, a) in self.layers.iter().enumerate() {
            if self.layers[i + 1..].iter().any(|b| b.name() == a.name()) {
                return Err(format!("duplicate layer name {:?}", a.name()));
            }
        }
        Ok(())
    }
}

/// `"Sigmoid"` → `"Sigmoid 1"`, `"Sigmoid 1"` → `"Sigmoid 2"`.
///
/// A trailing number that cannot be incremented is kept and `" 1"` appended.
fn bump_name_suffix(name: &str) -> String {
    let next = name
        .rsplit_once(' ')
        .and_then(|(head, last)| Some((head, last.parse::<u64>().ok()?.checked_add(1)?)));
    match next {
        Some((head, n)) => format!("{} {}", head, n),
        None => format!("{} 1", name),
    }
}

/// Parse node-count text from the edit panel: a positive integer.
pub fn parse_node_count(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| EditorError::InvalidNodeCount { input: text.to_string() })?;
    if value <= 0 {
        return Err(EditorError::NonPositiveNodeCount { value });
    }
    u32::try_from(value).map_err(|_| EditorError::InvalidNodeCount { input: text.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(scene: &Scene) -> Vec<&str> {
        scene.layers().iter().map(|l| l.name()).collect()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    #[test]
    fn test_new_scene_has_input_and_output() {
        let scene = Scene::default();
        assert_eq!(names(&scene), vec!["Input", "Output"]);
        assert_eq!(scene.layers()[0].node_count(), 100);
        assert_eq!(scene.hover_index(), None);
        assert_eq!(scene.editing_index(), None);
        assert!(!scene.is_grabbed());
        scene.check_invariants().unwrap();
    }

    // ========================================================================
    // append_layer() - Ordering & Naming
    // ========================================================================

    #[test]
    fn test_append_inserts_before_output() {
        let mut scene = Scene::default();
        assert_eq!(scene.append_layer("Sigmoid", 10), 1);
        assert_eq!(scene.append_layer("Tanh", 10), 2);
        assert_eq!(names(&scene), vec!["Input", "Sigmoid", "Tanh", "Output"]);
        scene.check_invariants().unwrap();
    }

    #[test]
    fn test_append_resolves_duplicate_names() {
        let mut scene = Scene::default();
        scene.append_layer("Sigmoid", 10);
        scene.append_layer("Sigmoid", 10);
        scene.append_layer("Sigmoid", 10);
        assert_eq!(names(&scene), vec!["Input", "Sigmoid", "Sigmoid 1", "Sigmoid 2", "Output"]);
    }

    #[test]
    fn test_append_numbered_names_increment() {
        let mut scene = Scene::default();
        scene.append_layer("ReLu 1", 10);
        scene.append_layer("ReLu 1", 10);
        scene.append_layer("ReLu 1", 10);
        assert_eq!(names(&scene), vec!["Input", "ReLu 1", "ReLu 2", "ReLu 3", "Output"]);
    }

    #[test]
    fn test_append_collision_with_io_names() {
        let mut scene = Scene::default();
        scene.append_layer("Input", 10);
        scene.append_layer("Output", 10);
        assert_eq!(names(&scene), vec!["Input", "Input 1", "Output 1", "Output"]);
        scene.check_invariants().unwrap();
    }

    #[test]
    fn test_append_empty_name() {
        let mut scene = Scene::default();
        scene.append_layer("", 10);
        scene.append_layer("", 10);
        assert_eq!(names(&scene), vec!["Input", "", " 1", "Output"]);
    }

    #[test]
    fn test_unique_name_skips_past_out_of_order_suffixes() {
        let mut scene = Scene::default();
        scene.append_layer("Tanh 2", 10);
        scene.append_layer("Tanh 1", 10);
        scene.append_layer("Tanh", 10);
        assert_eq!(scene.unique_name("Tanh"), "Tanh 3");
    }

    #[test]
    fn test_append_opens_editing_on_new_layer() {
        let mut scene = Scene::default();
        scene.append_layer("Sigmoid", 12);
        scene.append_layer("Tanh", 7);

        assert_eq!(scene.editing_index(), Some(2));
        assert!(scene.layers()[2].is_editing());
        assert!(!scene.layers()[1].is_editing());

        let snapshot = scene.editing_layer().map(LayerSnapshot::from).unwrap();
        assert_eq!(snapshot.name, "Tanh");
        assert_eq!(snapshot.node_count, 7);
        assert_eq!(snapshot.activation, Some(Activation::Tanh));
        scene.check_invariants().unwrap();
    }

    #[test]
    fn test_append_keeps_hover_on_same_layer() {
        let mut scene = Scene::default();
        scene.set_hover(1); // Output
        scene.append_layer("Sigmoid", 10);
        assert_eq!(scene.hover_index(), Some(2));
        assert_eq!(scene.layers()[2].kind(), LayerKind::Output);
        scene.check_invariants().unwrap();
    }

    // ========================================================================
    // Hover
    // ========================================================================

    #[test]
    fn test_set_and_clear_hover() {
        let mut scene = Scene::default();
        scene.set_hover(0);
        assert_eq!(scene.hover_index(), Some(0));
        assert!(scene.layers()[0].is_hovered());

        scene.clear_hover();
        assert_eq!(scene.hover_index(), None);
        assert!(!scene.layers()[0].is_hovered());
    }

    #[test]
    fn test_set_hover_out_of_range_is_ignored() {
        let mut scene = Scene::default();
        scene.set_hover(5);
        assert_eq!(scene.hover_index(), None);
    }

    #[test]
    fn test_hit_test_first_match_wins() {
        let mut scene = Scene::default();
        scene.append_layer("A", 10);
        scene.append_layer("B", 10);
        // Both hidden layers sit on the same default box
        let p = scene.layers()[1].bbox().center();
        assert_eq!(scene.hit_test(p), Some(1));
        assert_eq!(scene.hit_test(Point::new(0.95, 0.95)), None);
    }

    // ========================================================================
    // Grab / Drag
    // ========================================================================

    #[test]
    fn test_begin_grab_without_hover_is_noop() {
        let mut scene = Scene::default();
        scene.begin_grab(Point::new(0.5, 0.5));
        assert!(!scene.is_grabbed());
        assert_eq!(scene.editing_index(), None);
    }

    #[test]
    fn test_drag_preserves_grab_offset() {
        let mut scene = Scene::default();
        scene.append_layer("Sigmoid", 10);
        scene.set_hover(1);
        let box0 = *scene.layers()[1].bbox();

        let p0 = Point::new(0.25, 0.52);
        let p1 = Point::new(0.6, 0.3);
        scene.begin_grab(p0);
        scene.drag_to(p1);

        let moved = scene.layers()[1].bbox();
        assert!((moved.x - (box0.x + (p1.x - p0.x))).abs() < 1e-6);
        assert!((moved.y - (box0.y + (p1.y - p0.y))).abs() < 1e-6);
        assert_eq!(moved.w, box0.w);
        assert_eq!(moved.h, box0.h);
    }

    #[test]
    fn test_begin_grab_opens_editing() {
        let mut scene = Scene::default();
        scene.set_hover(0);
        scene.begin_grab(Point::new(0.5, 0.15));

        assert!(scene.is_grabbed());
        assert_eq!(scene.editing_index(), Some(0));
        assert_eq!(scene.editing_layer().map(|l| l.name()), Some("Input"));
    }

    #[test]
    fn test_end_grab_keeps_hover_and_editing() {
        let mut scene = Scene::default();
        scene.set_hover(0);
        scene.begin_grab(Point::new(0.5, 0.15));
        scene.end_grab();

        assert!(!scene.is_grabbed());
        assert_eq!(scene.hover_index(), Some(0));
        assert_eq!(scene.editing_index(), Some(0));
    }

    #[test]
    fn test_drag_without_hover_is_noop() {
        let mut scene = Scene::default();
        let before = *scene.layers()[0].bbox();
        scene.drag_to(Point::new(0.9, 0.9));
        assert_eq!(*scene.layers()[0].bbox(), before);
    }

    // ========================================================================
    // Editing
    // ========================================================================

    #[test]
    fn test_set_editing_moves_flag() {
        let mut scene = Scene::default();
        scene.set_editing(0);
        scene.set_editing(1);
        assert!(!scene.layers()[0].is_editing());
        assert!(scene.layers()[1].is_editing());
        scene.clear_editing();
        assert_eq!(scene.editing_index(), None);
        assert!(!scene.layers()[1].is_editing());
    }

    #[test]
    fn test_rename_editing() {
        let mut scene = Scene::default();
        scene.append_layer("Sigmoid", 10);
        scene.rename_editing("Tanh").unwrap();
        assert_eq!(scene.layers()[1].name(), "Tanh");
        assert_eq!(scene.layers()[1].activation(), Some(Activation::Tanh));
    }

    #[test]
    fn test_rename_to_existing_name_is_rejected() {
        let mut scene = Scene::default();
        scene.append_layer("Sigmoid", 10);
        let err = scene.rename_editing("Output").unwrap_err();
        assert!(matches!(err, EditorError::DuplicateName { .. }));
        assert_eq!(scene.layers()[1].name(), "Sigmoid");

        // Same name as itself is fine
        scene.rename_editing("Sigmoid").unwrap();
    }

    #[test]
    fn test_rename_without_editing_layer() {
        let mut scene = Scene::default();
        assert!(matches!(scene.rename_editing("x"), Err(EditorError::NoEditingLayer)));
    }

    #[test]
    fn test_node_count_validation_keeps_last_valid_value() {
        let mut scene = Scene::default();
        scene.append_layer("ReLu", 10);

        assert_eq!(scene.set_editing_node_count("32").unwrap(), 32);
        assert!(scene.set_editing_node_count("abc").is_err());
        assert!(scene.set_editing_node_count("0").is_err());
        assert!(scene.set_editing_node_count("-4").is_err());
        assert_eq!(scene.layers()[1].node_count(), 32);
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    #[test]
    fn test_bump_name_suffix() {
        assert_eq!(bump_name_suffix("Sigmoid"), "Sigmoid 1");
        assert_eq!(bump_name_suffix("Sigmoid 1"), "Sigmoid 2");
        assert_eq!(bump_name_suffix("Dense layer 9"), "Dense layer 10");
        assert_eq!(bump_name_suffix("Sigmoid x"), "Sigmoid x 1");
        assert_eq!(bump_name_suffix("7"), "7 1");
        assert_eq!(bump_name_suffix("N 18446744073709551615"), "N 18446744073709551615 1");
    }

    #[test]
    fn test_append_with_maximal_suffix() {
        let mut scene = Scene::default();
        scene.append_layer("N 18446744073709551615", 10);
        scene.append_layer("N 18446744073709551615", 10);
        assert_eq!(
            names(&scene),
            vec!["Input", "N 18446744073709551615", "N 18446744073709551615 1", "Output"]
        );
        scene.check_invariants().unwrap();
    }

    #[test]
    fn test_parse_node_count() {
        assert_eq!(parse_node_count(" 12 ").unwrap(), 12);
        assert!(matches!(parse_node_count("1.5"), Err(EditorError::InvalidNodeCount { .. })));
        assert!(matches!(parse_node_count(""), Err(EditorError::InvalidNodeCount { .. })));
        assert!(matches!(
            parse_node_count("-3"),
            Err(EditorError::NonPositiveNodeCount { value: -3 })
        ));
        assert!(parse_node_count("99999999999").is_err());
    }
}
