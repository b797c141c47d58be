//! Test harness for the layer editor.
//!
//! Sets up a controller over an 800×800 surface placed at (100, 50) on the
//! page, with an edit panel tracker, and provides helpers for simulating
//! pointer interactions in page coordinates.

#![allow(dead_code)]

use super::CallbackTracker;
use slint_layer_editor::{
    BBox, EditorConfig, Layer, LayerEditorController, PathSurface, Point, Scene, SurfaceBounds,
};
use std::cell::Ref;

pub const SURFACE_LEFT: f32 = 100.0;
pub const SURFACE_TOP: f32 = 50.0;
pub const SURFACE_SIZE: f32 = 800.0;

/// Install a test logger once per process.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub struct EditorHarness {
    pub ctrl: LayerEditorController<PathSurface>,
    pub tracker: CallbackTracker,
}

impl EditorHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        init_logging();
        let tracker = CallbackTracker::new();
        let ctrl = LayerEditorController::with_edit_panel(
            config,
            Box::new(tracker.clone()),
            SurfaceBounds::new(SURFACE_LEFT, SURFACE_TOP, SURFACE_SIZE, SURFACE_SIZE),
        );
        Self { ctrl, tracker }
    }

    /// Page position of a normalized point.
    pub fn page_pos(p: Point) -> (f32, f32) {
        (SURFACE_LEFT + p.x * SURFACE_SIZE, SURFACE_TOP + p.y * SURFACE_SIZE)
    }

    /// Page position of a layer's box center.
    pub fn layer_center(&self, index: usize) -> (f32, f32) {
        Self::page_pos(self.layer(index).bbox().center())
    }

    pub fn scene(&self) -> Ref<'_, Scene> {
        self.ctrl.scene()
    }

    pub fn layer(&self, index: usize) -> Layer {
        self.scene().layers()[index].clone()
    }

    pub fn bbox(&self, index: usize) -> BBox {
        *self.scene().layers()[index].bbox()
    }

    pub fn names(&self) -> Vec<String> {
        self.scene().layers().iter().map(|l| l.name().to_string()).collect()
    }

    pub fn assert_invariants(&self) {
        if let Err(msg) = self.scene().check_invariants() {
            panic!("scene invariant violated: {}", msg);
        }
    }

    // === Pointer event helpers ===

    pub fn mouse_move(&self, x: f32, y: f32) {
        self.ctrl.handle_pointer_moved(x, y);
    }

    pub fn mouse_down(&self, x: f32, y: f32) {
        self.ctrl.handle_pointer_pressed(x, y);
    }

    pub fn mouse_up(&self) {
        self.ctrl.handle_pointer_released();
    }

    pub fn mouse_leave(&self) {
        self.ctrl.handle_pointer_left();
    }

    /// Hover then press on a position, as a real pointer would.
    pub fn press_at(&self, x: f32, y: f32) {
        self.mouse_move(x, y);
        self.mouse_down(x, y);
    }

    /// Simulate a complete drag from start to end.
    pub fn drag(&self, start_x: f32, start_y: f32, end_x: f32, end_y: f32) {
        self.press_at(start_x, start_y);
        self.mouse_move(end_x, end_y);
        self.mouse_up();
    }

    /// Drop a palette entry at a page position. Returns the new index.
    pub fn drop_layer(&self, type_name: &str, x: f32, y: f32) -> usize {
        self.ctrl.handle_drop(type_name, x, y)
    }
}

impl Default for EditorHarness {
    fn default() -> Self {
        Self::new()
    }
}
