//! Pointer-driven controller for the layer editor.
//!
//! [`LayerEditorController`] owns the [`Scene`], the drawing surface and the
//! edit panel, and is the only path through which pointer and drop events
//! mutate the scene. Every handler runs to completion and redraws the surface
//! before returning.
//!
//! # Example
//!
//! ```ignore
//! use slint_layer_editor::{LayerEditorController, SurfaceBounds};
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = LayerEditorController::new(SurfaceBounds::sized(800.0, 800.0));
//!     let commands = std::rc::Rc::new(slint::VecModel::default());
//!     window.set_draw_commands(commands.clone().into());
//!
//!     window.on_pointer_moved(ctrl.pointer_moved_callback());
//!     window.on_pointer_pressed(ctrl.pointer_pressed_callback());
//!     window.on_pointer_released(ctrl.pointer_released_callback());
//!     window.on_pointer_left(ctrl.pointer_left_callback());
//!     window.on_layer_dropped(ctrl.drop_callback());
//!
//!     // Push the recorded paths to the UI after each event
//!     window.on_redraw({
//!         let ctrl = ctrl.clone();
//!         move || ctrl.surface().borrow().sync_to_model(&commands)
//!     });
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::config::EditorConfig;
use crate::coords::SurfaceBounds;
use crate::error::Result;
use crate::layer::Activation;
use crate::network::NetworkSpec;
use crate::scene::{EditPanel, LayerSnapshot, NoEditPanel, Scene};
use crate::surface::{PathSurface, Surface};
use log::{debug, warn};
use slint::SharedString;
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

/// Where the pointer interaction currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Pointer is over the layer at this index.
    Hovering(usize),
    /// The layer at this index is being dragged.
    Grabbing(usize),
}

/// Pointer affordance the host should show over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Default,
    Pointer,
}

/// Controller that drives a [`Scene`] from pointer and drop events.
///
/// Clone this controller to share it across callbacks.
pub struct LayerEditorController<S: Surface = PathSurface> {
    scene: Rc<RefCell<Scene>>,
    surface: Rc<RefCell<S>>,
    panel: Rc<dyn EditPanel>,
    bounds: Rc<Cell<SurfaceBounds>>,
    state: Rc<Cell<InteractionState>>,
    cursor: Rc<Cell<CursorShape>>,
}

impl<S: Surface> Clone for LayerEditorController<S> {
    fn clone(&self) -> Self {
        Self {
            scene: self.scene.clone(),
            surface: self.surface.clone(),
            panel: self.panel.clone(),
            bounds: self.bounds.clone(),
            state: self.state.clone(),
            cursor: self.cursor.clone(),
        }
    }
}

impl LayerEditorController<PathSurface> {
    /// Controller with default settings drawing into a [`PathSurface`] the
    /// size of `bounds`.
    pub fn new(bounds: SurfaceBounds) -> Self {
        Self::with_config(EditorConfig::default(), bounds)
    }

    pub fn with_config(config: EditorConfig, bounds: SurfaceBounds) -> Self {
        Self::with_surface(
            Scene::new(config),
            PathSurface::new(bounds.width, bounds.height),
            bounds,
        )
    }

    pub fn with_edit_panel(config: EditorConfig, panel: Box<dyn EditPanel>, bounds: SurfaceBounds) -> Self {
        Self::from_parts(
            Scene::new(config),
            PathSurface::new(bounds.width, bounds.height),
            Rc::from(panel),
            bounds,
        )
    }

    /// Resize the surface (and its on-screen bounds) and redraw.
    pub fn resize(&self, bounds: SurfaceBounds) {
        self.surface.borrow_mut().set_size(bounds.width, bounds.height);
        self.set_bounds(bounds);
    }
}

impl<S: Surface> LayerEditorController<S> {
    /// Wrap an existing scene and surface. Draws the initial frame.
    pub fn with_surface(scene: Scene, surface: S, bounds: SurfaceBounds) -> Self {
        Self::from_parts(scene, surface, Rc::new(NoEditPanel), bounds)
    }

    fn from_parts(scene: Scene, surface: S, panel: Rc<dyn EditPanel>, bounds: SurfaceBounds) -> Self {
        let ctrl = Self {
            scene: Rc::new(RefCell::new(scene)),
            surface: Rc::new(RefCell::new(surface)),
            panel,
            bounds: Rc::new(Cell::new(bounds)),
            state: Rc::new(Cell::new(InteractionState::Idle)),
            cursor: Rc::new(Cell::new(CursorShape::Default)),
        };
        ctrl.render();
        ctrl
    }

    /// Read access to the scene. Release it before calling any handler.
    pub fn scene(&self) -> Ref<'_, Scene> {
        self.scene.borrow()
    }

    pub fn surface(&self) -> Rc<RefCell<S>> {
        self.surface.clone()
    }

    pub fn state(&self) -> InteractionState {
        self.state.get()
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor.get()
    }

    pub fn bounds(&self) -> SurfaceBounds {
        self.bounds.get()
    }

    /// Update where the surface sits on screen; used to map pointer events.
    pub fn set_bounds(&self, bounds: SurfaceBounds) {
        self.bounds.set(bounds);
        self.render();
    }

    /// Redraw the scene onto the surface.
    pub fn render(&self) {
        self.scene.borrow().render(&mut *self.surface.borrow_mut());
    }

    /// Network definition for the current layer chain.
    pub fn network_spec(&self) -> NetworkSpec {
        NetworkSpec::from_scene(&self.scene.borrow())
    }

    // === Pointer handlers ===

    /// Pointer moved over the surface.
    ///
    /// While grabbing, the grabbed layer follows the pointer and hover stays
    /// frozen. Otherwise hover is re-evaluated: the first layer in list order
    /// whose box contains the pointer wins.
    pub fn handle_pointer_moved(&self, raw_x: f32, raw_y: f32) {
        let p = self.bounds.get().to_normalized(raw_x, raw_y);
        {
            let mut scene = self.scene.borrow_mut();
            if let InteractionState::Grabbing(_) = self.state.get() {
                scene.drag_to(p);
            } else {
                scene.clear_hover();
                match scene.hit_test(p) {
                    Some(index) => {
                        scene.set_hover(index);
                        if self.state.get() != InteractionState::Hovering(index) {
                            debug!("Hovering layer {}", index);
                        }
                        self.state.set(InteractionState::Hovering(index));
                        self.cursor.set(CursorShape::Pointer);
                    }
                    None => {
                        self.state.set(InteractionState::Idle);
                        self.cursor.set(CursorShape::Default);
                    }
                }
            }
        }
        self.render();
    }

    /// Pointer pressed. Grabs the hovered layer, or closes the edit panel
    /// when pressing on empty space.
    pub fn handle_pointer_pressed(&self, raw_x: f32, raw_y: f32) {
        let p = self.bounds.get().to_normalized(raw_x, raw_y);
        match self.state.get() {
            InteractionState::Hovering(index) | InteractionState::Grabbing(index) => {
                let grabbed = {
                    let mut scene = self.scene.borrow_mut();
                    scene.begin_grab(p);
                    scene.is_grabbed()
                };
                self.state.set(InteractionState::Grabbing(index));
                if grabbed {
                    self.show_editing_layer();
                }
            }
            InteractionState::Idle => {
                debug!("Pressed on empty surface, closing edit panel");
                self.scene.borrow_mut().clear_editing();
                self.panel.hide();
            }
        }
        self.render();
    }

    /// Pointer released: ends any grab, keeping the last hover.
    pub fn handle_pointer_released(&self) {
        {
            let mut scene = self.scene.borrow_mut();
            if scene.is_grabbed() {
                debug!("Released layer {:?}", scene.hover_index());
            }
            scene.end_grab();
        }
        self.sync_state();
        self.render();
    }

    /// Pointer left the surface: cancels any grab and clears hover.
    pub fn handle_pointer_left(&self) {
        {
            let mut scene = self.scene.borrow_mut();
            if scene.is_grabbed() {
                debug!("Pointer left surface, cancelling grab");
            }
            scene.end_grab();
            scene.clear_hover();
        }
        self.state.set(InteractionState::Idle);
        self.cursor.set(CursorShape::Default);
        self.render();
    }

    /// A layer type was dropped on the surface at a raw pointer position.
    ///
    /// Inserts `"<type_name> 1"` (renamed if taken) before Output, centered
    /// on the drop point, and opens it for editing. Unknown type names are
    /// inserted as-is without an activation. Returns the new layer's index.
    pub fn handle_drop(&self, type_name: &str, raw_x: f32, raw_y: f32) -> usize {
        let p = self.bounds.get().to_normalized(raw_x, raw_y);
        if type_name.parse::<Activation>().is_err() {
            warn!("Dropped layer type {:?} has no known activation", type_name);
        }
        let index = {
            let mut scene = self.scene.borrow_mut();
            let node_count = scene.config().default_node_count;
            let index = scene.append_layer(&format!("{} 1", type_name), node_count);
            if let Some(layer) = scene.layer_mut(index) {
                layer.bbox_mut().center_on(p);
            }
            index
        };
        self.sync_state();
        self.show_editing_layer();
        self.render();
        index
    }

    // === Edit panel handlers ===

    /// Name field of the edit panel changed.
    pub fn handle_name_changed(&self, name: &str) -> Result<()> {
        self.scene.borrow_mut().rename_editing(name)?;
        self.render();
        Ok(())
    }

    /// Node-count field of the edit panel changed. The panel is told whether
    /// to show its validation message.
    pub fn handle_node_count_changed(&self, text: &str) -> Result<u32> {
        let result = self.scene.borrow_mut().set_editing_node_count(text);
        match &result {
            Ok(_) => self.panel.set_node_count_error(None),
            Err(err) if err.is_node_count_error() => self.panel.set_node_count_error(Some(err)),
            Err(_) => {}
        }
        result
    }

    /// Push the layer being edited to the panel.
    fn show_editing_layer(&self) {
        let snapshot = self.scene.borrow().editing_layer().map(LayerSnapshot::from);
        if let Some(snapshot) = snapshot {
            self.panel.show(&snapshot);
        }
    }

    /// Rebuild the state from the scene's hover and grab flags, keeping
    /// indices correct after an insertion shifted them.
    fn sync_state(&self) {
        let scene = self.scene.borrow();
        let state = match (scene.is_grabbed(), scene.hover_index()) {
            (true, Some(index)) => InteractionState::Grabbing(index),
            (false, Some(index)) => InteractionState::Hovering(index),
            (_, None) => InteractionState::Idle,
        };
        self.state.set(state);
    }
}

impl<S: Surface + 'static> LayerEditorController<S> {
    // === Callback factories ===

    /// Returns a callback for `pointer-moved(x, y)`.
    pub fn pointer_moved_callback(&self) -> impl Fn(f32, f32) + 'static {
        let ctrl = self.clone();
        move |x, y| ctrl.handle_pointer_moved(x, y)
    }

    /// Returns a callback for `pointer-pressed(x, y)`.
    pub fn pointer_pressed_callback(&self) -> impl Fn(f32, f32) + 'static {
        let ctrl = self.clone();
        move |x, y| ctrl.handle_pointer_pressed(x, y)
    }

    /// Returns a callback for `pointer-released()`.
    pub fn pointer_released_callback(&self) -> impl Fn() + 'static {
        let ctrl = self.clone();
        move || ctrl.handle_pointer_released()
    }

    /// Returns a callback for `pointer-left()`.
    pub fn pointer_left_callback(&self) -> impl Fn() + 'static {
        let ctrl = self.clone();
        move || ctrl.handle_pointer_left()
    }

    /// Returns a callback for `layer-dropped(type-name, x, y)`.
    pub fn drop_callback(&self) -> impl Fn(SharedString, f32, f32) + 'static {
        let ctrl = self.clone();
        move |type_name, x, y| {
            ctrl.handle_drop(type_name.as_str(), x, y);
        }
    }
}
