//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use slint_layer_editor::{EditPanel, EditorError, LayerSnapshot};
use std::cell::RefCell;
use std::rc::Rc;

/// Records every edit panel notification for testing.
///
/// Clones share the same recordings, so one clone can be handed to the
/// scene while the test keeps another.
#[derive(Default, Clone)]
pub struct CallbackTracker {
    /// Snapshots pushed by `show`
    pub shown: Rc<RefCell<Vec<LayerSnapshot>>>,
    /// Count of `hide` calls
    pub hidden: Rc<RefCell<usize>>,
    /// Validation messages: `Some(text)` shown, `None` cleared
    pub node_count_errors: Rc<RefCell<Vec<Option<String>>>>,
}

impl CallbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all recorded callbacks.
    pub fn clear(&self) {
        self.shown.borrow_mut().clear();
        *self.hidden.borrow_mut() = 0;
        self.node_count_errors.borrow_mut().clear();
    }

    pub fn last_shown(&self) -> Option<LayerSnapshot> {
        self.shown.borrow().last().cloned()
    }
}

impl EditPanel for CallbackTracker {
    fn show(&self, layer: &LayerSnapshot) {
        self.shown.borrow_mut().push(layer.clone());
    }

    fn hide(&self) {
        *self.hidden.borrow_mut() += 1;
    }

    fn set_node_count_error(&self, error: Option<&EditorError>) {
        self.node_count_errors
            .borrow_mut()
            .push(error.map(|e| e.to_string()));
    }
}
