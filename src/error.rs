//! Error types for the layer editor.
//!
//! Pointer handling never fails; errors only come back from the edit panel
//! round-trip, configuration loading and the network hand-off.

use thiserror::Error;

/// Result type alias for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Please enter an integer greater than 0 (got {input:?})")]
    InvalidNodeCount { input: String },

    #[error("Please enter an integer greater than 0 (got {value})")]
    NonPositiveNodeCount { value: i64 },

    #[error("A layer named {name:?} already exists")]
    DuplicateName { name: String },

    #[error("No layer is being edited")]
    NoEditingLayer,

    #[error("Failed to serialize network spec: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Invalid editor configuration: {0}")]
    Config(#[source] serde_json::Error),
}

impl EditorError {
    /// Whether this error is a node-count validation failure the edit panel
    /// should display next to its input field.
    pub fn is_node_count_error(&self) -> bool {
        matches!(
            self,
            EditorError::InvalidNodeCount { .. } | EditorError::NonPositiveNodeCount { .. }
        )
    }
}
