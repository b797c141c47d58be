//! # Slint Layer Editor
//!
//! An interactive editor for assembling a neural network as a chain of
//! layers. Layer types are dragged from a palette onto a drawing surface,
//! wired in order from Input to Output, repositioned by dragging, and edited
//! (name, node count) through an external edit panel. The finished chain is
//! handed to a training engine as a [`NetworkSpec`].
//!
//! ## Core Pieces
//!
//! - [`Scene`] - Ordered layers plus hover / grab / edit state
//! - [`Layer`] - A positioned, styled node; [`LayerKind`] picks its outline
//! - [`LayerEditorController`] - Pointer and drop event state machine
//! - [`Surface`] - Drawing sink; [`PathSurface`] records SVG paths for Slint
//! - [`render_scene`] - Curves first, then nodes
//!
//! ## Coordinates
//!
//! All layer geometry lives in normalized surface space (`[0,1]×[0,1]`,
//! top-left origin) and is scaled to pixels only while drawing.
//! [`to_normalized`] maps raw pointer positions into that space.

pub mod config;
pub mod controller;
pub mod coords;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod network;
pub mod palette;
pub mod path;
pub mod render;
pub mod scene;
pub mod surface;

pub use config::EditorConfig;
pub use controller::{CursorShape, InteractionState, LayerEditorController};
pub use coords::{to_normalized, SurfaceBounds};
pub use error::{EditorError, Result};
pub use geometry::{BBox, Point};
pub use layer::{Activation, Layer, LayerKind, LayerStyle};
pub use network::{DenseLayerSpec, NetworkSpec};
pub use palette::{render_thumbnail, Palette, PaletteEntry};
pub use path::{CubicBezier, Shape};
pub use render::render_scene;
pub use scene::{parse_node_count, EditPanel, LayerSnapshot, NoEditPanel, Scene};
pub use surface::{DrawCommand, DrawKind, Font, Paint, PathSurface, Surface};
