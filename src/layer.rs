//! Layers: the nodes of the visual network graph.
//!
//! A [`Layer`] is a positioned, styled, nameable node. The three variants in
//! [`LayerKind`] share all behavior and differ only in default geometry, fill
//! colour and drawn outline.

use crate::config::EditorConfig;
use crate::geometry::BBox;
use crate::path::{CubicBezier, Shape};
use crate::surface::{Paint, Surface};
use serde::{Deserialize, Serialize};
use slint::Color;
use std::fmt;
use std::str::FromStr;

const BASE_LINE_WIDTH: f32 = 1.0;
const HOVER_LINE_WIDTH: f32 = 2.0;

/// Which variant of layer this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Hidden layer: rounded rectangle, created only by drop insertion.
    Standard,
    /// Network input: circle near the top center.
    Input,
    /// Network output: circle near the bottom center.
    Output,
}

impl LayerKind {
    pub fn default_box(self) -> BBox {
        match self {
            LayerKind::Standard => BBox::new(0.2, 0.5, 0.4, 0.05),
            LayerKind::Input => BBox::new(0.45, 0.1, 0.1, 0.1),
            LayerKind::Output => BBox::new(0.45, 0.8, 0.1, 0.1),
        }
    }

    pub fn default_fill(self) -> Color {
        match self {
            LayerKind::Standard => Color::from_rgb_u8(0x99, 0x99, 0xff),
            LayerKind::Input => Color::from_rgb_u8(0x99, 0xff, 0x99),
            LayerKind::Output => Color::from_rgb_u8(0xff, 0x99, 0x99),
        }
    }

    /// Pixel-space outline for a box of this kind on a `width`×`height` surface.
    pub fn outline(self, bbox: &BBox, width: f32, height: f32, corner_radius: f32) -> Shape {
        match self {
            LayerKind::Standard => Shape::RoundedRect {
                x: bbox.x * width,
                y: bbox.y * height,
                width: bbox.w * width,
                height: bbox.h * height,
                radius: corner_radius,
            },
            LayerKind::Input | LayerKind::Output => {
                let center = bbox.center();
                Shape::Circle {
                    cx: center.x * width,
                    cy: center.y * height,
                    radius: width * bbox.w / 2.0,
                }
            }
        }
    }
}

/// Activation function recorded on a hidden layer for the training side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activation {
    Sigmoid,
    ReLu,
    Tanh,
}

impl Activation {
    pub fn as_str(self) -> &'static str {
        match self {
            Activation::Sigmoid => "Sigmoid",
            Activation::ReLu => "ReLu",
            Activation::Tanh => "Tanh",
        }
    }

    /// Activation named by the first word of a layer name, e.g. `"ReLu 2"`.
    pub fn from_layer_name(name: &str) -> Option<Activation> {
        name.split_whitespace().next()?.parse().ok()
    }
}

impl FromStr for Activation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(Activation::Sigmoid),
            "relu" => Ok(Activation::ReLu),
            "tanh" => Ok(Activation::Tanh),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStyle {
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f32,
}

impl LayerStyle {
    fn for_kind(kind: LayerKind) -> Self {
        Self {
            fill: kind.default_fill(),
            stroke: Color::from_rgb_u8(0x11, 0x11, 0x11),
            line_width: BASE_LINE_WIDTH,
        }
    }
}

/// One network layer in the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    kind: LayerKind,
    name: String,
    node_count: u32,
    activation: Option<Activation>,
    bbox: BBox,
    style: LayerStyle,
    hovered: bool,
    editing: bool,
}

impl Layer {
    fn with_kind(kind: LayerKind, name: String, node_count: u32) -> Self {
        let activation = match kind {
            LayerKind::Standard => Activation::from_layer_name(&name),
            LayerKind::Input | LayerKind::Output => None,
        };
        Self {
            kind,
            name,
            node_count,
            activation,
            bbox: kind.default_box(),
            style: LayerStyle::for_kind(kind),
            hovered: false,
            editing: false,
        }
    }

    pub(crate) fn standard(name: String, node_count: u32) -> Self {
        Self::with_kind(LayerKind::Standard, name, node_count)
    }

    pub(crate) fn input(node_count: u32) -> Self {
        Self::with_kind(LayerKind::Input, "Input".into(), node_count)
    }

    pub(crate) fn output(node_count: u32) -> Self {
        Self::with_kind(LayerKind::Output, "Output".into(), node_count)
    }

    /// Standard layer whose box fills the whole surface, used for palette
    /// thumbnails.
    pub(crate) fn thumbnail(name: &str) -> Self {
        let mut layer = Self::standard(name.to_string(), 0);
        layer.bbox = BBox::new(0.0, 0.0, 1.0, 1.0);
        layer
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    pub fn activation(&self) -> Option<Activation> {
        self.activation
    }

    pub fn bbox(&self) -> &BBox {
        &self.bbox
    }

    pub fn style(&self) -> &LayerStyle {
        &self.style
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub(crate) fn bbox_mut(&mut self) -> &mut BBox {
        &mut self.bbox
    }

    /// Rename, keeping the activation in step for hidden layers.
    pub(crate) fn set_name(&mut self, name: String) {
        if self.kind == LayerKind::Standard {
            self.activation = Activation::from_layer_name(&name);
        }
        self.name = name;
    }

    pub(crate) fn set_node_count(&mut self, node_count: u32) {
        self.node_count = node_count;
    }

    pub(crate) fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    pub(crate) fn set_hover(&mut self) {
        self.hovered = true;
        self.style.line_width = HOVER_LINE_WIDTH;
    }

    pub(crate) fn clear_hover(&mut self) {
        self.hovered = false;
        self.style.line_width = BASE_LINE_WIDTH;
    }

    // === Drawing ===

    /// Fill and stroke the variant outline, then draw the centered label.
    pub fn draw_shape<S: Surface + ?Sized>(&self, surface: &mut S, config: &EditorConfig) {
        let (w, h) = surface.size();
        let outline = self.kind.outline(&self.bbox, w, h, config.corner_radius);
        surface.draw_shape(
            &outline,
            &Paint::fill_and_stroke(self.style.fill, self.style.stroke, self.style.line_width),
        );

        let center = self.bbox.center();
        surface.draw_label(
            &self.name,
            center.x * w,
            center.y * h,
            &config.label_font,
            Color::from_rgb_u8(0, 0, 0),
        );
    }

    /// Stroke the selection rectangle around the box. Does nothing unless
    /// the layer is being edited.
    pub fn draw_edit_highlight<S: Surface + ?Sized>(&self, surface: &mut S, config: &EditorConfig) {
        if !self.editing {
            return;
        }
        let (w, h) = surface.size();
        let frame = Shape::rect_over(&self.bbox.expanded(config.edit_padding), w, h);
        surface.draw_shape(&frame, &Paint::stroke_only(self.style.stroke, BASE_LINE_WIDTH));
    }

    /// Curve from this layer's center to `next`'s center.
    pub fn connection_to(&self, next: &Layer) -> CubicBezier {
        CubicBezier::connecting(&self.bbox, &next.bbox)
    }

    pub fn draw_connection_to<S: Surface + ?Sized>(&self, next: &Layer, surface: &mut S) {
        let (w, h) = surface.size();
        let curve = self.connection_to(next).scaled(w, h);
        surface.draw_shape(
            &Shape::Curve(curve),
            &Paint::stroke_only(Color::from_rgb_u8(0, 0, 0), BASE_LINE_WIDTH),
        );
    }

    /// Edit highlight (if editing), then outline, then label.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, config: &EditorConfig) {
        self.draw_edit_highlight(surface, config);
        self.draw_shape(surface, config);
    }
}
