//! Drawing surfaces.
//!
//! The render pass only ever talks to the [`Surface`] trait, so the scene can
//! be drawn into anything that can fill and stroke a [`Shape`] and place a
//! label. [`PathSurface`] is the Slint-facing implementation: it records each
//! draw call as a [`DrawCommand`] carrying SVG path commands, ready to be
//! pushed into a `VecModel` that backs a `Path` repeater in the UI.

use crate::path::Shape;
use serde::{Deserialize, Serialize};
use slint::{Color, Model, ModelRc, SharedString, VecModel};
use std::rc::Rc;

/// Font used for layer labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    pub family: String,
    pub size: f32,
}

impl Default for Font {
    fn default() -> Self {
        Self { family: "serif".into(), size: 16.0 }
    }
}

/// Fill, stroke and line width for one draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f32,
}

impl Paint {
    pub fn stroke_only(stroke: Color, line_width: f32) -> Self {
        Self { fill: None, stroke: Some(stroke), line_width }
    }

    pub fn fill_and_stroke(fill: Color, stroke: Color, line_width: f32) -> Self {
        Self { fill: Some(fill), stroke: Some(stroke), line_width }
    }
}

/// A write-only drawing sink with pixel dimensions.
pub trait Surface {
    /// Pixel size of the drawable area as `(width, height)`.
    fn size(&self) -> (f32, f32);

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill and/or stroke a shape.
    fn draw_shape(&mut self, shape: &Shape, paint: &Paint);

    /// Draw `text` centered (horizontally and vertically) on `(x, y)`.
    fn draw_label(&mut self, text: &str, x: f32, y: f32, font: &Font, color: Color);
}

/// What a [`DrawCommand`] draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Path,
    Label,
}

/// One recorded draw call.
///
/// For `Path` commands `commands` holds SVG path data and `text` is empty;
/// for `Label` commands `text` holds the label and `(x, y)` its center.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub kind: DrawKind,
    pub commands: SharedString,
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f32,
    pub text: SharedString,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub font_family: SharedString,
}

/// Surface that records draw calls as path commands for a Slint canvas.
pub struct PathSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
    shapes: Vec<Shape>,
}

impl PathSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, commands: Vec::new(), shapes: Vec::new() }
    }

    /// Resize the surface; takes effect on the next render pass.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Commands recorded since the last [`Surface::clear`].
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Shapes recorded since the last clear, in draw order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Labels recorded since the last clear, in draw order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands
            .iter()
            .filter(|c| c.kind == DrawKind::Label)
            .map(|c| c.text.as_str())
    }

    /// Sync the recorded commands into a Slint model.
    ///
    /// Existing rows are overwritten in place and excess rows removed, so a
    /// bound `for` repeater only re-instantiates what actually changed.
    pub fn sync_to_model(&self, model: &VecModel<DrawCommand>) {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i < model.row_count() {
                model.set_row_data(i, cmd.clone());
            } else {
                model.push(cmd.clone());
            }
        }
        while model.row_count() > self.commands.len() {
            model.remove(model.row_count() - 1);
        }
    }

    /// Snapshot of the recorded commands as a fresh model.
    pub fn to_model(&self) -> ModelRc<DrawCommand> {
        ModelRc::from(Rc::new(VecModel::from(self.commands.clone())))
    }
}

impl Surface for PathSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.shapes.clear();
    }

    fn draw_shape(&mut self, shape: &Shape, paint: &Paint) {
        self.shapes.push(*shape);
        self.commands.push(DrawCommand {
            kind: DrawKind::Path,
            commands: shape.to_path_commands().into(),
            fill: paint.fill.unwrap_or_else(|| Color::from_argb_u8(0, 0, 0, 0)),
            stroke: paint.stroke.unwrap_or_else(|| Color::from_argb_u8(0, 0, 0, 0)),
            line_width: paint.line_width,
            text: SharedString::default(),
            x: 0.0,
            y: 0.0,
            font_size: 0.0,
            font_family: SharedString::default(),
        });
    }

    fn draw_label(&mut self, text: &str, x: f32, y: f32, font: &Font, color: Color) {
        self.commands.push(DrawCommand {
            kind: DrawKind::Label,
            commands: SharedString::default(),
            fill: color,
            stroke: Color::from_argb_u8(0, 0, 0, 0),
            line_width: 0.0,
            text: text.into(),
            x,
            y,
            font_size: font.size,
            font_family: font.family.as_str().into(),
        });
    }
}
