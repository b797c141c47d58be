//! Pixel-space shapes and their SVG path command encoding.
//!
//! Every shape the editor draws goes through [`Shape`], which a
//! [`Surface`](crate::surface::Surface) either consumes directly or turns into
//! path commands for a Slint `Path` element via [`Shape::to_path_commands`].

use crate::geometry::BBox;

/// Cubic bezier curve, in whatever space its points were built in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: (f32, f32), // Start point
    pub p1: (f32, f32), // Control point 1
    pub p2: (f32, f32), // Control point 2
    pub p3: (f32, f32), // End point
}

impl CubicBezier {
    /// Connection curve from the center of `from` to the center of `to`.
    ///
    /// Control points extend horizontally by a third of each box's width, so
    /// the curve leaves and arrives with horizontal tangents.
    pub fn connecting(from: &BBox, to: &BBox) -> Self {
        let begin = from.center();
        let end = to.center();
        CubicBezier {
            p0: (begin.x, begin.y),
            p1: (begin.x + from.w / 3.0, begin.y),
            p2: (end.x - to.w / 3.0, end.y),
            p3: (end.x, end.y),
        }
    }

    /// Scale a normalized curve to a `width`×`height` pixel surface.
    pub fn scaled(&self, width: f32, height: f32) -> Self {
        let s = |p: (f32, f32)| (p.0 * width, p.1 * height);
        CubicBezier {
            p0: s(self.p0),
            p1: s(self.p1),
            p2: s(self.p2),
            p3: s(self.p3),
        }
    }
}

/// A drawable outline in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect { x: f32, y: f32, width: f32, height: f32 },
    RoundedRect { x: f32, y: f32, width: f32, height: f32, radius: f32 },
    Circle { cx: f32, cy: f32, radius: f32 },
    Curve(CubicBezier),
}

impl Shape {
    /// Rectangle covering a normalized box on a `width`×`height` surface.
    pub fn rect_over(bbox: &BBox, width: f32, height: f32) -> Shape {
        Shape::Rect {
            x: bbox.x * width,
            y: bbox.y * height,
            width: bbox.w * width,
            height: bbox.h * height,
        }
    }

    /// Generate SVG path commands for this shape.
    ///
    /// Rounded rectangles are traced counter-clockwise starting on the left
    /// edge, with the corner radius clamped to half the shorter side.
    pub fn to_path_commands(&self) -> String {
        match *self {
            Shape::Rect { x, y, width, height } => format!(
                "M {} {} L {} {} L {} {} L {} {} Z",
                x,
                y,
                x + width,
                y,
                x + width,
                y + height,
                x,
                y + height
            ),
            Shape::RoundedRect { x, y, width, height, radius } => {
                let r = radius.min(width.abs() / 2.0).min(height.abs() / 2.0).max(0.0);
                format!(
                    "M {} {} L {} {} A {r} {r} 0 0 0 {} {} L {} {} A {r} {r} 0 0 0 {} {} \
                     L {} {} A {r} {r} 0 0 0 {} {} L {} {} A {r} {r} 0 0 0 {} {} Z",
                    x,
                    y + r,
                    x,
                    y + height - r,
                    x + r,
                    y + height,
                    x + width - r,
                    y + height,
                    x + width,
                    y + height - r,
                    x + width,
                    y + r,
                    x + width - r,
                    y,
                    x + r,
                    y,
                    x,
                    y + r,
                    r = r
                )
            }
            Shape::Circle { cx, cy, radius } => format!(
                "M {} {} A {r} {r} 0 1 0 {} {} A {r} {r} 0 1 0 {} {} Z",
                cx - radius,
                cy,
                cx + radius,
                cy,
                cx - radius,
                cy,
                r = radius
            ),
            Shape::Curve(c) => format!(
                "M {} {} C {} {} {} {} {} {}",
                c.p0.0, c.p0.1, c.p1.0, c.p1.1, c.p2.0, c.p2.1, c.p3.0, c.p3.1
            ),
        }
    }
}
