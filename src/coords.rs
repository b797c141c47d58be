use crate::geometry::Point;

/// On-screen placement of the drawing surface, in the same units as raw
/// pointer positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceBounds {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Bounds of a surface sitting at the origin.
    pub const fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn to_normalized(&self, raw_x: f32, raw_y: f32) -> Point {
        to_normalized(self, raw_x, raw_y)
    }
}

/// Convert a raw pointer position into normalized surface space.
///
/// No clamping: positions outside the surface map outside `[0,1]`.
/// Degenerate (zero or negative) dimensions are treated as 1.
pub fn to_normalized(bounds: &SurfaceBounds, raw_x: f32, raw_y: f32) -> Point {
    let w = if bounds.width > 0.0 { bounds.width } else { 1.0 };
    let h = if bounds.height > 0.0 { bounds.height } else { 1.0 };
    Point::new((raw_x - bounds.left) / w, (raw_y - bounds.top) / h)
}
