//! Linear gradients.

use crate::error::{Canvas2dError, Canvas2dResult};

#[derive(Debug, Clone)]
pub struct GradientStop {
    /// Position along the gradient line, 0 at the start point.
    pub offset: f64,
    pub color: tiny_skia::Color,
}

/// Linear canvas gradient from (x0, y0) to (x1, y1), in device space.
#[derive(Debug, Clone)]
pub struct CanvasGradient {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    /// Sorted by offset; equal offsets keep insertion order.
    pub stops: Vec<GradientStop>,
}

impl CanvasGradient {
    pub fn new_linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            stops: Vec::new(),
        }
    }

    /// Insert a stop, keeping stops ordered by offset. NaN and offsets
    /// outside 0..=1 are errors.
    pub fn add_color_stop(&mut self, offset: f64, color: tiny_skia::Color) -> Canvas2dResult<()> {
        if !(0.0..=1.0).contains(&offset) {
            return Err(Canvas2dError::InvalidGradientStop(offset));
        }
        let at = self.stops.partition_point(|stop| stop.offset <= offset);
        self.stops.insert(at, GradientStop { offset, color });
        Ok(())
    }
}
