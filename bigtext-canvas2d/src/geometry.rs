//! Plain value types passed to drawing calls.

/// Axis-aligned rectangle in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectParams {
    /// Rectangle covering a whole `width` x `height` surface.
    pub fn covering(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
        }
    }
}

/// Straight (non-premultiplied) 8-bit RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CanvasColor {
    pub const TRANSPARENT: CanvasColor = CanvasColor::from_rgba8(0, 0, 0, 0);

    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<CanvasColor> for tiny_skia::Color {
    fn from(c: CanvasColor) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}
