//! Paint sources and text placement modes.

use crate::gradient::CanvasGradient;

/// What a fill or stroke paints with.
#[derive(Debug, Clone)]
pub enum FillStyle {
    Color(tiny_skia::Color),
    LinearGradient(CanvasGradient),
}

impl Default for FillStyle {
    fn default() -> Self {
        FillStyle::Color(tiny_skia::Color::BLACK)
    }
}

impl FillStyle {
    /// False for fully transparent colors and gradients without stops.
    pub fn is_visible(&self) -> bool {
        match self {
            FillStyle::Color(color) => color.alpha() > 0.0,
            FillStyle::LinearGradient(gradient) => !gradient.stops.is_empty(),
        }
    }
}

/// Horizontal anchor of a text run relative to its x coordinate.
///
/// Text is always laid out left to right, so `Start` behaves as `Left` and
/// `End` as `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
}

/// Vertical anchor of a text run relative to its y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}
