//! Mutable paint state of a context.

use crate::font_parser::ParsedFont;
use crate::shadow::ShadowState;
use crate::style::{FillStyle, TextAlign, TextBaseline};

/// Everything `save`/`restore` captures.
#[derive(Debug, Clone)]
pub struct DrawingState {
    pub fill_style: FillStyle,
    pub stroke_style: FillStyle,
    /// Stroke width in device pixels.
    pub line_width: f32,
    pub font: ParsedFont,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    /// Extra advance after every glyph, in device pixels.
    pub letter_spacing: f32,
    pub shadow: ShadowState,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: FillStyle::default(),
            stroke_style: FillStyle::default(),
            line_width: 1.0,
            font: ParsedFont::default(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
            letter_spacing: 0.0,
            shadow: ShadowState::default(),
        }
    }
}
