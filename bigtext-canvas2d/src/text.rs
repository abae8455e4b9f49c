//! Text shaping and measurement using cosmic-text.

use crate::font_parser::ParsedFont;
use crate::style::{TextAlign, TextBaseline};
use cosmic_text::{Attrs, Buffer, CacheKeyFlags, Family, FontSystem, Metrics, Shaping};

/// Text metrics returned by `measure_text()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the text in pixels, letter spacing included.
    pub width: f32,
    /// Distance from the baseline to the top of the line box.
    pub font_bounding_box_ascent: f32,
    /// Distance from the baseline to the bottom of the line box.
    pub font_bounding_box_descent: f32,
}

/// A font family choice that outlives the borrowed family list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ResolvedFamily {
    Generic(Family<'static>),
    Named(String),
}

impl ResolvedFamily {
    pub(crate) fn as_family(&self) -> Family<'_> {
        match self {
            ResolvedFamily::Generic(family) => *family,
            ResolvedFamily::Named(name) => Family::Name(name),
        }
    }
}

/// Walk a CSS family list and pick the first entry the font database can
/// serve, the way a browser falls through `font-family`.
pub(crate) fn resolve_family(font_system: &FontSystem, families: &[String]) -> ResolvedFamily {
    for name in families {
        let generic = match name.to_ascii_lowercase().as_str() {
            "sans-serif" | "system-ui" => Some(Family::SansSerif),
            "serif" => Some(Family::Serif),
            "monospace" => Some(Family::Monospace),
            "cursive" => Some(Family::Cursive),
            "fantasy" => Some(Family::Fantasy),
            _ => None,
        };
        if let Some(family) = generic {
            return ResolvedFamily::Generic(family);
        }

        // Use the database's spelling so the exact-match lookup succeeds
        let found = font_system.db().faces().find_map(|face| {
            face.families
                .iter()
                .find(|(fam, _)| fam.eq_ignore_ascii_case(name))
                .map(|(fam, _)| fam.clone())
        });
        if let Some(fam) = found {
            return ResolvedFamily::Named(fam);
        }
        log::debug!("font family {:?} not available, trying next", name);
    }
    ResolvedFamily::Generic(Family::SansSerif)
}

/// cosmic-text tracks in em; the canvas state holds pixels.
pub(crate) fn spacing_em(letter_spacing_px: f32, size_px: f32) -> f32 {
    if size_px > 0.0 && size_px.is_finite() {
        letter_spacing_px / size_px
    } else {
        0.0
    }
}

/// Shape a single line of text into a cosmic-text buffer.
pub(crate) fn shape_text(
    font_system: &mut FontSystem,
    text: &str,
    font: &ParsedFont,
    letter_spacing: f32,
) -> Buffer {
    let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);

    let family = resolve_family(font_system, &font.families);
    // Hinting stays off so glyph outlines match the vector (SVG) output
    let attrs = Attrs::new()
        .family(family.as_family())
        .weight(font.weight)
        .style(font.style)
        .letter_spacing(spacing_em(letter_spacing, font.size_px))
        .cache_key_flags(CacheKeyFlags::DISABLE_HINTING);

    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);
    buffer
}

/// Width, ascent and descent of a shaped buffer.
pub(crate) fn buffer_metrics(buffer: &Buffer, font: &ParsedFont) -> TextMetrics {
    let mut width: f32 = 0.0;
    let mut ascent: f32 = 0.0;
    let mut descent: f32 = 0.0;
    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
        ascent = ascent.max(run.line_y - run.line_top);
        descent = descent.max((run.line_top + run.line_height) - run.line_y);
    }
    if ascent == 0.0 && descent == 0.0 {
        // Nothing shaped (empty text); fall back to the usual 80/20 split
        ascent = font.size_px * 0.8;
        descent = font.size_px * 0.2;
    }
    TextMetrics {
        width,
        font_bounding_box_ascent: ascent,
        font_bounding_box_descent: descent,
    }
}

/// Measure text using cosmic-text.
pub fn measure_text(
    font_system: &mut FontSystem,
    text: &str,
    font: &ParsedFont,
    letter_spacing: f32,
) -> TextMetrics {
    if !can_shape(font_system, text) {
        return TextMetrics {
            width: 0.0,
            font_bounding_box_ascent: font.size_px * 0.8,
            font_bounding_box_descent: font.size_px * 0.2,
        };
    }
    let buffer = shape_text(font_system, text, font, letter_spacing);
    buffer_metrics(&buffer, font)
}

/// Shaping needs at least one face and something to shape.
pub(crate) fn can_shape(font_system: &FontSystem, text: &str) -> bool {
    if font_system.db().is_empty() {
        log::warn!("no fonts available, text is not rendered");
        return false;
    }
    !text.is_empty()
}

/// Shift applied to the anchor x so a run of `width` lands per `align`.
pub fn calculate_text_x_offset(width: f32, align: TextAlign) -> f32 {
    match align {
        TextAlign::Left | TextAlign::Start => 0.0,
        TextAlign::Right | TextAlign::End => -width,
        TextAlign::Center => -width / 2.0,
    }
}

/// Shift from the anchor y to the alphabetic baseline.
pub fn calculate_text_y_offset(ascent: f32, descent: f32, baseline: TextBaseline) -> f32 {
    match baseline {
        TextBaseline::Top => ascent,
        TextBaseline::Middle => (ascent - descent) / 2.0,
        TextBaseline::Alphabetic => 0.0,
        TextBaseline::Bottom => -descent,
    }
}
