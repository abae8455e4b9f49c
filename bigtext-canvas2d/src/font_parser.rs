//! CSS font shorthand parsing.
//!
//! Accepts the strings a canvas `font` property takes, e.g. `"60px Arial"` or
//! `"bold 120px 'Times New Roman', serif"`, and splits them into the parts
//! cosmic-text needs.

use crate::error::{Canvas2dError, Canvas2dResult};
use cosmic_text::{Style, Weight};

/// The parts of a CSS `font` shorthand that shaping needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFont {
    /// Font style (normal, italic, oblique).
    pub style: Style,
    /// Font weight (100-900 or keywords like bold).
    pub weight: Weight,
    /// Font size in pixels.
    pub size_px: f32,
    /// Font families in order of preference.
    pub families: Vec<String>,
}

impl Default for ParsedFont {
    fn default() -> Self {
        Self {
            style: Style::Normal,
            weight: Weight::NORMAL,
            size_px: 10.0,
            families: vec!["sans-serif".to_string()],
        }
    }
}

/// Leading keywords that may precede the size, and what they set.
enum Keyword {
    Style(Style),
    Weight(Weight),
    Ignored,
}

fn keyword(token: &str) -> Option<Keyword> {
    let kw = match token {
        "italic" => Keyword::Style(Style::Italic),
        "oblique" => Keyword::Style(Style::Oblique),
        "bold" => Keyword::Weight(Weight::BOLD),
        "bolder" => Keyword::Weight(Weight::EXTRA_BOLD),
        "lighter" => Keyword::Weight(Weight::LIGHT),
        // "normal" may name the style, variant, or weight; all are defaults
        "normal" | "small-caps" => Keyword::Ignored,
        _ => {
            let weight: u16 = token.parse().ok()?;
            if !(100..=900).contains(&weight) || weight % 100 != 0 {
                return None;
            }
            Keyword::Weight(Weight(weight))
        }
    };
    Some(kw)
}

/// Parse a CSS font string into components.
///
/// Format: `[style] [variant] [weight] size[/line-height] family[, family]*`.
/// An empty string yields the canvas default (`10px sans-serif`).
pub fn parse_font(font_str: &str) -> Canvas2dResult<ParsedFont> {
    let mut result = ParsedFont::default();
    let mut remaining = font_str.trim();
    if remaining.is_empty() {
        return Ok(result);
    }

    // Style / variant / weight keywords, in any order
    loop {
        let end = remaining
            .find(char::is_whitespace)
            .unwrap_or(remaining.len());
        match keyword(&remaining[..end]) {
            Some(Keyword::Style(style)) => result.style = style,
            Some(Keyword::Weight(weight)) => result.weight = weight,
            Some(Keyword::Ignored) => {}
            None => break,
        }
        remaining = remaining[end..].trim_start();
    }

    let (size, rest) = parse_font_size(remaining)?;
    result.size_px = size;
    remaining = rest;

    // Skip optional line-height
    if let Some(rest) = remaining.strip_prefix('/') {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        remaining = &rest[end..];
    }

    let families = parse_font_families(remaining);
    if !families.is_empty() {
        result.families = families;
    }

    Ok(result)
}

/// Parse a font size with an optional unit, returning pixels.
fn parse_font_size(s: &str) -> Canvas2dResult<(f32, &str)> {
    let num_end = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    if num_end == 0 {
        return Err(Canvas2dError::FontParseError(format!(
            "Expected font size, got: {}",
            s
        )));
    }

    let size: f32 = s[..num_end].parse().map_err(|_| {
        Canvas2dError::FontParseError(format!("Invalid font size number: {}", &s[..num_end]))
    })?;
    let rest = &s[num_end..];

    // Unitless sizes are treated as pixels
    let (multiplier, unit_len) = if rest.starts_with("px") {
        (1.0, 2)
    } else if rest.starts_with("pt") {
        (4.0 / 3.0, 2)
    } else if rest.starts_with("rem") {
        (16.0, 3)
    } else if rest.starts_with("em") {
        (16.0, 2)
    } else {
        (1.0, 0)
    };

    let size = size * multiplier;
    if !size.is_finite() || size <= 0.0 {
        return Err(Canvas2dError::FontParseError(format!(
            "Font size must be positive, got: {}",
            s
        )));
    }
    Ok((size, &rest[unit_len..]))
}

/// Split a comma separated family list, honoring quoted names.
fn parse_font_families(s: &str) -> Vec<String> {
    s.split(',')
        .map(|family| {
            family
                .trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .trim()
                .to_string()
        })
        .filter(|family| !family.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_font() {
        let font = parse_font("60px Arial").unwrap();
        assert_eq!(font.size_px, 60.0);
        assert_eq!(font.families, vec!["Arial"]);
        assert_eq!(font.weight, Weight::NORMAL);
        assert_eq!(font.style, Style::Normal);
    }

    #[test]
    fn test_bold_font_with_fallback_list() {
        let font = parse_font("bold 120px Arial, sans-serif").unwrap();
        assert_eq!(font.size_px, 120.0);
        assert_eq!(font.weight, Weight::BOLD);
        assert_eq!(font.families, vec!["Arial", "sans-serif"]);
    }

    #[test]
    fn test_quoted_family_and_italic() {
        let font = parse_font("italic 12pt 'Times New Roman', serif").unwrap();
        assert!((font.size_px - 16.0).abs() < 0.01);
        assert_eq!(font.style, Style::Italic);
        assert_eq!(font.families, vec!["Times New Roman", "serif"]);
    }

    #[test]
    fn test_numeric_weight_and_line_height() {
        let font = parse_font("700 16px/20px Helvetica").unwrap();
        assert_eq!(font.weight, Weight(700));
        assert_eq!(font.size_px, 16.0);
        assert_eq!(font.families, vec!["Helvetica"]);
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(parse_font("  ").unwrap(), ParsedFont::default());
    }

    #[test]
    fn test_missing_size_is_error() {
        assert!(parse_font("bold Arial").is_err());
        assert!(parse_font("0px Arial").is_err());
    }
}
