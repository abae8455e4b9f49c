//! SVG output.
//!
//! The SVG is emitted independently of the raster surface. It carries one
//! centered `<text>` element with a solid fill, so gradients, strokes and
//! shadows degrade to the style's plain fill color.

use crate::catalog::FontWeight;
use crate::color::{HexColor, Rgba};
use crate::exporter::SurfaceLayout;

/// Text and font attributes of the SVG `<text>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgText<'a> {
    pub text: &'a str,
    pub font_family: &'a str,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub fill: Rgba,
}

pub fn svg_document(layout: &SurfaceLayout, text: &SvgText, background: Option<HexColor>) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = layout.width,
        h = layout.height,
    );
    svg.push('\n');
    if let Some(color) = background {
        svg.push_str(&format!(
            r#"  <rect width="100%" height="100%" fill="{color}"/>"#
        ));
        svg.push('\n');
    }

    let mut fill = format!(r#"fill="{}""#, text.fill.to_hex());
    if !text.fill.is_opaque() {
        fill.push_str(&format!(r#" fill-opacity="{}""#, text.fill.a));
    }
    svg.push_str(&format!(
        r#"  <text x="50%" y="50%" text-anchor="middle" dominant-baseline="middle" font-family="{family}" font-size="{size}" font-weight="{weight}" {fill}>{content}</text>"#,
        family = escape_xml(text.font_family),
        size = text.font_size,
        weight = text.font_weight.as_css(),
        content = escape_xml(text.text),
    ));
    svg.push_str("\n</svg>\n");
    svg
}

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
