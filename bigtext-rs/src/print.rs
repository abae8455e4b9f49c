//! The print document produced for the PDF path.
//!
//! PDF output is delegated to the platform print flow. The exporter only
//! builds a self-contained HTML document with the right styling, and a
//! [`PrintService`] takes it from there.

use crate::catalog::{FontWeight, PaintTraits};
use crate::color::{HexColor, Rgba};
use crate::error::CollaboratorError;
use crate::request::RenderRequest;
use crate::svg::escape_xml;
use std::fs;
use std::path::{Path, PathBuf};

/// Styling handed to the print flow.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStyle {
    pub font_family: String,
    /// CSS pixels. The print flow is resolution independent, so the scale
    /// factor does not apply.
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub color: Rgba,
    pub background: Option<HexColor>,
}

impl PrintStyle {
    pub fn new(request: &RenderRequest, traits: &PaintTraits) -> Self {
        Self {
            font_family: request.font_family.clone(),
            font_size: request.point_size,
            font_weight: traits.weight,
            color: traits.plain_fill(),
            background: request.background.fill_color(),
        }
    }
}

/// Render the print document for `text`.
pub fn print_document(style: &PrintStyle, text: &str) -> String {
    let background = style
        .background
        .map(|color| format!("\n            background-color: {color};"))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Big Text</title>
    <style>
        body {{ margin: 0; padding: 20px; }}
        .text-content {{
            font-family: {family};
            font-size: {size}px;
            font-weight: {weight};
            color: {color};
            text-align: center;{background}
            padding: 40px;
        }}
    </style>
</head>
<body>
    <div class="text-content">{text}</div>
</body>
</html>
"#,
        family = css_value(&style.font_family),
        size = style.font_size,
        weight = style.font_weight.as_css(),
        color = style.color.to_css(),
        text = escape_xml(text),
    )
}

/// Drop characters that would end a CSS declaration or the style element.
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>'))
        .collect()
}

/// The platform print flow.
pub trait PrintService {
    fn print(&self, document: &str) -> Result<(), CollaboratorError>;
}

/// Hands the document over as a file, to be opened in a browser and printed
/// to PDF from there. Missing parent directories are created.
#[derive(Debug, Clone)]
pub struct PrintToFile {
    path: PathBuf,
}

impl PrintToFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintService for PrintToFile {
    fn print(&self, document: &str) -> Result<(), CollaboratorError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, document)?;
        log::info!("print document ready at {}", self.path.display());
        Ok(())
    }
}
