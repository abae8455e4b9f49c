//! Export requests.

use crate::color::HexColor;
use crate::error::ExportError;
use std::fmt;
use std::str::FromStr;

/// Output formats the exporter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Png,
    Jpg,
    Svg,
    /// A print-ready HTML document, handed to the platform print flow.
    Pdf,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Png,
        OutputFormat::Jpg,
        OutputFormat::Svg,
        OutputFormat::Pdf,
    ];

    /// Extension of the artifact file for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "html",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpg => "image/jpeg",
            OutputFormat::Svg => "image/svg+xml",
            OutputFormat::Pdf => "text/html",
        }
    }

    pub fn is_raster(&self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Jpg)
    }
}

impl FromStr for OutputFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
        };
        f.write_str(name)
    }
}

/// What sits behind the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundMode {
    #[default]
    Transparent,
    White,
    Black,
    Custom(HexColor),
}

impl BackgroundMode {
    /// The fill color, or `None` when nothing is painted.
    pub fn fill_color(&self) -> Option<HexColor> {
        match self {
            BackgroundMode::Transparent => None,
            BackgroundMode::White => Some(HexColor::WHITE),
            BackgroundMode::Black => Some(HexColor::BLACK),
            BackgroundMode::Custom(color) => Some(*color),
        }
    }
}

impl FromStr for BackgroundMode {
    type Err = ExportError;

    /// Accepts `transparent`, `white`, `black`, or a `#rrggbb` color,
    /// optionally written as `custom:#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "transparent" => Ok(BackgroundMode::Transparent),
            "white" => Ok(BackgroundMode::White),
            "black" => Ok(BackgroundMode::Black),
            _ => {
                let hex = s.strip_prefix("custom:").unwrap_or(s);
                Ok(BackgroundMode::Custom(hex.parse()?))
            }
        }
    }
}

impl fmt::Display for BackgroundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundMode::Transparent => f.write_str("transparent"),
            BackgroundMode::White => f.write_str("white"),
            BackgroundMode::Black => f.write_str("black"),
            BackgroundMode::Custom(color) => write!(f, "custom:{color}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub scale_factor: u32,
    pub background: BackgroundMode,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale_factor: 1,
            background: BackgroundMode::Transparent,
        }
    }
}

/// Everything one export needs. Built fresh for every export.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub text: String,
    pub font_family: String,
    /// Font size in CSS pixels at 1x.
    pub point_size: u32,
    /// Only used when the style accepts a user color.
    pub color: HexColor,
    /// Unknown ids render with the default style.
    pub style_id: String,
    pub output_format: OutputFormat,
    pub scale_factor: u32,
    pub background: BackgroundMode,
}

impl RenderRequest {
    /// A 1x transparent PNG request.
    pub fn new(text: impl Into<String>, style_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_family: "Arial, sans-serif".to_string(),
            point_size: 60,
            color: HexColor::new(0x3b, 0x82, 0xf6),
            style_id: style_id.into(),
            output_format: OutputFormat::Png,
            scale_factor: 1,
            background: BackgroundMode::Transparent,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.scale_factor = options.scale_factor;
        self.background = options.background;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("png", OutputFormat::Png)]
    #[case("PNG", OutputFormat::Png)]
    #[case("jpg", OutputFormat::Jpg)]
    #[case("jpeg", OutputFormat::Jpg)]
    #[case("svg", OutputFormat::Svg)]
    #[case("Pdf", OutputFormat::Pdf)]
    fn test_parse_format(#[case] input: &str, #[case] expected: OutputFormat) {
        assert_eq!(input.parse::<OutputFormat>().unwrap(), expected);
    }

    #[rstest]
    #[case("bmp")]
    #[case("gif")]
    #[case("")]
    fn test_unsupported_format(#[case] input: &str) {
        match input.parse::<OutputFormat>() {
            Err(ExportError::UnsupportedFormat(name)) => assert_eq!(name, input),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_format_files() {
        assert_eq!(OutputFormat::Jpg.mime_type(), "image/jpeg");
        assert_eq!(OutputFormat::Pdf.extension(), "html");
        assert_eq!(OutputFormat::Pdf.to_string(), "pdf");
    }

    #[rstest]
    #[case("transparent", BackgroundMode::Transparent)]
    #[case("White", BackgroundMode::White)]
    #[case("black", BackgroundMode::Black)]
    #[case("#ff0000", BackgroundMode::Custom(HexColor::new(255, 0, 0)))]
    #[case("custom:#00ff00", BackgroundMode::Custom(HexColor::new(0, 255, 0)))]
    fn test_parse_background(#[case] input: &str, #[case] expected: BackgroundMode) {
        let mode: BackgroundMode = input.parse().unwrap();
        assert_eq!(mode, expected);
        assert_eq!(mode.to_string().parse::<BackgroundMode>().unwrap(), mode);
    }

    #[test]
    fn test_background_fill() {
        assert_eq!(BackgroundMode::Transparent.fill_color(), None);
        assert_eq!(BackgroundMode::White.fill_color(), Some(HexColor::WHITE));
        assert!("grey".parse::<BackgroundMode>().is_err());
    }
}
