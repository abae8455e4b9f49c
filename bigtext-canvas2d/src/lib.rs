//! Canvas 2D text surface using tiny-skia and cosmic-text.
//!
//! This crate provides the subset of the Canvas 2D API needed to render one
//! line of styled text without a browser:
//! - `tiny-skia` for 2D rasterization (fills, strokes, gradients, shadows)
//! - `cosmic-text` for text shaping, measurement, and glyph outlines
//! - `fontdb` for the font database (configured via [`FontConfig`])
//!
//! # Example
//!
//! ```rust,ignore
//! use bigtext_canvas2d::Canvas2dContext;
//!
//! let mut ctx = Canvas2dContext::new(400, 300)?;
//! ctx.set_font("bold 48px sans-serif")?;
//! ctx.set_fill_style("#ff0000")?;
//! ctx.fill_text("Hello", 20.0, 100.0);
//! let png_data = ctx.to_png()?;
//! ```

mod context;
mod drawing_state;
mod error;
mod font_config;
mod font_parser;
mod geometry;
mod gradient;
mod shadow;
mod style;
mod text;

pub use context::{Canvas2dContext, MAX_DIMENSION};
pub use drawing_state::DrawingState;
pub use error::{Canvas2dError, Canvas2dResult};
pub use font_config::{FallbackFamilies, FontConfig, ResolvedFontConfig};
pub use font_parser::{parse_font, ParsedFont};
pub use geometry::{CanvasColor, RectParams};
pub use gradient::{CanvasGradient, GradientStop};
pub use shadow::ShadowState;
pub use style::{FillStyle, TextAlign, TextBaseline};
pub use text::TextMetrics;
