//! The drawing surface and its state setters.

mod drawing;
mod image_ops;
mod text_rendering;

use crate::drawing_state::DrawingState;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::font_config::{FontConfig, ResolvedFontConfig};
use crate::geometry::CanvasColor;
use crate::gradient::CanvasGradient;
use crate::style::FillStyle;
use cosmic_text::{FontSystem, SwashCache};
use tiny_skia::Pixmap;

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 32767;

/// An RGBA surface with a Canvas 2D style paint state.
///
/// The context owns its own [`FontSystem`], so one context must not be
/// shared across threads; create one per render instead.
pub struct Canvas2dContext {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) pixmap: Pixmap,
    pub(crate) font_system: FontSystem,
    pub(crate) swash_cache: SwashCache,
    pub(crate) state: DrawingState,
    state_stack: Vec<DrawingState>,
}

fn new_pixmap(width: u32, height: u32) -> Canvas2dResult<Pixmap> {
    if !(1..=MAX_DIMENSION).contains(&width) || !(1..=MAX_DIMENSION).contains(&height) {
        return Err(Canvas2dError::InvalidDimensions { width, height });
    }
    Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })
}

impl Canvas2dContext {
    /// Surface backed by a fresh scan of the default font sources.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        Self::with_resolved(width, height, &FontConfig::default().resolve())
    }

    /// Surface sharing an already scanned font database.
    pub fn with_resolved(
        width: u32,
        height: u32,
        resolved: &ResolvedFontConfig,
    ) -> Canvas2dResult<Self> {
        let pixmap = new_pixmap(width, height)?;
        let font_system =
            FontSystem::new_with_locale_and_db("en".to_string(), resolved.fontdb.clone());
        log::debug!(target: "canvas", "surface {}x{}", width, height);

        Ok(Self {
            width,
            height,
            pixmap,
            font_system,
            swash_cache: SwashCache::new(),
            state: DrawingState::default(),
            state_stack: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Give the surface new dimensions. Pixels become transparent and the
    /// paint state starts over; loaded fonts stay.
    pub fn resize(&mut self, width: u32, height: u32) -> Canvas2dResult<()> {
        self.pixmap = new_pixmap(width, height)?;
        self.width = width;
        self.height = height;
        self.reset_state();
        log::debug!(target: "canvas", "resized to {}x{}", width, height);
        Ok(())
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn save(&mut self) {
        self.state_stack.push(self.state.clone());
    }

    /// Pop the last saved state. Does nothing when nothing was saved.
    pub fn restore(&mut self) {
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    /// Default paint state and an empty save stack. Pixels are untouched.
    pub fn reset_state(&mut self) {
        self.state = DrawingState::default();
        self.state_stack.clear();
    }

    pub fn set_fill_style(&mut self, css: &str) -> Canvas2dResult<()> {
        self.state.fill_style = FillStyle::Color(parse_color(css)?);
        Ok(())
    }

    pub fn set_fill_style_color(&mut self, color: CanvasColor) {
        self.state.fill_style = FillStyle::Color(color.into());
    }

    pub fn set_fill_style_gradient(&mut self, gradient: CanvasGradient) {
        self.state.fill_style = FillStyle::LinearGradient(gradient);
    }

    pub fn set_stroke_style(&mut self, css: &str) -> Canvas2dResult<()> {
        self.state.stroke_style = FillStyle::Color(parse_color(css)?);
        Ok(())
    }

    pub fn set_stroke_style_color(&mut self, color: CanvasColor) {
        self.state.stroke_style = FillStyle::Color(color.into());
    }

    /// Zero, negative, and non-finite widths are ignored.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    pub fn set_shadow_color(&mut self, css: &str) -> Canvas2dResult<()> {
        self.state.shadow.color = parse_color(css)?;
        Ok(())
    }

    pub fn set_shadow_color_rgba(&mut self, color: CanvasColor) {
        self.state.shadow.color = color.into();
    }

    /// Negative and non-finite blur values are ignored.
    pub fn set_shadow_blur(&mut self, blur: f32) {
        if blur.is_finite() && blur >= 0.0 {
            self.state.shadow.blur = blur;
        }
    }

    /// Each non-finite component is ignored on its own.
    pub fn set_shadow_offset(&mut self, x: f32, y: f32) {
        if x.is_finite() {
            self.state.shadow.offset_x = x;
        }
        if y.is_finite() {
            self.state.shadow.offset_y = y;
        }
    }

    /// Gradient along the line from (x0, y0) to (x1, y1) in device space.
    pub fn create_linear_gradient(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> CanvasGradient {
        CanvasGradient::new_linear(x0, y0, x1, y1)
    }
}

pub(crate) fn parse_color(s: &str) -> Canvas2dResult<tiny_skia::Color> {
    let parsed = csscolorparser::parse(s)
        .map_err(|e| Canvas2dError::ColorParseError(format!("{}: {}", s, e)))?;

    let [r, g, b, a] = parsed.to_array();
    tiny_skia::Color::from_rgba(r, g, b, a)
        .ok_or_else(|| Canvas2dError::ColorParseError(s.to_string()))
}
