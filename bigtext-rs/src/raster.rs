//! Canvas rendering of a style for the raster export.

use crate::catalog::{Fill, FontWeight, PaintTraits};
use bigtext_canvas2d::{Canvas2dContext, Canvas2dResult, CanvasColor, TextAlign, TextBaseline};

#[derive(Debug, Clone, PartialEq)]
pub enum RasterFill {
    None,
    Color(CanvasColor),
    /// Stops of a horizontal gradient spanning the whole surface width.
    Gradient(Vec<(f32, CanvasColor)>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterStroke {
    pub color: CanvasColor,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterShadow {
    pub color: CanvasColor,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Canvas state for one style at a given scale factor.
///
/// Lengths (stroke width, shadow blur and offsets, letter spacing) are
/// already multiplied by the scale factor.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterTraits {
    pub fill: RasterFill,
    pub stroke: Option<RasterStroke>,
    pub shadow: Option<RasterShadow>,
    pub weight: FontWeight,
    pub letter_spacing: f32,
}

impl RasterTraits {
    pub fn from_traits(traits: &PaintTraits, scale: f32) -> Self {
        let fill = match &traits.fill {
            Fill::None => RasterFill::None,
            Fill::Solid(color) => RasterFill::Color(color.to_canvas()),
            Fill::Gradient(stops) => RasterFill::Gradient(
                stops
                    .iter()
                    .map(|s| (s.offset, s.color.to_canvas()))
                    .collect(),
            ),
        };
        Self {
            fill,
            stroke: traits.stroke.map(|s| RasterStroke {
                color: s.color.to_canvas(),
                width: s.width * scale,
            }),
            shadow: traits.shadow.map(|s| RasterShadow {
                color: s.color.to_canvas(),
                blur: s.blur * scale,
                offset_x: s.offset_x * scale,
                offset_y: s.offset_y * scale,
            }),
            weight: traits.weight,
            letter_spacing: traits.letter_spacing * scale,
        }
    }

    /// CSS font shorthand for this style, e.g. `bold 60px Arial, sans-serif`.
    pub fn font(&self, size_px: f32, family: &str) -> String {
        format!("{} {}px {}", self.weight.as_css(), size_px, family)
    }

    /// Set only what text measurement depends on: font and letter spacing.
    pub fn apply_font(
        &self,
        ctx: &mut Canvas2dContext,
        size_px: f32,
        family: &str,
    ) -> Canvas2dResult<()> {
        ctx.set_font(&self.font(size_px, family))?;
        ctx.set_letter_spacing(self.letter_spacing);
        Ok(())
    }

    /// Replace the context's drawing state with this style.
    ///
    /// The state is reset first, so nothing from an earlier style survives.
    /// Text is anchored at its center.
    pub fn apply(&self, ctx: &mut Canvas2dContext, size_px: f32, family: &str) -> Canvas2dResult<()> {
        ctx.reset_state();
        self.apply_font(ctx, size_px, family)?;
        ctx.set_text_align(TextAlign::Center);
        ctx.set_text_baseline(TextBaseline::Middle);

        match &self.fill {
            RasterFill::None => ctx.set_fill_style_color(CanvasColor::TRANSPARENT),
            RasterFill::Color(color) => ctx.set_fill_style_color(*color),
            RasterFill::Gradient(stops) => {
                let mut gradient = ctx.create_linear_gradient(0.0, 0.0, ctx.width() as f32, 0.0);
                for (offset, color) in stops {
                    gradient.add_color_stop(f64::from(*offset), (*color).into())?;
                }
                ctx.set_fill_style_gradient(gradient);
            }
        }

        if let Some(stroke) = self.stroke {
            ctx.set_stroke_style_color(stroke.color);
            ctx.set_line_width(stroke.width);
        }

        if let Some(shadow) = self.shadow {
            ctx.set_shadow_color_rgba(shadow.color);
            ctx.set_shadow_blur(shadow.blur);
            ctx.set_shadow_offset(shadow.offset_x, shadow.offset_y);
        }
        Ok(())
    }

    /// Fill, then stroke, `text` at (`x`, `y`) with the applied state.
    pub fn draw_text(&self, ctx: &mut Canvas2dContext, text: &str, x: f32, y: f32) {
        if self.fill != RasterFill::None {
            ctx.fill_text(text, x, y);
        }
        if self.stroke.is_some() {
            ctx.stroke_text(text, x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StyleCatalog;
    use crate::color::Rgba;
    use bigtext_canvas2d::{FillStyle, FontConfig, ResolvedFontConfig};

    const USER: Rgba = Rgba::hex(0x3b82f6);

    fn no_fonts() -> ResolvedFontConfig {
        FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        }
        .resolve()
    }

    fn raster(id: &str, scale: f32) -> RasterTraits {
        RasterTraits::from_traits(
            &StyleCatalog::builtin().resolve(id).paint_traits(USER),
            scale,
        )
    }

    #[test]
    fn test_effects_scale_with_factor() {
        let traits = raster("shadow", 3.0);
        let shadow = traits.shadow.unwrap();
        assert_eq!((shadow.blur, shadow.offset_x, shadow.offset_y), (24.0, 12.0, 12.0));
        assert_eq!(shadow.color, CanvasColor::from_rgba8(0, 0, 0, 77));

        assert_eq!(raster("outline", 2.0).stroke.unwrap().width, 6.0);
        assert_eq!(raster("bold", 2.0).letter_spacing, 4.0);
    }

    #[test]
    fn test_font_shorthand() {
        assert_eq!(raster("bold", 1.0).font(60.0, "Arial"), "bold 60px Arial");
        assert_eq!(
            raster("neon", 1.0).font(120.0, "Arial, sans-serif"),
            "normal 120px Arial, sans-serif"
        );
    }

    #[test]
    fn test_apply_sets_context_state() {
        let mut ctx = Canvas2dContext::with_resolved(200, 50, &no_fonts()).unwrap();
        raster("bold", 2.0).apply(&mut ctx, 120.0, "Arial").unwrap();
        let state = ctx.state();
        assert_eq!(state.font.size_px, 120.0);
        assert_eq!(state.font.weight.0, 700);
        assert_eq!(state.letter_spacing, 4.0);
        assert_eq!(state.text_align, TextAlign::Center);
        assert_eq!(state.text_baseline, TextBaseline::Middle);
        assert!(!state.shadow.is_active());
    }

    #[test]
    fn test_apply_gradient_spans_surface() {
        let mut ctx = Canvas2dContext::with_resolved(320, 40, &no_fonts()).unwrap();
        raster("rainbow", 1.0).apply(&mut ctx, 20.0, "serif").unwrap();
        match &ctx.state().fill_style {
            FillStyle::LinearGradient(g) => {
                assert_eq!((g.x0, g.x1), (0.0, 320.0));
                assert_eq!((g.y0, g.y1), (0.0, 0.0));
                assert_eq!(g.stops.len(), 7);
            }
            other => panic!("expected gradient, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_resets_previous_style() {
        let mut ctx = Canvas2dContext::with_resolved(100, 40, &no_fonts()).unwrap();
        raster("fire", 1.0).apply(&mut ctx, 20.0, "serif").unwrap();
        assert!(ctx.state().shadow.is_active());

        raster("normal", 1.0).apply(&mut ctx, 20.0, "serif").unwrap();
        assert!(!ctx.state().shadow.is_active());
        assert_eq!(ctx.state().line_width, 1.0);
        assert!(matches!(ctx.state().fill_style, FillStyle::Color(_)));
    }

    #[test]
    fn test_outline_has_no_fill() {
        let traits = raster("outline", 1.0);
        assert_eq!(traits.fill, RasterFill::None);
        let mut ctx = Canvas2dContext::with_resolved(100, 40, &no_fonts()).unwrap();
        traits.apply(&mut ctx, 20.0, "serif").unwrap();
        assert!(!ctx.state().fill_style.is_visible());
        assert_eq!(ctx.state().line_width, 3.0);
    }
}
