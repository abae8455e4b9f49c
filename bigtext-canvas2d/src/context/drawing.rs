//! Rectangles and the paint/shader plumbing shared with text.

use super::Canvas2dContext;
use crate::geometry::RectParams;
use crate::gradient::CanvasGradient;
use crate::style::FillStyle;
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Paint `params` with the fill style. Empty or non-finite rectangles
    /// draw nothing.
    pub fn fill_rect(&mut self, params: &RectParams) {
        log::trace!(target: "canvas", "fill_rect {:?}", params);
        let Some(rect) =
            tiny_skia::Rect::from_xywh(params.x, params.y, params.width, params.height)
        else {
            return;
        };
        let style = self.state.fill_style.clone();
        self.with_paint_from_style(style, |ctx, paint| {
            ctx.pixmap.fill_rect(rect, paint, Transform::identity(), None);
        });
    }

    /// Stroke geometry for the current line width. Joins and caps follow
    /// the canvas defaults: miter joins limited at 10, butt caps.
    pub(crate) fn current_stroke(&self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.state.line_width,
            miter_limit: 10.0,
            ..tiny_skia::Stroke::default()
        }
    }

    pub(crate) fn with_paint_from_style<R>(
        &mut self,
        style: FillStyle,
        draw: impl for<'a> FnOnce(&mut Self, &tiny_skia::Paint<'a>) -> R,
    ) -> Option<R> {
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            ..Default::default()
        };

        match style {
            FillStyle::Color(color) => {
                paint.set_color(color);
                Some(draw(self, &paint))
            }
            FillStyle::LinearGradient(gradient) => {
                paint.shader = create_gradient_shader(&gradient)?;
                Some(draw(self, &paint))
            }
        }
    }
}

/// Build a device-space shader for a linear gradient.
///
/// A single stop paints a solid color; no stops paint nothing.
pub(crate) fn create_gradient_shader(
    gradient: &CanvasGradient,
) -> Option<tiny_skia::Shader<'static>> {
    match gradient.stops.as_slice() {
        [] => None,
        [only] => Some(tiny_skia::Shader::SolidColor(only.color)),
        stops => {
            let stops: Vec<tiny_skia::GradientStop> = stops
                .iter()
                .map(|stop| tiny_skia::GradientStop::new(stop.offset as f32, stop.color))
                .collect();
            tiny_skia::LinearGradient::new(
                tiny_skia::Point {
                    x: gradient.x0,
                    y: gradient.y0,
                },
                tiny_skia::Point {
                    x: gradient.x1,
                    y: gradient.y1,
                },
                stops,
                tiny_skia::SpreadMode::Pad,
                Transform::identity(),
            )
        }
    }
}
