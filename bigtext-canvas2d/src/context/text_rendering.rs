//! Font state, measurement, and glyph painting.

use super::Canvas2dContext;
use crate::error::Canvas2dResult;
use crate::font_parser::parse_font;
use crate::shadow;
use crate::style::{TextAlign, TextBaseline};
use crate::text::{self, TextMetrics};
use cosmic_text::Command;
use tiny_skia::{Path, PixmapPaint, Transform};

impl Canvas2dContext {
    /// Parse and apply a CSS `font` shorthand such as `bold 60px Arial`.
    pub fn set_font(&mut self, font: &str) -> Canvas2dResult<()> {
        self.state.font = parse_font(font)?;
        Ok(())
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    /// Pixels added after each glyph. Non-finite values are ignored.
    pub fn set_letter_spacing(&mut self, spacing: f32) {
        if spacing.is_finite() {
            self.state.letter_spacing = spacing;
        }
    }

    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        text::measure_text(
            &mut self.font_system,
            text,
            &self.state.font,
            self.state.letter_spacing,
        )
    }

    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::trace!(target: "canvas", "fill_text {:?} at ({}, {})", text, x, y);
        self.paint_text(text, x, y, true);
    }

    /// Outline the glyphs with the stroke style and line width.
    pub fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        log::trace!(target: "canvas", "stroke_text {:?} at ({}, {})", text, x, y);
        self.paint_text(text, x, y, false);
    }

    /// Shadow first, then the glyphs on top.
    fn paint_text(&mut self, text: &str, x: f32, y: f32, fill: bool) {
        let style = if fill {
            self.state.fill_style.clone()
        } else {
            self.state.stroke_style.clone()
        };
        // A transparent paint also casts a transparent shadow
        if !style.is_visible() {
            return;
        }

        let paths = self.glyph_paths(text, x, y);
        if paths.is_empty() {
            return;
        }

        if self.state.shadow.is_active() {
            self.draw_shadow(&paths, fill);
        }

        let stroke = self.current_stroke();
        self.with_paint_from_style(style, |ctx, paint| {
            for path in &paths {
                if fill {
                    ctx.pixmap.fill_path(
                        path,
                        paint,
                        tiny_skia::FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                } else {
                    ctx.pixmap
                        .stroke_path(path, paint, &stroke, Transform::identity(), None);
                }
            }
        });
    }

    /// One path per glyph, in surface coordinates, placed by the current
    /// alignment and baseline. Gradients are evaluated against these same
    /// coordinates.
    fn glyph_paths(&mut self, text: &str, x: f32, y: f32) -> Vec<Path> {
        if !text::can_shape(&self.font_system, text) {
            return Vec::new();
        }
        let font = self.state.font.clone();
        let buffer = text::shape_text(
            &mut self.font_system,
            text,
            &font,
            self.state.letter_spacing,
        );
        let metrics = text::buffer_metrics(&buffer, &font);

        let base_x = x + text::calculate_text_x_offset(metrics.width, self.state.text_align);
        let base_y = y + text::calculate_text_y_offset(
            metrics.font_bounding_box_ascent,
            metrics.font_bounding_box_descent,
            self.state.text_baseline,
        );

        let mut paths = Vec::new();
        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let physical_glyph = glyph.physical((base_x, base_y), 1.0);
                let glyph_x = base_x + glyph.x + glyph.font_size * glyph.x_offset;
                let glyph_y = base_y + glyph.y - glyph.font_size * glyph.y_offset;

                let Some(commands) = self
                    .swash_cache
                    .get_outline_commands(&mut self.font_system, physical_glyph.cache_key)
                else {
                    continue;
                };

                // Font outlines are Y-up, the surface is Y-down
                let mut path_builder = tiny_skia::PathBuilder::new();
                for cmd in commands {
                    match cmd {
                        Command::MoveTo(p) => path_builder.move_to(p.x, -p.y),
                        Command::LineTo(p) => path_builder.line_to(p.x, -p.y),
                        Command::QuadTo(ctrl, end) => {
                            path_builder.quad_to(ctrl.x, -ctrl.y, end.x, -end.y)
                        }
                        Command::CurveTo(c1, c2, end) => {
                            path_builder.cubic_to(c1.x, -c1.y, c2.x, -c2.y, end.x, -end.y)
                        }
                        Command::Close => path_builder.close(),
                    }
                }

                if let Some(path) = path_builder
                    .finish()
                    .and_then(|p| p.transform(Transform::from_translate(glyph_x, glyph_y)))
                {
                    paths.push(path);
                }
            }
        }
        paths
    }

    /// Paint the shadow of `paths` under whatever is drawn next.
    fn draw_shadow(&mut self, paths: &[Path], fill: bool) {
        let shadow_state = self.state.shadow;
        let Some(mut layer) = tiny_skia::Pixmap::new(self.width, self.height) else {
            return;
        };

        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            ..Default::default()
        };
        paint.set_color(shadow_state.color);
        let stroke = self.current_stroke();
        for path in paths {
            if fill {
                layer.fill_path(
                    path,
                    &paint,
                    tiny_skia::FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            } else {
                layer.stroke_path(path, &paint, &stroke, Transform::identity(), None);
            }
        }

        shadow::blur(&mut layer, shadow_state.blur / 2.0);

        self.pixmap.draw_pixmap(
            0,
            0,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::from_translate(shadow_state.offset_x, shadow_state.offset_y),
            None,
        );
    }
}
