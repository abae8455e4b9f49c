//! Turns a [`RenderRequest`] into an [`Artifact`].
//!
//! Export is two-phase. [`RasterExporter::prepare`] validates the request and
//! resolves its style without touching a surface. [`PreparedExport::render`]
//! measures the text, sizes and paints a fresh surface, and encodes it. The
//! async [`RasterExporter::export`] runs the render phase on a blocking worker.

use crate::artifact::{artifact_file_name, Artifact, ArtifactData};
use crate::catalog::{PaintTraits, StyleCatalog};
use crate::error::ExportError;
use crate::print::{print_document, PrintStyle};
use crate::raster::RasterTraits;
use crate::request::{OutputFormat, RenderRequest};
use crate::svg::{svg_document, SvgText};
use bigtext_canvas2d::{Canvas2dContext, FontConfig, RectParams, ResolvedFontConfig};
use std::sync::Arc;

/// Exporter settings.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Padding around the text at 1x, in CSS pixels.
    pub base_padding: f32,
    /// Text block height as a multiple of the font size.
    pub line_height: f32,
    /// JPEG quality, 1 to 100.
    pub jpeg_quality: u8,
    pub font: FontConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            base_padding: 40.0,
            line_height: 1.2,
            jpeg_quality: 90,
            font: FontConfig::default(),
        }
    }
}

/// Geometry of the export surface, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    pub width: u32,
    pub height: u32,
    /// Effective font size.
    pub font_size: f32,
    /// Effective padding on each side.
    pub padding: f32,
}

impl SurfaceLayout {
    /// Size a surface around a text block.
    ///
    /// The block is `measured_width` wide and `font_size * line_height` tall;
    /// empty text is a 0 by 0 block. Padding is added on every side and both
    /// dimensions are rounded up to whole pixels.
    pub fn compute(
        measured_width: f32,
        is_empty: bool,
        font_size: f32,
        padding: f32,
        line_height: f32,
    ) -> Self {
        let (block_width, block_height) = if is_empty {
            (0.0, 0.0)
        } else {
            (
                f64::from(measured_width.max(0.0)),
                f64::from(font_size) * f64::from(line_height),
            )
        };
        let padding_2x = 2.0 * f64::from(padding);
        Self {
            width: device_pixels(block_width + padding_2x),
            height: device_pixels(block_height + padding_2x),
            font_size,
            padding,
        }
    }

    /// Anchor point for centered text.
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// Round up to whole pixels, ignoring float noise, never below 1.
fn device_pixels(value: f64) -> u32 {
    let nearest = value.round();
    let value = if (value - nearest).abs() < 1e-4 {
        nearest
    } else {
        value.ceil()
    };
    value.max(1.0) as u32
}

/// Exports render requests. Cheap to clone; fonts are resolved once in
/// [`RasterExporter::new`] and shared by every export.
#[derive(Debug, Clone)]
pub struct RasterExporter {
    config: Arc<ExportConfig>,
    fonts: Arc<ResolvedFontConfig>,
    catalog: Arc<StyleCatalog>,
}

impl RasterExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self::with_catalog(config, StyleCatalog::default())
    }

    pub fn with_catalog(config: ExportConfig, catalog: StyleCatalog) -> Self {
        let fonts = config.font.resolve();
        log::debug!("export fonts resolved: {} faces", fonts.face_count());
        Self {
            config: Arc::new(config),
            fonts: Arc::new(fonts),
            catalog: Arc::new(catalog),
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    pub fn fonts(&self) -> &ResolvedFontConfig {
        &self.fonts
    }

    /// Validate `request` and resolve its style. Allocates no surface.
    pub fn prepare(&self, request: &RenderRequest) -> Result<PreparedExport, ExportError> {
        if request.point_size == 0 {
            return Err(ExportError::InvalidRequest(
                "point size must be positive".to_string(),
            ));
        }
        if request.scale_factor == 0 {
            return Err(ExportError::InvalidRequest(
                "scale factor must be at least 1".to_string(),
            ));
        }
        if request.font_family.trim().is_empty() {
            return Err(ExportError::InvalidRequest(
                "font family is empty".to_string(),
            ));
        }

        let descriptor = self.catalog.resolve(&request.style_id);
        let traits = descriptor.paint_traits(request.color.to_rgba());
        log::debug!(
            "prepared {} export, style {} (requested {:?})",
            request.output_format,
            descriptor.id,
            request.style_id
        );
        Ok(PreparedExport {
            request: request.clone(),
            traits,
            config: self.config.clone(),
            fonts: self.fonts.clone(),
        })
    }

    /// Prepare and render on a blocking worker.
    pub async fn export(&self, request: &RenderRequest) -> Result<Artifact, ExportError> {
        let prepared = self.prepare(request)?;
        tokio::task::spawn_blocking(move || prepared.render())
            .await
            .map_err(|err| ExportError::Worker(err.to_string()))?
    }

    /// Prepare and render on the current thread.
    pub fn export_blocking(&self, request: &RenderRequest) -> Result<Artifact, ExportError> {
        self.prepare(request)?.render()
    }
}

/// A validated request, ready to render.
#[derive(Debug, Clone)]
pub struct PreparedExport {
    request: RenderRequest,
    traits: PaintTraits,
    config: Arc<ExportConfig>,
    fonts: Arc<ResolvedFontConfig>,
}

impl PreparedExport {
    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    pub fn traits(&self) -> &PaintTraits {
        &self.traits
    }

    fn scale(&self) -> f32 {
        self.request.scale_factor as f32
    }

    fn raster_traits(&self) -> RasterTraits {
        RasterTraits::from_traits(&self.traits, self.scale())
    }

    /// Measure the text and size the surface.
    pub fn layout(&self) -> Result<SurfaceLayout, ExportError> {
        let mut ctx = Canvas2dContext::with_resolved(1, 1, &self.fonts)?;
        self.measure(&mut ctx, &self.raster_traits())
    }

    fn measure(
        &self,
        ctx: &mut Canvas2dContext,
        raster: &RasterTraits,
    ) -> Result<SurfaceLayout, ExportError> {
        let font_size = self.request.point_size as f32 * self.scale();
        let padding = self.config.base_padding * self.scale();
        let text = &self.request.text;

        raster.apply_font(ctx, font_size, &self.request.font_family)?;
        let measured = if text.is_empty() {
            0.0
        } else {
            ctx.measure_text(text).width
        };
        let layout = SurfaceLayout::compute(
            measured,
            text.is_empty(),
            font_size,
            padding,
            self.config.line_height,
        );
        log::debug!(
            "measured {:.1}px wide, surface {}x{}",
            measured,
            layout.width,
            layout.height
        );
        Ok(layout)
    }

    /// Paint the surface. The context is resized to `layout` first.
    fn paint(
        &self,
        ctx: &mut Canvas2dContext,
        raster: &RasterTraits,
        layout: &SurfaceLayout,
    ) -> Result<(), ExportError> {
        ctx.resize(layout.width, layout.height)?;

        if let Some(background) = self.request.background.fill_color() {
            ctx.set_fill_style_color(background.to_rgba().to_canvas());
            ctx.fill_rect(&RectParams::covering(layout.width, layout.height));
        }

        raster.apply(ctx, layout.font_size, &self.request.font_family)?;
        let (x, y) = layout.center();
        raster.draw_text(ctx, &self.request.text, x, y);
        Ok(())
    }

    /// Measure, paint, and encode.
    pub fn render(self) -> Result<Artifact, ExportError> {
        let format = self.request.output_format;
        let (data, layout) = match format {
            OutputFormat::Png | OutputFormat::Jpg => {
                let raster = self.raster_traits();
                let mut ctx = Canvas2dContext::with_resolved(1, 1, &self.fonts)?;
                let layout = self.measure(&mut ctx, &raster)?;
                self.paint(&mut ctx, &raster, &layout)?;
                let bytes = if format == OutputFormat::Png {
                    ctx.to_png()?
                } else {
                    ctx.to_jpeg(self.config.jpeg_quality)?
                };
                (ArtifactData::Bytes(bytes), Some(layout))
            }
            OutputFormat::Svg => {
                let layout = self.layout()?;
                let text = SvgText {
                    text: &self.request.text,
                    font_family: &self.request.font_family,
                    font_size: layout.font_size,
                    font_weight: self.traits.weight,
                    fill: self.traits.plain_fill(),
                };
                let svg = svg_document(&layout, &text, self.request.background.fill_color());
                (ArtifactData::Markup(svg), Some(layout))
            }
            OutputFormat::Pdf => {
                let style = PrintStyle::new(&self.request, &self.traits);
                let document = print_document(&style, &self.request.text);
                (ArtifactData::Markup(document), None)
            }
        };

        let artifact = Artifact {
            format,
            data,
            mime_type: format.mime_type(),
            file_name: artifact_file_name(format),
            layout,
        };
        log::info!(
            "exported {} ({} bytes)",
            artifact.file_name,
            artifact.data.as_bytes().len()
        );
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::BackgroundMode;
    use rstest::rstest;

    fn offline_exporter() -> RasterExporter {
        RasterExporter::new(ExportConfig {
            font: FontConfig {
                load_system_fonts: false,
                ..FontConfig::default()
            },
            ..ExportConfig::default()
        })
    }

    #[test]
    fn test_layout_height_at_1x() {
        let layout = SurfaceLayout::compute(250.4, false, 60.0, 40.0, 1.2);
        assert_eq!(layout.height, 152);
        assert_eq!(layout.width, 331);
        assert_eq!(layout.center(), (165.5, 76.0));
    }

    #[rstest]
    #[case(1, 152)]
    #[case(2, 304)]
    #[case(3, 456)]
    fn test_layout_height_scales(#[case] scale: u32, #[case] height: u32) {
        let s = scale as f32;
        let layout = SurfaceLayout::compute(100.0 * s, false, 60.0 * s, 40.0 * s, 1.2);
        assert_eq!(layout.height, height);
        assert_eq!(layout.width, 180 * scale);
    }

    #[test]
    fn test_layout_of_empty_text_is_padding_only() {
        let layout = SurfaceLayout::compute(0.0, true, 60.0, 40.0, 1.2);
        assert_eq!((layout.width, layout.height), (80, 80));
        let layout = SurfaceLayout::compute(0.0, true, 180.0, 120.0, 1.2);
        assert_eq!((layout.width, layout.height), (240, 240));
    }

    #[test]
    fn test_layout_never_collapses() {
        let layout = SurfaceLayout::compute(0.0, true, 10.0, 0.0, 1.2);
        assert_eq!((layout.width, layout.height), (1, 1));
    }

    #[test]
    fn test_prepare_rejects_invalid_requests() {
        let exporter = offline_exporter();
        let mut request = RenderRequest::new("x", "bold");
        request.point_size = 0;
        assert!(matches!(
            exporter.prepare(&request),
            Err(ExportError::InvalidRequest(_))
        ));

        let mut request = RenderRequest::new("x", "bold");
        request.scale_factor = 0;
        assert!(matches!(
            exporter.prepare(&request),
            Err(ExportError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_prepare_resolves_unknown_style_to_default() {
        let prepared = offline_exporter()
            .prepare(&RenderRequest::new("x", "nonexistent-style"))
            .unwrap();
        assert_eq!(prepared.traits().shadow, None);
        assert_eq!(prepared.traits().stroke, None);
        assert_eq!(prepared.traits().plain_fill(), prepared.request().color.to_rgba());
    }

    #[test]
    fn test_render_empty_png() {
        let mut request = RenderRequest::new("", "shadow");
        request.background = BackgroundMode::White;
        let artifact = offline_exporter().export_blocking(&request).unwrap();
        assert_eq!(artifact.mime_type, "image/png");
        assert!(artifact.file_name.ends_with(".png"));
        let layout = artifact.layout.unwrap();
        assert_eq!((layout.width, layout.height), (80, 80));

        let image = image::load_from_memory(artifact.data.as_bytes())
            .unwrap()
            .to_rgba8();
        assert_eq!(image.dimensions(), (80, 80));
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_render_print_document() {
        let request = RenderRequest::new("hi", "gradient").with_format(OutputFormat::Pdf);
        let artifact = offline_exporter().export_blocking(&request).unwrap();
        assert_eq!(artifact.mime_type, "text/html");
        assert!(artifact.file_name.ends_with(".html"));
        assert!(artifact.layout.is_none());
        let doc = artifact.data.as_markup().unwrap();
        assert!(doc.contains("color: #ff6b6b;"));
    }

    #[tokio::test]
    async fn test_async_export() {
        let request = RenderRequest::new("", "neon").with_format(OutputFormat::Jpg);
        let artifact = offline_exporter().export(&request).await.unwrap();
        assert_eq!(artifact.mime_type, "image/jpeg");
        assert_eq!(&artifact.data.as_bytes()[..2], &[0xff, 0xd8]);
    }
}
