//! Reading pixels back and encoding the surface.

use super::Canvas2dContext;
use crate::error::Canvas2dResult;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

/// Density written into PNG `pHYs`, matching a browser's 96 dpi canvas.
const PNG_DPI: f32 = 96.0;

impl Canvas2dContext {
    /// The whole surface as row-major, straight-alpha RGBA bytes.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    pub fn to_png(&self) -> Canvas2dResult<Vec<u8>> {
        let mut buf = Vec::new();
        let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let per_meter = (PNG_DPI / 0.0254).round() as u32;
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: per_meter,
            yppu: per_meter,
            unit: png::Unit::Meter,
        }));
        encoder
            .write_header()?
            .write_image_data(&self.rgba_pixels())?;
        log::debug!(target: "canvas", "png: {} bytes", buf.len());
        Ok(buf)
    }

    /// JPEG at `quality` (clamped to 1..=100). Without an alpha channel,
    /// uncovered pixels come out black.
    pub fn to_jpeg(&self, quality: u8) -> Canvas2dResult<Vec<u8>> {
        // Premultiplied color is the surface composited over black
        let rgb: Vec<u8> = self
            .pixmap
            .data()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100)).encode(
            &rgb,
            self.width,
            self.height,
            ExtendedColorType::Rgb8,
        )?;
        log::debug!(target: "canvas", "jpeg q{}: {} bytes", quality, buf.len());
        Ok(buf)
    }
}
