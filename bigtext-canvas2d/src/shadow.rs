//! Drop shadows.
//!
//! A shadow is drawn by rendering the shape into a scratch layer in the shadow
//! color, blurring that layer, and compositing it under the shape at the
//! shadow offset. As in the HTML canvas, `blur` is twice the standard
//! deviation of the gaussian; the gaussian is approximated with three box
//! blur passes.

use tiny_skia::Pixmap;

/// Shadow parameters, mirroring `shadowColor`, `shadowBlur`,
/// `shadowOffsetX` and `shadowOffsetY`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowState {
    pub color: tiny_skia::Color,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for ShadowState {
    fn default() -> Self {
        // Canvas default: transparent black, no blur, no offset
        Self {
            color: tiny_skia::Color::TRANSPARENT,
            blur: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ShadowState {
    /// A shadow is only drawn when it is not fully transparent and is either
    /// blurred or offset.
    pub fn is_active(&self) -> bool {
        self.color.alpha() > 0.0
            && (self.blur > 0.0 || self.offset_x != 0.0 || self.offset_y != 0.0)
    }
}

const BOX_PASSES: usize = 3;

/// Blur a premultiplied pixmap in place with a gaussian of the given sigma.
pub(crate) fn blur(pixmap: &mut Pixmap, sigma: f32) {
    if !sigma.is_finite() || sigma <= 0.0 {
        return;
    }
    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let mut scratch = vec![0u8; pixmap.data().len()];

    for size in box_sizes(sigma, BOX_PASSES) {
        let radius = (size - 1) / 2;
        if radius == 0 {
            continue;
        }
        box_blur(pixmap.data(), &mut scratch, width, height, radius, true);
        box_blur(&scratch, pixmap.data_mut(), width, height, radius, false);
    }
}

/// Odd box widths whose repeated application approximates a gaussian.
fn box_sizes(sigma: f32, passes: usize) -> Vec<usize> {
    let n = passes as f32;
    let ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut lower = ideal.floor() as usize;
    if lower % 2 == 0 {
        lower = lower.saturating_sub(1).max(1);
    }
    let upper = lower + 2;
    let wl = lower as f32;
    let m = ((12.0 * sigma * sigma - n * wl * wl - 4.0 * n * wl - 3.0 * n) / (-4.0 * wl - 4.0))
        .round()
        .clamp(0.0, n) as usize;
    (0..passes)
        .map(|i| if i < m { lower } else { upper })
        .collect()
}

/// One box blur pass along rows (`horizontal`) or columns.
///
/// Pixels outside the surface count as transparent.
fn box_blur(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize, horizontal: bool) {
    let (lines, len) = if horizontal {
        (height, width)
    } else {
        (width, height)
    };
    let window = (2 * radius + 1) as u32;
    let index = |line: usize, i: usize| {
        if horizontal {
            (line * width + i) * 4
        } else {
            (i * width + line) * 4
        }
    };

    for line in 0..lines {
        for channel in 0..4 {
            let mut sum: u32 = 0;
            for i in 0..=radius.min(len - 1) {
                sum += src[index(line, i) + channel] as u32;
            }
            for i in 0..len {
                dst[index(line, i) + channel] = ((sum + window / 2) / window) as u8;
                let entering = i + radius + 1;
                if entering < len {
                    sum += src[index(line, entering) + channel] as u32;
                }
                if i >= radius {
                    sum -= src[index(line, i - radius) + channel] as u32;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shadow_inactive() {
        assert!(!ShadowState::default().is_active());
    }

    #[test]
    fn test_offset_only_shadow_active() {
        let shadow = ShadowState {
            color: tiny_skia::Color::WHITE,
            offset_x: 4.0,
            offset_y: 4.0,
            ..ShadowState::default()
        };
        assert!(shadow.is_active());
    }

    #[test]
    fn test_box_sizes_are_odd() {
        for sigma in [0.5f32, 1.0, 4.0, 10.0, 25.0] {
            let sizes = box_sizes(sigma, BOX_PASSES);
            assert_eq!(sizes.len(), BOX_PASSES);
            assert!(sizes.iter().all(|s| s % 2 == 1), "{sigma}: {sizes:?}");
        }
    }

    #[test]
    fn test_blur_spreads_and_conserves_opacity_bounds() {
        let mut pixmap = Pixmap::new(21, 21).unwrap();
        let center = (10 * 21 + 10) * 4;
        pixmap.data_mut()[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

        blur(&mut pixmap, 2.0);

        let data = pixmap.data();
        // Center got dimmer, a neighbor picked up coverage
        assert!(data[center + 3] < 255);
        let neighbor = (10 * 21 + 12) * 4;
        assert!(data[neighbor + 3] > 0);
        // Premultiplied invariant: color never exceeds alpha
        for px in data.chunks_exact(4) {
            assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3]);
        }
    }
}
