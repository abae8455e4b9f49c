//! Colors used by styles and requests.

use crate::error::ExportError;
use bigtext_canvas2d::CanvasColor;
use std::fmt;
use std::str::FromStr;

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::hex(0xffffff);
    pub const BLACK: Rgba = Rgba::hex(0x000000);

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// `#rrggbb` ignoring alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS notation: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            self.to_hex()
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_canvas(&self) -> CanvasColor {
        CanvasColor::from_rgba8(
            self.r,
            self.g,
            self.b,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }
}

/// A 6-digit `#rrggbb` color as chosen by a color picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const WHITE: HexColor = HexColor::new(0xff, 0xff, 0xff);
    pub const BLACK: HexColor = HexColor::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> Rgba {
        Rgba::rgba(self.r, self.g, self.b, 1.0)
    }
}

impl FromStr for HexColor {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ExportError::InvalidColor(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<HexColor> for Rgba {
    fn from(color: HexColor) -> Self {
        color.to_rgba()
    }
}
