//! The style catalog.
//!
//! Every named style is a [`StyleDescriptor`] whose [`StyleKind`] carries its
//! paint payload. [`StyleDescriptor::paint_traits`] turns that payload plus the
//! user's color into one [`PaintTraits`] record. The preview and raster
//! renderers both start from that record.

use crate::color::Rgba;
use crate::error::StyleError;
use std::borrow::Cow;

/// Where a style takes a color from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSource {
    /// The user's color picker.
    User,
    Fixed(Rgba),
}

impl ColorSource {
    pub fn resolve(&self, user: Rgba) -> Rgba {
        match self {
            ColorSource::User => user,
            ColorSource::Fixed(color) => *color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSpec {
    pub color: ColorSource,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSpec {
    pub color: ColorSource,
    pub width: f32,
}

/// One stop of a multi-color fill. `offset` is in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_css(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// The closed set of style families with their paint payload.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleKind {
    /// Solid user color, optional weight and tracking.
    Plain {
        weight: FontWeight,
        letter_spacing: f32,
    },
    /// A fill plus a colored, usually blurred, shadow.
    Depth {
        fill: ColorSource,
        shadow: ShadowSpec,
    },
    /// No fill, stroke only.
    Outline { stroke: StrokeSpec },
    /// Horizontal gradient across the whole render target. Ignores the user color.
    MultiColor { stops: &'static [ColorStop] },
    /// Fixed designer colors. Ignores the user color.
    Decorative {
        fill: Option<Rgba>,
        stroke: Option<StrokeSpec>,
        shadow: ShadowSpec,
    },
}

impl StyleKind {
    pub fn family(&self) -> &'static str {
        match self {
            StyleKind::Plain { .. } => "plain",
            StyleKind::Depth { .. } => "depth",
            StyleKind::Outline { .. } => "outline",
            StyleKind::MultiColor { .. } => "multi-color",
            StyleKind::Decorative { .. } => "decorative",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub kind: StyleKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    None,
    Solid(Rgba),
    Gradient(&'static [ColorStop]),
}

impl Fill {
    pub fn is_gradient(&self) -> bool {
        matches!(self, Fill::Gradient(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// The canonical paint record of a style, with the user color already applied.
///
/// Sizes are in CSS pixels at 1x. Renderers scale them as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintTraits {
    pub fill: Fill,
    pub stroke: Option<Stroke>,
    pub shadow: Option<Shadow>,
    pub weight: FontWeight,
    pub letter_spacing: f32,
}

impl PaintTraits {
    /// A single color standing in for this paint where only a solid fill can
    /// be expressed: the solid fill, else the first gradient stop, else the
    /// stroke color, else black.
    pub fn plain_fill(&self) -> Rgba {
        match &self.fill {
            Fill::Solid(color) => *color,
            Fill::Gradient(stops) => stops.first().map(|s| s.color).unwrap_or(Rgba::BLACK),
            Fill::None => self.stroke.map(|s| s.color).unwrap_or(Rgba::BLACK),
        }
    }
}

impl ShadowSpec {
    fn resolve(&self, user: Rgba) -> Shadow {
        Shadow {
            color: self.color.resolve(user),
            blur: self.blur,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
        }
    }
}

impl StrokeSpec {
    fn resolve(&self, user: Rgba) -> Stroke {
        Stroke {
            color: self.color.resolve(user),
            width: self.width,
        }
    }
}

impl StyleDescriptor {
    pub fn paint_traits(&self, user_color: Rgba) -> PaintTraits {
        let plain = PaintTraits {
            fill: Fill::Solid(user_color),
            stroke: None,
            shadow: None,
            weight: FontWeight::Normal,
            letter_spacing: 0.0,
        };
        match &self.kind {
            StyleKind::Plain {
                weight,
                letter_spacing,
            } => PaintTraits {
                weight: *weight,
                letter_spacing: *letter_spacing,
                ..plain
            },
            StyleKind::Depth { fill, shadow } => PaintTraits {
                fill: Fill::Solid(fill.resolve(user_color)),
                shadow: Some(shadow.resolve(user_color)),
                ..plain
            },
            StyleKind::Outline { stroke } => PaintTraits {
                fill: Fill::None,
                stroke: Some(stroke.resolve(user_color)),
                ..plain
            },
            StyleKind::MultiColor { stops } => PaintTraits {
                fill: Fill::Gradient(stops),
                ..plain
            },
            StyleKind::Decorative {
                fill,
                stroke,
                shadow,
            } => PaintTraits {
                fill: fill.map(Fill::Solid).unwrap_or(Fill::None),
                stroke: stroke.map(|s| s.resolve(user_color)),
                shadow: Some(shadow.resolve(user_color)),
                ..plain
            },
        }
    }

    /// Whether the user's color can change how this style renders.
    pub fn accepts_user_color(&self) -> bool {
        let user = |source: &ColorSource| matches!(source, ColorSource::User);
        match &self.kind {
            StyleKind::Plain { .. } => true,
            StyleKind::Depth { fill, shadow } => user(fill) || user(&shadow.color),
            StyleKind::Outline { stroke } => user(&stroke.color),
            StyleKind::MultiColor { .. } => false,
            StyleKind::Decorative { stroke, shadow, .. } => {
                stroke.is_some_and(|s| user(&s.color)) || user(&shadow.color)
            }
        }
    }
}

const fn depth(fill: ColorSource, shadow: Rgba, blur: f32, dx: f32, dy: f32) -> StyleKind {
    StyleKind::Depth {
        fill,
        shadow: ShadowSpec {
            color: ColorSource::Fixed(shadow),
            blur,
            offset_x: dx,
            offset_y: dy,
        },
    }
}

const fn glow(fill: Rgba, blur: f32) -> StyleKind {
    StyleKind::Depth {
        fill: ColorSource::Fixed(fill),
        shadow: ShadowSpec {
            color: ColorSource::User,
            blur,
            offset_x: 0.0,
            offset_y: 0.0,
        },
    }
}

const fn decorative(fill: Rgba, shadow: Rgba, blur: f32, dx: f32, dy: f32) -> StyleKind {
    StyleKind::Decorative {
        fill: Some(fill),
        stroke: None,
        shadow: ShadowSpec {
            color: ColorSource::Fixed(shadow),
            blur,
            offset_x: dx,
            offset_y: dy,
        },
    }
}

const fn stop(offset: f32, rgb: u32) -> ColorStop {
    ColorStop {
        offset,
        color: Rgba::hex(rgb),
    }
}

const GRADIENT_STOPS: &[ColorStop] = &[
    stop(0.0, 0xff6b6b),
    stop(0.2, 0x4ecdc4),
    stop(0.4, 0x45b7d1),
    stop(0.6, 0x96ceb4),
    stop(0.8, 0xfeca57),
    stop(1.0, 0xff6b6b),
];

const RAINBOW_STOPS: &[ColorStop] = &[
    stop(0.0, 0xff0000),
    stop(0.16, 0xff7f00),
    stop(0.33, 0xffff00),
    stop(0.5, 0x00ff00),
    stop(0.66, 0x0000ff),
    stop(0.83, 0x4b0082),
    stop(1.0, 0x9400d3),
];

/// Returned by [`StyleCatalog::resolve`] for unknown ids.
pub static DEFAULT_STYLE: StyleDescriptor = StyleDescriptor {
    id: "default",
    display_name: "Default",
    kind: StyleKind::Plain {
        weight: FontWeight::Normal,
        letter_spacing: 0.0,
    },
};

static BUILTIN_STYLES: &[StyleDescriptor] = &[
    StyleDescriptor {
        id: "normal",
        display_name: "Normal",
        kind: StyleKind::Plain {
            weight: FontWeight::Normal,
            letter_spacing: 0.0,
        },
    },
    StyleDescriptor {
        id: "bold",
        display_name: "Bold",
        kind: StyleKind::Plain {
            weight: FontWeight::Bold,
            letter_spacing: 2.0,
        },
    },
    StyleDescriptor {
        id: "shadow",
        display_name: "Shadow",
        kind: depth(ColorSource::User, Rgba::rgba(0, 0, 0, 0.3), 8.0, 4.0, 4.0),
    },
    StyleDescriptor {
        id: "neon",
        display_name: "Neon",
        kind: glow(Rgba::WHITE, 20.0),
    },
    StyleDescriptor {
        id: "bubble",
        display_name: "Bubble",
        kind: glow(Rgba::WHITE, 15.0),
    },
    StyleDescriptor {
        id: "fire",
        display_name: "Fire",
        kind: depth(
            ColorSource::Fixed(Rgba::hex(0xff4500)),
            Rgba::hex(0xff6500),
            10.0,
            0.0,
            0.0,
        ),
    },
    StyleDescriptor {
        id: "ice",
        display_name: "Ice",
        kind: depth(
            ColorSource::Fixed(Rgba::hex(0x87ceeb)),
            Rgba::hex(0xb0e0e6),
            15.0,
            0.0,
            0.0,
        ),
    },
    StyleDescriptor {
        id: "outline",
        display_name: "Outline",
        kind: StyleKind::Outline {
            stroke: StrokeSpec {
                color: ColorSource::User,
                width: 3.0,
            },
        },
    },
    StyleDescriptor {
        id: "gradient",
        display_name: "Gradient",
        kind: StyleKind::MultiColor {
            stops: GRADIENT_STOPS,
        },
    },
    StyleDescriptor {
        id: "rainbow",
        display_name: "Rainbow",
        kind: StyleKind::MultiColor {
            stops: RAINBOW_STOPS,
        },
    },
    StyleDescriptor {
        id: "gothic-reverie",
        display_name: "Gothic Reverie",
        kind: decorative(Rgba::hex(0x6b46c1), Rgba::hex(0x4c1d95), 5.0, 2.0, 2.0),
    },
    StyleDescriptor {
        id: "gentle-calligraphy",
        display_name: "Gentle Calligraphy",
        kind: decorative(
            Rgba::hex(0x7c3aed),
            Rgba::rgba(124, 58, 237, 0.5),
            3.0,
            1.0,
            1.0,
        ),
    },
    StyleDescriptor {
        id: "gothic-intrigue",
        display_name: "Gothic Intrigue",
        kind: decorative(Rgba::hex(0x1f2937), Rgba::BLACK, 8.0, 3.0, 3.0),
    },
    StyleDescriptor {
        id: "monospace-elegance",
        display_name: "Monospace Elegance",
        kind: decorative(
            Rgba::hex(0x374151),
            Rgba::rgba(55, 65, 81, 0.3),
            2.0,
            1.0,
            1.0,
        ),
    },
    StyleDescriptor {
        id: "modern-blockade",
        display_name: "Modern Blockade",
        kind: decorative(Rgba::BLACK, Rgba::WHITE, 0.0, 4.0, 4.0),
    },
    StyleDescriptor {
        id: "urban-square",
        display_name: "Urban Square",
        kind: StyleKind::Decorative {
            fill: None,
            stroke: Some(StrokeSpec {
                color: ColorSource::Fixed(Rgba::BLACK),
                width: 3.0,
            }),
            shadow: ShadowSpec {
                color: ColorSource::Fixed(Rgba::WHITE),
                blur: 0.0,
                offset_x: 6.0,
                offset_y: 6.0,
            },
        },
    },
    StyleDescriptor {
        id: "modern-clarity",
        display_name: "Modern Clarity",
        kind: decorative(
            Rgba::hex(0x374151),
            Rgba::rgba(55, 65, 81, 0.2),
            2.0,
            1.0,
            1.0,
        ),
    },
    StyleDescriptor {
        id: "vintage-script",
        display_name: "Vintage Script",
        kind: decorative(
            Rgba::hex(0x92400e),
            Rgba::rgba(146, 64, 14, 0.4),
            4.0,
            2.0,
            2.0,
        ),
    },
    StyleDescriptor {
        id: "symbolic-essence",
        display_name: "Symbolic Essence",
        kind: decorative(
            Rgba::hex(0x0f766e),
            Rgba::rgba(15, 118, 110, 0.35),
            3.0,
            1.0,
            1.0,
        ),
    },
];

/// Ids visited by style cycling, in order.
const BASIC_CYCLE: &[&str] = &[
    "normal", "bold", "shadow", "outline", "neon", "gradient", "rainbow", "bubble", "fire", "ice",
];

static BUILTIN: StyleCatalog = StyleCatalog {
    entries: Cow::Borrowed(BUILTIN_STYLES),
};

/// Read-only registry of styles.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    entries: Cow<'static, [StyleDescriptor]>,
}

impl Default for StyleCatalog {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl StyleCatalog {
    /// The built-in catalog.
    pub fn builtin() -> &'static StyleCatalog {
        &BUILTIN
    }

    /// A new catalog with `extra` appended. Existing entries are never replaced.
    pub fn extended(&self, extra: Vec<StyleDescriptor>) -> Result<StyleCatalog, StyleError> {
        let mut entries = self.entries.to_vec();
        for descriptor in extra {
            if descriptor.id == DEFAULT_STYLE.id
                || entries.iter().any(|d| d.id == descriptor.id)
            {
                return Err(StyleError::DuplicateId(descriptor.id.to_string()));
            }
            entries.push(descriptor);
        }
        Ok(StyleCatalog {
            entries: Cow::Owned(entries),
        })
    }

    pub fn get(&self, id: &str) -> Option<&StyleDescriptor> {
        self.entries.iter().find(|d| d.id == id)
    }

    /// Look up a style, falling back to [`DEFAULT_STYLE`]. Never fails.
    pub fn resolve(&self, id: &str) -> &StyleDescriptor {
        self.get(id).unwrap_or_else(|| {
            log::debug!("unknown style {:?}, using default", id);
            &DEFAULT_STYLE
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn basic_cycle(&self) -> &'static [&'static str] {
        BASIC_CYCLE
    }
}
