//! CSS rendering of a style for the live preview.

use crate::catalog::{Fill, PaintTraits, StyleDescriptor};
use crate::color::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class always present on the preview element.
pub const PREVIEW_CLASS: &str = "preview-text";

/// Looping CSS animation toggled on the preview by class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    #[default]
    None,
    Bounce,
    Pulse,
    Shake,
    Wiggle,
    Glow,
    Float,
    Slide,
    Zoom,
    Rotate,
}

impl Animation {
    pub const ALL: [Animation; 10] = [
        Animation::None,
        Animation::Bounce,
        Animation::Pulse,
        Animation::Shake,
        Animation::Wiggle,
        Animation::Glow,
        Animation::Float,
        Animation::Slide,
        Animation::Zoom,
        Animation::Rotate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Animation::None => "none",
            Animation::Bounce => "bounce",
            Animation::Pulse => "pulse",
            Animation::Shake => "shake",
            Animation::Wiggle => "wiggle",
            Animation::Glow => "glow",
            Animation::Float => "float",
            Animation::Slide => "slide",
            Animation::Zoom => "zoom",
            Animation::Rotate => "rotate",
        }
    }

    /// `animate-<name>`, or `None` for no animation.
    pub fn css_class(&self) -> Option<String> {
        match self {
            Animation::None => None,
            other => Some(format!("animate-{}", other.as_str())),
        }
    }
}

impl FromStr for Animation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Animation::ALL
            .iter()
            .find(|a| a.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown animation: {s}"))
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSS classes and inline declarations for the preview element.
///
/// Every paint property is always declared, with a neutral value when the
/// style does not use it, so applying a new `PreviewTraits` overwrites all of
/// the previous style's paint.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTraits {
    pub classes: Vec<String>,
    pub declarations: Vec<(&'static str, String)>,
}

impl PreviewTraits {
    pub fn from_traits(traits: &PaintTraits) -> Self {
        let color = match &traits.fill {
            Fill::Solid(color) => color.to_css(),
            Fill::None | Fill::Gradient(_) => "transparent".to_string(),
        };
        let (background_image, background_clip) = match &traits.fill {
            Fill::Gradient(stops) => {
                let stops = stops
                    .iter()
                    .map(|s| format!("{} {}%", s.color.to_css(), (s.offset * 100.0).round()))
                    .collect::<Vec<_>>()
                    .join(", ");
                (format!("linear-gradient(90deg, {stops})"), "text")
            }
            _ => ("none".to_string(), "border-box"),
        };
        let text_stroke = traits
            .stroke
            .map(|s| format!("{}px {}", s.width, s.color.to_css()))
            .unwrap_or_else(|| "0".to_string());
        let text_shadow = traits
            .shadow
            .map(|s| {
                format!(
                    "{}px {}px {}px {}",
                    s.offset_x,
                    s.offset_y,
                    s.blur,
                    s.color.to_css()
                )
            })
            .unwrap_or_else(|| "none".to_string());
        let letter_spacing = if traits.letter_spacing == 0.0 {
            "normal".to_string()
        } else {
            format!("{}px", traits.letter_spacing)
        };

        Self {
            classes: vec![PREVIEW_CLASS.to_string()],
            declarations: vec![
                ("color", color),
                ("background-image", background_image),
                ("-webkit-background-clip", background_clip.to_string()),
                ("background-clip", background_clip.to_string()),
                ("-webkit-text-stroke", text_stroke),
                ("text-shadow", text_shadow),
                ("font-weight", traits.weight.as_css().to_string()),
                ("letter-spacing", letter_spacing),
            ],
        }
    }

    /// Preview of `descriptor` with the style and animation classes added.
    pub fn for_style(descriptor: &StyleDescriptor, user_color: Rgba, animation: Animation) -> Self {
        let mut preview = Self::from_traits(&descriptor.paint_traits(user_color));
        preview.classes.push(descriptor.id.to_string());
        preview.classes.extend(animation.css_class());
        preview
    }

    pub fn declaration(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Declarations as an inline `style` attribute value.
    pub fn to_css(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }
}
