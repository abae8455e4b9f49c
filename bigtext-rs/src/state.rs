//! The editor's current settings.

use crate::catalog::{StyleCatalog, StyleDescriptor};
use crate::color::HexColor;
use crate::notify::Notifier;
use crate::preferences::Preferences;
use crate::preview::{Animation, PreviewTraits};
use crate::request::{ExportOptions, OutputFormat, RenderRequest};

/// Shown in the preview while the text input is empty.
pub const PLACEHOLDER_TEXT: &str = "Hello World";

const DEFAULT_STYLE_ID: &str = "bold";
const DEFAULT_FONT_SIZE: u32 = 60;
const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";
const DEFAULT_TEXT_COLOR: HexColor = HexColor::new(0x3b, 0x82, 0xf6);

/// Everything the user has picked. Exactly one style is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub text: String,
    pub font_size: u32,
    pub font_family: String,
    pub text_color: HexColor,
    style_id: String,
    pub animation: Animation,
    pub export: ExportOptions,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            text_color: DEFAULT_TEXT_COLOR,
            style_id: DEFAULT_STYLE_ID.to_string(),
            animation: Animation::None,
            export: ExportOptions::default(),
        }
    }
}

impl UiState {
    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    /// Activate `id`. Unknown ids leave the current style active.
    pub fn set_style(&mut self, id: &str, catalog: &StyleCatalog) -> bool {
        if !catalog.contains(id) {
            log::debug!("ignoring unknown style {:?}", id);
            return false;
        }
        self.style_id = id.to_string();
        true
    }

    /// Move to the next basic style and announce it. A decorative style
    /// moves to the first.
    pub fn cycle_style(&mut self, catalog: &StyleCatalog, notifier: &dyn Notifier) -> &str {
        let cycle = catalog.basic_cycle();
        let next = cycle
            .iter()
            .position(|id| *id == self.style_id)
            .map_or(0, |i| (i + 1) % cycle.len());
        if let Some(id) = cycle.get(next) {
            self.style_id = id.to_string();
        }
        notifier.info(&format!(
            "Switched to {} style",
            self.active_style(catalog).display_name
        ));
        &self.style_id
    }

    pub fn active_style<'c>(&self, catalog: &'c StyleCatalog) -> &'c StyleDescriptor {
        catalog.resolve(&self.style_id)
    }

    /// The text as shown: the input, or a placeholder while it is empty.
    pub fn preview_text(&self) -> &str {
        if self.text.is_empty() {
            PLACEHOLDER_TEXT
        } else {
            &self.text
        }
    }

    pub fn preview(&self, catalog: &StyleCatalog) -> PreviewTraits {
        PreviewTraits::for_style(
            self.active_style(catalog),
            self.text_color.to_rgba(),
            self.animation,
        )
    }

    /// A request exporting exactly what the preview shows.
    pub fn render_request(&self, format: OutputFormat) -> RenderRequest {
        RenderRequest {
            text: self.preview_text().to_string(),
            font_family: self.font_family.clone(),
            point_size: self.font_size,
            color: self.text_color,
            style_id: self.style_id.clone(),
            output_format: format,
            scale_factor: self.export.scale_factor,
            background: self.export.background,
        }
    }

    pub fn to_preferences(&self) -> Preferences {
        Preferences {
            text: self.text.clone(),
            font_size: self.font_size,
            style: self.style_id.clone(),
            font_family: self.font_family.clone(),
            text_color: self.text_color.to_string(),
            animation: self.animation.to_string(),
        }
    }

    /// Apply a saved record. Empty or unusable values fall back to defaults.
    /// Export options are not part of the record and stay as they are.
    pub fn apply_preferences(&mut self, preferences: &Preferences, catalog: &StyleCatalog) {
        self.text = preferences.text.clone();
        self.font_size = match preferences.font_size {
            0 => DEFAULT_FONT_SIZE,
            size => size,
        };
        self.font_family = if preferences.font_family.is_empty() {
            DEFAULT_FONT_FAMILY.to_string()
        } else {
            preferences.font_family.clone()
        };
        self.text_color = preferences
            .text_color
            .parse()
            .unwrap_or(DEFAULT_TEXT_COLOR);
        self.animation = preferences.animation.parse().unwrap_or_default();

        let style = if preferences.style.is_empty() {
            DEFAULT_STYLE_ID
        } else {
            preferences.style.as_str()
        };
        if !self.set_style(style, catalog) {
            self.style_id = DEFAULT_STYLE_ID.to_string();
        }
    }

    /// Back to defaults, keeping export options.
    pub fn reset(&mut self) {
        *self = Self {
            export: self.export,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::RecordingNotifier;
    use crate::notify::NotificationLevel;
    use crate::request::BackgroundMode;

    #[test]
    fn test_defaults() {
        let state = UiState::default();
        assert_eq!(state.style_id(), "bold");
        assert_eq!(state.text_color.to_string(), "#3b82f6");
        assert_eq!(state.preview_text(), "Hello World");
        assert_eq!(state.export.scale_factor, 1);
    }

    #[test]
    fn test_unknown_style_keeps_previous() {
        let catalog = StyleCatalog::builtin();
        let mut state = UiState::default();
        assert!(state.set_style("fire", catalog));
        assert!(!state.set_style("nonexistent-style", catalog));
        assert_eq!(state.style_id(), "fire");
    }

    #[test]
    fn test_cycle_style() {
        let catalog = StyleCatalog::builtin();
        let notifier = RecordingNotifier::default();
        let mut state = UiState::default();
        assert_eq!(state.cycle_style(catalog, &notifier), "shadow");
        state.set_style("ice", catalog);
        assert_eq!(state.cycle_style(catalog, &notifier), "normal");
        state.set_style("gothic-reverie", catalog);
        assert_eq!(state.cycle_style(catalog, &notifier), "normal");
    }

    #[test]
    fn test_cycle_style_announces_display_name() {
        let catalog = StyleCatalog::builtin();
        let notifier = RecordingNotifier::default();
        let mut state = UiState::default();
        state.set_style("outline", catalog);
        state.cycle_style(catalog, &notifier);

        let last = notifier.last().unwrap();
        assert_eq!(last.level, NotificationLevel::Info);
        assert_eq!(
            last.message,
            format!("Switched to {} style", catalog.resolve("neon").display_name)
        );
        assert_eq!(notifier.seen.borrow().len(), 1);
    }

    #[test]
    fn test_preview_follows_active_style() {
        let catalog = StyleCatalog::builtin();
        let mut state = UiState::default();
        state.set_style("shadow", catalog);
        state.animation = Animation::Pulse;
        let preview = state.preview(catalog);
        assert!(preview.classes.contains(&"shadow".to_string()));
        assert!(preview.classes.contains(&"animate-pulse".to_string()));

        state.set_style("normal", catalog);
        assert_eq!(state.preview(catalog).declaration("text-shadow"), Some("none"));
    }

    #[test]
    fn test_render_request_uses_preview_text() {
        let mut state = UiState::default();
        state.export.scale_factor = 2;
        state.export.background = BackgroundMode::White;
        let request = state.render_request(OutputFormat::Svg);
        assert_eq!(request.text, "Hello World");
        assert_eq!(request.style_id, "bold");
        assert_eq!(request.scale_factor, 2);
        assert_eq!(request.background, BackgroundMode::White);
        assert_eq!(request.output_format, OutputFormat::Svg);
    }

    #[test]
    fn test_apply_preferences_falls_back() {
        let catalog = StyleCatalog::builtin();
        let mut state = UiState::default();
        let prefs = Preferences {
            text: "HELLO".to_string(),
            font_size: 0,
            style: "no-such-style".to_string(),
            font_family: String::new(),
            text_color: "blue".to_string(),
            animation: "spin".to_string(),
        };
        state.apply_preferences(&prefs, catalog);
        assert_eq!(state.text, "HELLO");
        assert_eq!(state.font_size, 60);
        assert_eq!(state.style_id(), "bold");
        assert_eq!(state.font_family, "Arial, sans-serif");
        assert_eq!(state.text_color, DEFAULT_TEXT_COLOR);
        assert_eq!(state.animation, Animation::None);
    }

    #[test]
    fn test_preferences_round_trip_through_state() {
        let catalog = StyleCatalog::builtin();
        let mut state = UiState {
            text: "abc".to_string(),
            font_size: 88,
            font_family: "Georgia, serif".to_string(),
            text_color: HexColor::new(1, 2, 3),
            animation: Animation::Glow,
            ..UiState::default()
        };
        state.set_style("rainbow", catalog);

        let mut restored = UiState::default();
        restored.apply_preferences(&state.to_preferences(), catalog);
        assert_eq!(restored, state);
    }

    #[test]
    fn test_reset_keeps_export_options() {
        let mut state = UiState {
            text: "x".to_string(),
            ..UiState::default()
        };
        state.export.scale_factor = 3;
        state.reset();
        assert_eq!(state.text, "");
        assert_eq!(state.export.scale_factor, 3);
    }
}
