//! Saved user preferences.
//!
//! The record is a flat JSON object stored under [`PREFERENCES_KEY`]. It has
//! no version field. Each field is read on its own: a missing, `null`, or
//! mistyped value takes that field's default, and unknown fields are ignored.

use crate::catalog::StyleCatalog;
use crate::error::CollaboratorError;
use crate::notify::Notifier;
use crate::state::UiState;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const PREFERENCES_KEY: &str = "bigTextGenerator_preferences";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub text: String,
    pub font_size: u32,
    pub style: String,
    pub font_family: String,
    pub text_color: String,
    pub animation: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 60,
            style: "bold".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            text_color: "#3b82f6".to_string(),
            animation: "none".to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for Preferences {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let defaults = Preferences::default();
        let string = |key: &str, fallback: String| match fields.get(key) {
            Some(Value::String(value)) => value.clone(),
            _ => fallback,
        };
        let font_size = match fields.get("fontSize") {
            Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
        .filter(|size| *size > 0)
        .unwrap_or(defaults.font_size);

        Ok(Self {
            text: string("text", defaults.text),
            font_size,
            style: string("style", defaults.style),
            font_family: string("fontFamily", defaults.font_family),
            text_color: string("textColor", defaults.text_color),
            animation: string("animation", defaults.animation),
        })
    }
}

/// Key-value persistence for [`Preferences`].
pub trait PreferenceStore {
    /// The saved record, or `None` if nothing was saved.
    fn load(&self) -> Result<Option<Preferences>, CollaboratorError>;
    fn save(&mut self, preferences: &Preferences) -> Result<(), CollaboratorError>;
    fn clear(&mut self) -> Result<(), CollaboratorError>;
}

/// In-memory store holding serialized values, like browser local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, if any.
    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: impl Into<String>) {
        self.items.insert(key.to_string(), value.into());
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Option<Preferences>, CollaboratorError> {
        self.get_item(PREFERENCES_KEY)
            .map(|raw| serde_json::from_str(raw).map_err(CollaboratorError::from))
            .transpose()
    }

    fn save(&mut self, preferences: &Preferences) -> Result<(), CollaboratorError> {
        let raw = serde_json::to_string(preferences)?;
        self.set_item(PREFERENCES_KEY, raw);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), CollaboratorError> {
        self.items.remove(PREFERENCES_KEY);
        Ok(())
    }
}

/// A JSON file holding a key-value object. Preferences live under
/// [`PREFERENCES_KEY`]; other keys in the file are preserved.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, CollaboratorError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Map::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, items: &Map<String, Value>) -> Result<(), CollaboratorError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self) -> Result<Option<Preferences>, CollaboratorError> {
        let mut items = self.read_all()?;
        items
            .remove(PREFERENCES_KEY)
            .map(|value| serde_json::from_value(value).map_err(CollaboratorError::from))
            .transpose()
    }

    fn save(&mut self, preferences: &Preferences) -> Result<(), CollaboratorError> {
        let mut items = self.read_all()?;
        items.insert(PREFERENCES_KEY.to_string(), serde_json::to_value(preferences)?);
        self.write_all(&items)?;
        log::debug!("preferences saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), CollaboratorError> {
        let mut items = self.read_all()?;
        if items.remove(PREFERENCES_KEY).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// Save the current settings and report the result.
pub fn save_preferences(
    state: &UiState,
    store: &mut dyn PreferenceStore,
    notifier: &dyn Notifier,
) -> bool {
    match store.save(&state.to_preferences()) {
        Ok(()) => {
            notifier.success("Preferences saved successfully!");
            true
        }
        Err(err) => {
            log::error!("saving preferences failed: {}", err);
            notifier.error("Failed to save preferences");
            false
        }
    }
}

/// Apply saved settings to `state` and report the result.
///
/// `state` is left unchanged when nothing was saved or loading fails.
pub fn load_preferences(
    state: &mut UiState,
    store: &dyn PreferenceStore,
    catalog: &StyleCatalog,
    notifier: &dyn Notifier,
) -> bool {
    match store.load() {
        Ok(Some(preferences)) => {
            state.apply_preferences(&preferences, catalog);
            notifier.success("Preferences loaded successfully!");
            true
        }
        Ok(None) => {
            notifier.warning("No saved preferences found");
            false
        }
        Err(err) => {
            log::error!("loading preferences failed: {}", err);
            notifier.error("Failed to load preferences");
            false
        }
    }
}

/// Return `state` to defaults and forget saved settings.
pub fn reset_preferences(
    state: &mut UiState,
    store: &mut dyn PreferenceStore,
    notifier: &dyn Notifier,
) -> bool {
    state.reset();
    match store.clear() {
        Ok(()) => {
            notifier.success("Settings reset to default!");
            true
        }
        Err(err) => {
            log::error!("clearing preferences failed: {}", err);
            notifier.error("Failed to reset preferences");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::RecordingNotifier;
    use crate::notify::NotificationLevel;

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(Preferences::default()).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["animation", "fontFamily", "fontSize", "style", "text", "textColor"]
        );
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"text": "hi", "extra": true}"#).unwrap();
        assert_eq!(prefs.text, "hi");
        assert_eq!(prefs.font_size, 60);
        assert_eq!(prefs.style, "bold");
    }

    #[test]
    fn test_null_and_mistyped_fields_fall_back_per_field() {
        let prefs: Preferences = serde_json::from_str(
            r##"{"text": null, "fontSize": "72", "style": 5, "fontFamily": "Georgia, serif", "textColor": ["#ff0000"], "animation": "pulse"}"##,
        )
        .unwrap();
        assert_eq!(prefs.text, "");
        assert_eq!(prefs.font_size, 72);
        assert_eq!(prefs.style, "bold");
        assert_eq!(prefs.font_family, "Georgia, serif");
        assert_eq!(prefs.text_color, "#3b82f6");
        assert_eq!(prefs.animation, "pulse");

        for size in [r#""big""#, "-4", "0", "1.5", "null", "99999999999"] {
            let prefs: Preferences =
                serde_json::from_str(&format!(r#"{{"fontSize": {size}}}"#)).unwrap();
            assert_eq!(prefs.font_size, 60, "fontSize {size}");
        }
    }

    #[test]
    fn test_non_object_record_is_an_error() {
        assert!(serde_json::from_str::<Preferences>("[1, 2]").is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        let prefs = Preferences {
            text: "saved".to_string(),
            ..Preferences::default()
        };
        store.save(&prefs).unwrap();
        assert!(store.get_item(PREFERENCES_KEY).unwrap().contains(r#""fontSize":60"#));
        assert_eq!(store.load().unwrap(), Some(prefs));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_value_is_an_error() {
        let mut store = MemoryStore::new();
        store.set_item(PREFERENCES_KEY, "{not json");
        assert!(matches!(store.load(), Err(CollaboratorError::Json(_))));
    }

    #[test]
    fn test_json_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
        store.save(&Preferences::default()).unwrap();
        assert_eq!(store.load().unwrap(), Some(Preferences::default()));

        store.clear().unwrap();
        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({"theme": "dark"}));
    }

    #[test]
    fn test_json_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("prefs.json"));
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
        store.save(&Preferences::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_load_and_reset_handlers() {
        let catalog = StyleCatalog::builtin();
        let notifier = RecordingNotifier::default();
        let mut store = MemoryStore::new();
        let mut state = UiState::default();

        assert!(!load_preferences(&mut state, &store, catalog, &notifier));
        assert_eq!(notifier.last().unwrap().level, NotificationLevel::Warning);

        state.text = "kept".to_string();
        state.set_style("neon", catalog);
        assert!(save_preferences(&state, &mut store, &notifier));

        let mut other = UiState::default();
        assert!(load_preferences(&mut other, &store, catalog, &notifier));
        assert_eq!(other.text, "kept");
        assert_eq!(other.style_id(), "neon");

        assert!(reset_preferences(&mut other, &mut store, &notifier));
        assert_eq!(other, UiState::default());
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(notifier.last().unwrap().message, "Settings reset to default!");
    }
}
