//! Which fonts a surface can draw with.

use std::path::PathBuf;
use std::sync::Arc;

/// Font sources for the surfaces of one exporter.
///
/// Scanning system fonts is slow, so a config is normally resolved once with
/// [`FontConfig::resolve`] and the result handed to every new context.
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Scan the platform font directories.
    pub load_system_fonts: bool,
    /// Extra directories scanned recursively.
    pub font_dirs: Vec<PathBuf>,
    /// In-memory font files (TTF/OTF/TTC).
    pub font_data: Vec<Arc<Vec<u8>>>,
    /// Candidates for the generic `serif`, `sans-serif` and `monospace`
    /// families, first installed one wins.
    pub fallbacks: FallbackFamilies,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
            font_data: Vec::new(),
            fallbacks: FallbackFamilies::default(),
        }
    }
}

/// Concrete faces standing in for the CSS generic families.
///
/// The defaults put the faces the editor offers (Arial, Georgia, Courier New)
/// ahead of common Linux substitutes.
#[derive(Clone, Debug)]
pub struct FallbackFamilies {
    pub sans_serif: Vec<String>,
    pub serif: Vec<String>,
    pub monospace: Vec<String>,
}

impl Default for FallbackFamilies {
    fn default() -> Self {
        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|name| name.to_string()).collect()
        }
        Self {
            sans_serif: names(&["Arial", "Helvetica", "Liberation Sans", "DejaVu Sans"]),
            serif: names(&["Georgia", "Times New Roman", "Liberation Serif", "DejaVu Serif"]),
            monospace: names(&["Courier New", "Liberation Mono", "DejaVu Sans Mono"]),
        }
    }
}

impl FontConfig {
    pub fn resolve(&self) -> ResolvedFontConfig {
        ResolvedFontConfig {
            fontdb: build_database(self),
        }
    }
}

/// A loaded font database. Clones are in-memory copies.
#[derive(Clone)]
pub struct ResolvedFontConfig {
    pub(crate) fontdb: fontdb::Database,
}

impl ResolvedFontConfig {
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Case-insensitive lookup of an installed family name.
    pub fn has_family(&self, family: &str) -> bool {
        self.fontdb.faces().any(|face| {
            face.families
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(family))
        })
    }
}

impl std::fmt::Debug for ResolvedFontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ResolvedFontConfig({} faces)", self.face_count())
    }
}

fn build_database(config: &FontConfig) -> fontdb::Database {
    let mut db = fontdb::Database::new();
    if config.load_system_fonts {
        db.load_system_fonts();
    }
    config.font_dirs.iter().for_each(|dir| db.load_fonts_dir(dir));
    for data in &config.font_data {
        db.load_font_data(data.as_ref().clone());
    }

    let resolved = ResolvedFontConfig { fontdb: db };
    let first_installed = |candidates: &[String]| {
        candidates
            .iter()
            .find(|name| resolved.has_family(name))
            .cloned()
    };
    let sans = first_installed(&config.fallbacks.sans_serif);
    let serif = first_installed(&config.fallbacks.serif);
    let mono = first_installed(&config.fallbacks.monospace);

    let mut db = resolved.fontdb;
    if let Some(name) = sans {
        db.set_sans_serif_family(name);
    }
    if let Some(name) = serif {
        db.set_serif_family(name);
    }
    if let Some(name) = mono {
        db.set_monospace_family(name);
    }
    log::debug!("loaded {} font faces", db.len());
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_prefer_editor_fonts() {
        let config = FontConfig::default();
        assert!(config.load_system_fonts);
        assert!(config.font_data.is_empty());
        assert_eq!(config.fallbacks.sans_serif[0], "Arial");
        assert_eq!(config.fallbacks.serif[0], "Georgia");
        assert_eq!(config.fallbacks.monospace[0], "Courier New");
    }

    #[test]
    fn test_offline_config_has_no_faces() {
        let resolved = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        }
        .resolve();
        assert_eq!(resolved.face_count(), 0);
        assert!(!resolved.has_family("Arial"));
    }

    #[test]
    fn test_garbage_font_data_is_skipped() {
        let resolved = FontConfig {
            load_system_fonts: false,
            font_data: vec![Arc::new(vec![0u8; 64])],
            ..FontConfig::default()
        }
        .resolve();
        assert_eq!(resolved.face_count(), 0);
    }
}
