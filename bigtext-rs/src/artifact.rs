//! Export results and where they go.

use crate::error::CollaboratorError;
use crate::exporter::SurfaceLayout;
use crate::request::OutputFormat;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactData {
    /// Encoded image bytes.
    Bytes(Vec<u8>),
    /// A vector image or document.
    Markup(String),
}

impl ArtifactData {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ArtifactData::Bytes(bytes) => bytes,
            ArtifactData::Markup(markup) => markup.as_bytes(),
        }
    }

    pub fn as_markup(&self) -> Option<&str> {
        match self {
            ArtifactData::Bytes(_) => None,
            ArtifactData::Markup(markup) => Some(markup),
        }
    }
}

/// The output of one export.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub format: OutputFormat,
    pub data: ArtifactData,
    pub mime_type: &'static str,
    /// Suggested file name, `bigtext-<unix-ms>.<ext>`.
    pub file_name: String,
    /// Surface geometry. `None` for the print document.
    pub layout: Option<SurfaceLayout>,
}

/// `bigtext-<unix-ms>.<ext>` for the current time.
pub fn artifact_file_name(format: OutputFormat) -> String {
    format!(
        "bigtext-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        format.extension()
    )
}

/// Offers an artifact to the user as a file.
pub trait DownloadSink {
    /// Store the artifact and return where it ended up.
    fn save(&self, artifact: &Artifact) -> Result<PathBuf, CollaboratorError>;
}

/// Writes artifacts into a directory under their suggested names.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, artifact: &Artifact) -> Result<PathBuf, CollaboratorError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&artifact.file_name);
        std::fs::write(&path, artifact.data.as_bytes())?;
        log::info!("saved {} ({})", path.display(), artifact.mime_type);
        Ok(path)
    }
}
