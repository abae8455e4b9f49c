//! Error types for bigtext-rs.

use bigtext_canvas2d::Canvas2dError;
use thiserror::Error;

/// Failures of the export pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested output format is not one of png, jpg, svg, pdf.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The request carries values the pipeline cannot render.
    #[error("Invalid render request: {0}")]
    InvalidRequest(String),

    /// A color string is not a 6-digit hex color.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Measuring, painting, or encoding failed in the raster backend.
    #[error("Rendering failed: {0}")]
    Backend(#[from] Canvas2dError),

    /// The background render task did not complete.
    #[error("Export worker failed: {0}")]
    Worker(String),
}

/// Failures reported by collaborators (clipboard, print, storage, download).
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("Clipboard unavailable")]
    ClipboardUnavailable,

    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    #[error("Print failed: {0}")]
    Print(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failures when extending the style catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("Style id already registered: {0}")]
    DuplicateId(String),
}
