#![doc = include_str!("../README.md")]

pub mod artifact;
pub mod catalog;
pub mod clipboard;
pub mod color;
pub mod debounce;
pub mod error;
pub mod exporter;
pub mod notify;
pub mod preferences;
pub mod preview;
pub mod print;
pub mod raster;
pub mod request;
pub mod state;
pub mod svg;

pub use artifact::{Artifact, ArtifactData, DirectorySink, DownloadSink};
pub use catalog::{PaintTraits, StyleCatalog, StyleDescriptor, StyleKind};
pub use clipboard::{copy_style_text, copy_text, ClipboardBackend, CopyOutcome};
pub use color::{HexColor, Rgba};
pub use debounce::Debouncer;
pub use error::{CollaboratorError, ExportError, StyleError};
pub use exporter::{ExportConfig, PreparedExport, RasterExporter, SurfaceLayout};
pub use notify::{report_export_outcome, LogNotifier, Notification, NotificationLevel, Notifier};
pub use preferences::{JsonFileStore, MemoryStore, PreferenceStore, Preferences};
pub use preview::{Animation, PreviewTraits};
pub use print::{PrintService, PrintStyle, PrintToFile};
pub use raster::RasterTraits;
pub use request::{BackgroundMode, ExportOptions, OutputFormat, RenderRequest};
pub use state::UiState;

pub use bigtext_canvas2d::FontConfig;
