//! Copying the preview text to the clipboard.

use crate::error::CollaboratorError;
use crate::notify::Notifier;

/// A way of putting plain text on the system clipboard.
pub trait ClipboardBackend {
    /// Whether this backend can be used at all in the current environment.
    fn is_available(&self) -> bool {
        true
    }

    fn write_text(&mut self, text: &str) -> Result<(), CollaboratorError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Nothing to copy. Neither backend was touched.
    Refused,
    Failed,
}

/// Copy `text`, trying `native` first and `fallback` second.
///
/// Empty or whitespace-only text is refused with a warning.
pub fn copy_text(
    text: &str,
    native: &mut dyn ClipboardBackend,
    fallback: &mut dyn ClipboardBackend,
    notifier: &dyn Notifier,
) -> CopyOutcome {
    copy_with_messages(
        text,
        native,
        fallback,
        notifier,
        "Copied successfully!",
        "Copy failed, please select text manually",
    )
}

/// Copy the preview text of one style card. Same strategy as [`copy_text`],
/// reported against the style.
pub fn copy_style_text(
    style_id: &str,
    text: &str,
    native: &mut dyn ClipboardBackend,
    fallback: &mut dyn ClipboardBackend,
    notifier: &dyn Notifier,
) -> CopyOutcome {
    copy_with_messages(
        text,
        native,
        fallback,
        notifier,
        &format!("Copied \"{style_id}\" style text!"),
        "Failed to copy text",
    )
}

fn copy_with_messages(
    text: &str,
    native: &mut dyn ClipboardBackend,
    fallback: &mut dyn ClipboardBackend,
    notifier: &dyn Notifier,
    copied: &str,
    failed: &str,
) -> CopyOutcome {
    if text.trim().is_empty() {
        notifier.warning("No text to copy");
        return CopyOutcome::Refused;
    }

    if native.is_available() {
        match native.write_text(text) {
            Ok(()) => {
                notifier.success(copied);
                return CopyOutcome::Copied;
            }
            Err(err) => log::warn!("native clipboard failed, trying fallback: {}", err),
        }
    }

    match fallback.write_text(text) {
        Ok(()) => {
            notifier.success(copied);
            CopyOutcome::Copied
        }
        Err(err) => {
            log::error!("clipboard fallback failed: {}", err);
            notifier.error(failed);
            CopyOutcome::Failed
        }
    }
}
