//! Transient user notifications.

use crate::artifact::Artifact;
use crate::error::ExportError;
use crate::request::OutputFormat;
use std::time::Duration;

/// How long a notification stays visible.
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    /// Accent color of the toast.
    pub fn color(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "#3b82f6",
            NotificationLevel::Success => "#10b981",
            NotificationLevel::Warning => "#f59e0b",
            NotificationLevel::Error => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// Auto-dismiss delay.
    pub duration: Duration,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: NOTIFICATION_DURATION,
        }
    }
}

/// Displays notifications. Never drives logic.
pub trait Notifier {
    fn notify(&self, notification: Notification);

    fn info(&self, message: &str) {
        self.notify(Notification::new(NotificationLevel::Info, message));
    }

    fn success(&self, message: &str) {
        self.notify(Notification::new(NotificationLevel::Success, message));
    }

    fn warning(&self, message: &str) {
        self.notify(Notification::new(NotificationLevel::Warning, message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::new(NotificationLevel::Error, message));
    }
}

/// Sends notifications to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        let level = match notification.level {
            NotificationLevel::Info | NotificationLevel::Success => log::Level::Info,
            NotificationLevel::Warning => log::Level::Warn,
            NotificationLevel::Error => log::Level::Error,
        };
        log::log!(level, "{}", notification.message);
    }
}

/// Tell the user how an export went.
pub fn report_export_outcome(
    result: &Result<Artifact, ExportError>,
    format: OutputFormat,
    notifier: &dyn Notifier,
) {
    match (result, format) {
        (Ok(_), OutputFormat::Png | OutputFormat::Jpg) => notifier.success(&format!(
            "{} image exported successfully!",
            format.to_string().to_uppercase()
        )),
        (Ok(_), OutputFormat::Svg) => notifier.success("SVG exported successfully!"),
        (Ok(_), OutputFormat::Pdf) => {
            notifier.success("PDF export initiated! Use browser print dialog to save as PDF.")
        }
        (Err(err), _) => {
            log::error!("{} export failed: {}", format, err);
            let message = match format {
                OutputFormat::Svg => "SVG export failed",
                OutputFormat::Pdf => "PDF export failed",
                OutputFormat::Png | OutputFormat::Jpg => "Export failed, please try again",
            };
            notifier.error(message);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingNotifier;
    use super::*;

    #[test]
    fn test_export_failure_is_reported() {
        let notifier = RecordingNotifier::default();
        let result = Err(ExportError::UnsupportedFormat("bmp".to_string()));
        report_export_outcome(&result, OutputFormat::Png, &notifier);
        let last = notifier.last().unwrap();
        assert_eq!(last.level, NotificationLevel::Error);
        assert_eq!(last.message, "Export failed, please try again");
        assert_eq!(last.duration, Duration::from_millis(2000));
    }

    #[test]
    fn test_success_messages() {
        let notifier = RecordingNotifier::default();
        let artifact = Artifact {
            format: OutputFormat::Jpg,
            data: crate::artifact::ArtifactData::Bytes(vec![]),
            mime_type: "image/jpeg",
            file_name: "bigtext-1.jpg".to_string(),
            layout: None,
        };
        report_export_outcome(&Ok(artifact), OutputFormat::Jpg, &notifier);
        assert_eq!(notifier.last().unwrap().message, "JPG image exported successfully!");
        assert_eq!(notifier.last().unwrap().level.color(), "#10b981");
    }
}
