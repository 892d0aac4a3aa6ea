//! User-visible notices for operation outcomes.

use serde::Serialize;

use super::error::QrStudioError;
use super::export::ExportFormat;

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A message to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Notice for a failed generation.
pub fn generation_failed(err: &QrStudioError) -> Notice {
    match err {
        QrStudioError::EmptyInput | QrStudioError::EncoderUnavailable => {
            Notice::error(err.to_string())
        }
        other => Notice::error(format!("Failed to generate QR code: {other}")),
    }
}

/// Notice for a delivered export.
pub fn export_succeeded(format: ExportFormat) -> Notice {
    Notice::success(format!("{} downloaded successfully!", format.label()))
}

/// Notice for a failed export.
pub fn export_failed(format: ExportFormat, err: &QrStudioError) -> Notice {
    match err {
        QrStudioError::NoArtifact => Notice::error("No QR code to download"),
        QrStudioError::DocumentComposerUnavailable => Notice::error(err.to_string()),
        other => Notice::error(format!("Failed to download {}: {other}", format.label())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_messages() {
        assert_eq!(
            generation_failed(&QrStudioError::EmptyInput).message,
            "Please enter some text or URL"
        );
        let n = generation_failed(&QrStudioError::EncodeFailed("data too long".into()));
        assert!(n.is_error());
        assert_eq!(
            n.message,
            "Failed to generate QR code: QR encoding failed: data too long"
        );
    }

    #[test]
    fn export_messages() {
        assert_eq!(
            export_succeeded(ExportFormat::Svg),
            Notice::success("SVG downloaded successfully!")
        );
        assert_eq!(
            export_failed(ExportFormat::Png, &QrStudioError::NoArtifact).message,
            "No QR code to download"
        );
        assert_eq!(
            export_failed(ExportFormat::Pdf, &QrStudioError::DocumentComposerUnavailable).message,
            "PDF composer is not available"
        );
        assert!(
            export_failed(ExportFormat::Pdf, &QrStudioError::ExportIOFailure("disk full".into()))
                .message
                .starts_with("Failed to download PDF")
        );
    }

    #[test]
    fn notice_serializes_lowercase_kind() {
        let json = serde_json::to_string(&Notice::error("x")).unwrap();
        assert_eq!(json, r#"{"kind":"error","message":"x"}"#);
    }
}
