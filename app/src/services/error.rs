use page_composer::ComposeError;
use qr_engine::EngineError;

/// Errors surfaced by generation and export operations.
#[derive(Debug, thiserror::Error)]
pub enum QrStudioError {
    #[error("Please enter some text or URL")]
    EmptyInput,

    #[error("QR encoder is not available")]
    EncoderUnavailable,

    #[error("QR encoding failed: {0}")]
    EncodeFailed(String),

    #[error("Bitmap unreadable: {0}")]
    BitmapUnreadable(String),

    #[error("No QR code to export")]
    NoArtifact,

    #[error("PDF composer is not available")]
    DocumentComposerUnavailable,

    #[error("Export failed: {0}")]
    ExportIOFailure(String),

    #[error("Unsupported size {0} (expected one of 128, 256, 512, 1024)")]
    UnsupportedSize(u32),
}

impl From<EngineError> for QrStudioError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Encode(msg) => QrStudioError::EncodeFailed(msg),
            EngineError::BitmapUnreadable(msg) => QrStudioError::BitmapUnreadable(msg),
            EngineError::RasterEncode(msg) => QrStudioError::ExportIOFailure(msg),
        }
    }
}

impl From<ComposeError> for QrStudioError {
    fn from(err: ComposeError) -> Self {
        QrStudioError::ExportIOFailure(err.to_string())
    }
}

impl From<std::io::Error> for QrStudioError {
    fn from(err: std::io::Error) -> Self {
        QrStudioError::ExportIOFailure(err.to_string())
    }
}

/// Result type alias for qr-studio services.
pub type Result<T> = std::result::Result<T, QrStudioError>;
