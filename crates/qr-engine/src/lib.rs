//! QR raster generation and raster-to-vector conversion.
//!
//! Provides the encoder capability (text → square RGB bitmap) and the
//! bitmap sampler that turns a rendered bitmap into an SVG document.

pub mod bitmap;
pub mod encoder;
pub mod vector;

// Re-exports for convenience
pub use bitmap::{PngBytes, RasterBitmap, RasterSource};
pub use encoder::{EncodeRequest, ErrorCorrection, QrEncoder, QrcodeEncoder};
pub use vector::{VectorDocument, render_vector};

/// Channel value below which a pixel counts as dark.
pub const DARK_THRESHOLD: u8 = 128;

/// Errors that can occur while encoding or sampling a QR bitmap.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("QR encode error: {0}")]
    Encode(String),

    #[error("Bitmap unreadable: {0}")]
    BitmapUnreadable(String),

    #[error("Raster encode error: {0}")]
    RasterEncode(String),
}

/// Result type alias for qr-engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
