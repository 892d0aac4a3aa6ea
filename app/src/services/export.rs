//! Downloadable export files and their delivery to disk.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use super::error::Result;
use super::size::TargetSize;

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Svg, ExportFormat::Pdf];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Upper-case label used in user messages.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Svg => "SVG",
            ExportFormat::Pdf => "PDF",
        }
    }

    pub fn mime_type(self) -> String {
        mime_guess::from_ext(self.extension())
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

/// Filename for an export: `qr-code-{w}x{h}.{ext}`.
pub fn export_filename(size: TargetSize, format: ExportFormat) -> String {
    format!("qr-code-{size}.{}", format.extension())
}

/// A file ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn new(size: TargetSize, format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            filename: export_filename(size, format),
            mime_type: format.mime_type(),
            bytes,
        }
    }

    /// Inline `data:` URL of the file contents.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }

    /// Write the file into `dir`, creating it if needed. Returns the path.
    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "Export written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::error::QrStudioError;

    #[test]
    fn filenames_follow_pattern() {
        let size = TargetSize::MOBILE;
        assert_eq!(export_filename(size, ExportFormat::Png), "qr-code-256x256.png");
        assert_eq!(export_filename(size, ExportFormat::Svg), "qr-code-256x256.svg");
        assert_eq!(export_filename(size, ExportFormat::Pdf), "qr-code-256x256.pdf");
    }

    #[test]
    fn mime_types() {
        assert_eq!(ExportFormat::Png.mime_type(), "image/png");
        assert_eq!(ExportFormat::Svg.mime_type(), "image/svg+xml");
        assert_eq!(ExportFormat::Pdf.mime_type(), "application/pdf");
    }

    #[test]
    fn data_url_is_base64() {
        let file = ExportFile::new(TargetSize::SMALL, ExportFormat::Svg, b"<svg/>".to_vec());
        assert_eq!(file.to_data_url(), "data:image/svg+xml;base64,PHN2Zy8+");
    }

    #[test]
    fn save_to_dir_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out");
        let file = ExportFile::new(TargetSize::DESKTOP, ExportFormat::Png, vec![1, 2, 3]);
        let path = file.save_to_dir(&nested).unwrap();
        assert_eq!(path, nested.join("qr-code-512x512.png"));
        assert_eq!(std::fs::read(path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn save_to_unwritable_dir_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not dir").unwrap();
        let file = ExportFile::new(TargetSize::DESKTOP, ExportFormat::Png, vec![1]);
        let err = file.save_to_dir(&blocker).unwrap_err();
        assert!(matches!(err, QrStudioError::ExportIOFailure(_)));
    }
}
