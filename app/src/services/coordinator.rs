//! Export coordinator: owns the current QR artifact and produces exports.
//!
//! Lifecycle: empty on creation, set by a successful [`ExportCoordinator::generate`],
//! replaced by the next one, dropped by [`ExportCoordinator::clear`]. A failed
//! generation leaves the previous artifact in place.

use std::sync::Arc;

use chrono::{DateTime, Local};
use image::Rgb;
use page_composer::DocumentComposer;
use qr_engine::{
    EncodeRequest, ErrorCorrection, QrEncoder, RasterBitmap, VectorDocument, render_vector,
};
use tracing::{debug, info};

use super::document::compose_document;
use super::error::{QrStudioError, Result};
use super::export::{ExportFile, ExportFormat};
use super::size::TargetSize;

/// Colours and error-correction level passed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeStyle {
    pub level: ErrorCorrection,
    pub background: [u8; 3],
    pub foreground: [u8; 3],
}

impl Default for EncodeStyle {
    fn default() -> Self {
        Self {
            level: ErrorCorrection::M,
            background: [255, 255, 255],
            foreground: [0, 0, 0],
        }
    }
}

/// The most recently generated QR code in both representations.
#[derive(Debug, Clone)]
pub struct Artifact {
    text: String,
    size: TargetSize,
    bitmap: Arc<RasterBitmap>,
    vector: VectorDocument,
    created_at: DateTime<Local>,
}

impl Artifact {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn size(&self) -> TargetSize {
        self.size
    }

    pub fn bitmap(&self) -> &Arc<RasterBitmap> {
        &self.bitmap
    }

    pub fn vector(&self) -> &VectorDocument {
        &self.vector
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}

/// Holds the current artifact and the external capabilities used to build
/// and export it.
pub struct ExportCoordinator {
    encoder: Option<Arc<dyn QrEncoder>>,
    composer: Option<Arc<dyn DocumentComposer>>,
    style: EncodeStyle,
    preferred_size: TargetSize,
    current: Option<Artifact>,
}

impl ExportCoordinator {
    /// Create a coordinator with no capabilities attached.
    pub fn new(preferred_size: TargetSize) -> Self {
        Self {
            encoder: None,
            composer: None,
            style: EncodeStyle::default(),
            preferred_size,
            current: None,
        }
    }

    /// Builder: attach the encoder capability.
    pub fn with_encoder(mut self, encoder: Arc<dyn QrEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Builder: attach the document-composition capability.
    pub fn with_composer(mut self, composer: Arc<dyn DocumentComposer>) -> Self {
        self.composer = Some(composer);
        self
    }

    /// Builder: set encoder colours and level.
    pub fn with_style(mut self, style: EncodeStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace encoder colours and level for later generations.
    pub fn set_style(&mut self, style: EncodeStyle) {
        self.style = style;
    }

    pub fn has_encoder(&self) -> bool {
        self.encoder.is_some()
    }

    pub fn has_composer(&self) -> bool {
        self.composer.is_some()
    }

    /// Size used when no explicit size is given.
    pub fn preferred_size(&self) -> TargetSize {
        self.preferred_size
    }

    pub fn current(&self) -> Option<&Artifact> {
        self.current.as_ref()
    }

    pub fn has_artifact(&self) -> bool {
        self.current.is_some()
    }

    /// Encode `text` at `size` and install the result as the current artifact.
    ///
    /// The text is trimmed first. On any failure the previous artifact is
    /// kept as it was.
    pub async fn generate(&mut self, text: &str, size: TargetSize) -> Result<&Artifact> {
        let text = text.trim();
        if text.is_empty() {
            return Err(QrStudioError::EmptyInput);
        }
        let encoder = self
            .encoder
            .clone()
            .ok_or(QrStudioError::EncoderUnavailable)?;

        info!(size = size.get(), chars = text.chars().count(), "Generating QR code");

        let request = EncodeRequest {
            text: text.to_string(),
            size: size.get(),
            level: self.style.level,
            background: Rgb(self.style.background),
            foreground: Rgb(self.style.foreground),
        };
        let bitmap = encoder.encode(&request).await?;
        if bitmap.size() != size.get() {
            return Err(QrStudioError::BitmapUnreadable(format!(
                "encoder returned {0}x{0}, expected {size}",
                bitmap.size()
            )));
        }

        let vector = render_vector(&bitmap, size.get())?;
        debug!(
            size = size.get(),
            dark_cells = vector.dark_cell_count(),
            svg_bytes = vector.as_str().len(),
            "Vector document ready"
        );

        self.preferred_size = size;
        let artifact = Artifact {
            text: text.to_string(),
            size,
            bitmap: Arc::new(bitmap),
            vector,
            created_at: Local::now(),
        };
        Ok(self.current.insert(artifact))
    }

    /// Change the preferred size; regenerates the live artifact, if any, at
    /// the new size. Returns whether a regeneration happened.
    pub async fn set_size(&mut self, size: TargetSize) -> Result<bool> {
        self.preferred_size = size;
        let Some(text) = self.current.as_ref().map(|a| a.text.clone()) else {
            return Ok(false);
        };
        self.generate(&text, size).await?;
        Ok(true)
    }

    /// Drop the current artifact.
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            info!("Cleared current QR code");
        }
    }

    fn artifact(&self) -> Result<&Artifact> {
        self.current.as_ref().ok_or(QrStudioError::NoArtifact)
    }

    /// PNG encoding of the current bitmap.
    pub fn export_raster(&self) -> Result<ExportFile> {
        let artifact = self.artifact()?;
        let png = artifact.bitmap.to_png()?;
        Ok(ExportFile::new(artifact.size, ExportFormat::Png, png))
    }

    /// The stored SVG document.
    pub fn export_vector(&self) -> Result<ExportFile> {
        let artifact = self.artifact()?;
        Ok(ExportFile::new(
            artifact.size,
            ExportFormat::Svg,
            artifact.vector.as_bytes().to_vec(),
        ))
    }

    /// Single-page PDF with the QR image, dated today.
    pub fn export_document(&self) -> Result<ExportFile> {
        let artifact = self.artifact()?;
        let composer = self
            .composer
            .as_ref()
            .ok_or(QrStudioError::DocumentComposerUnavailable)?;

        let png = artifact.bitmap.to_png()?;
        let today = Local::now().date_naive();
        let bytes = compose_document(composer.as_ref(), &artifact.text, &png, today)?;
        Ok(ExportFile::new(artifact.size, ExportFormat::Pdf, bytes))
    }

    /// Dispatch to the export for `format`.
    pub fn export(&self, format: ExportFormat) -> Result<ExportFile> {
        match format {
            ExportFormat::Png => self.export_raster(),
            ExportFormat::Svg => self.export_vector(),
            ExportFormat::Pdf => self.export_document(),
        }
    }
}
