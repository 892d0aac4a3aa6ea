//! Single-page document composition.
//!
//! Defines the composition capability (`DocumentComposer` / `PageCanvas`)
//! and a PDF implementation backed by `printpdf`. Layout coordinates are in
//! millimetres with the origin at the top-left corner of the page.

pub mod metrics;
pub mod pdf;

// Re-exports for convenience
pub use metrics::{measure_text_mm, wrap_text};
pub use pdf::PdfComposer;

/// Page dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageSize {
    /// ISO A4 portrait.
    pub const A4_PORTRAIT: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    pub fn shorter_side(&self) -> f32 {
        self.width_mm.min(self.height_mm)
    }
}

/// Axis-aligned rectangle in page millimetres (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Horizontal anchoring of a text run relative to its `x` coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// A single line of text to place on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub text: String,
    /// Anchor x in millimetres.
    pub x: f32,
    /// Baseline y in millimetres from the top of the page.
    pub y: f32,
    pub font_size: f32,
    pub color: [u8; 3],
    pub align: Align,
}

impl TextSpec {
    /// Black, left-aligned text.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            color: [0, 0, 0],
            align: Align::Left,
        }
    }

    /// Builder: set text colour.
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    /// Builder: set alignment.
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Left edge of the run after alignment.
    pub fn left_edge(&self) -> f32 {
        match self.align {
            Align::Left => self.x,
            Align::Center => self.x - measure_text_mm(&self.text, self.font_size) / 2.0,
        }
    }
}

/// Document-composition capability.
pub trait DocumentComposer: Send + Sync {
    /// Start a new single-page document.
    fn begin_page(&self, size: PageSize) -> Result<Box<dyn PageCanvas>>;
}

/// A page being composed. Consumed by [`PageCanvas::finish`].
pub trait PageCanvas {
    fn text(&mut self, spec: &TextSpec) -> Result<()>;

    /// Place a PNG-encoded raster stretched to `rect`.
    fn image_png(&mut self, png: &[u8], rect: Rect) -> Result<()>;

    /// Serialize the document to bytes.
    fn finish(self: Box<Self>) -> Result<Vec<u8>>;
}

/// Errors that can occur while composing a document.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("Font error: {0}")]
    Font(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

/// Result type alias for page-composer operations.
pub type Result<T> = std::result::Result<T, ComposeError>;
