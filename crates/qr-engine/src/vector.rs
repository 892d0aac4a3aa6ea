//! Raster-to-vector conversion: one SVG unit rect per dark pixel.

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::debug;

use crate::{DARK_THRESHOLD, RasterSource, Result};

/// Rendered SVG document. Cloning shares the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorDocument {
    svg: Arc<str>,
    dark_cells: usize,
}

impl VectorDocument {
    pub fn as_str(&self) -> &str {
        &self.svg
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.svg.as_bytes()
    }

    /// Number of 1×1 dark rects emitted.
    pub fn dark_cell_count(&self) -> usize {
        self.dark_cells
    }
}

/// A pixel is dark if any channel is below [`DARK_THRESHOLD`].
pub fn is_dark(rgb: [u8; 3]) -> bool {
    rgb.iter().any(|&c| c < DARK_THRESHOLD)
}

/// Convert a `size × size` raster into an SVG document.
///
/// Emits a white background rect followed by a black unit rect for every
/// dark pixel, in row-major order.
///
/// # Panics
/// Panics if the source is not exactly `size × size`.
pub fn render_vector<S: RasterSource + ?Sized>(source: &S, size: u32) -> Result<VectorDocument> {
    let pixels = source.read_rgb()?;
    assert_eq!(
        pixels.dimensions(),
        (size, size),
        "Bitmap must be {size}x{size}, got {}x{}",
        pixels.width(),
        pixels.height()
    );

    let mut svg = String::with_capacity(256);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    );
    let _ = write!(svg, r##"<rect width="{size}" height="{size}" fill="#FFFFFF"/>"##);

    let mut dark_cells = 0usize;
    for (x, y, pixel) in pixels.enumerate_pixels() {
        if is_dark(pixel.0) {
            let _ = write!(
                svg,
                r##"<rect x="{x}" y="{y}" width="1" height="1" fill="#000000"/>"##
            );
            dark_cells += 1;
        }
    }
    svg.push_str("</svg>");

    debug!(size, dark_cells, bytes = svg.len(), "Rendered vector document");

    Ok(VectorDocument {
        svg: Arc::from(svg),
        dark_cells,
    })
}
