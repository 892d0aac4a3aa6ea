//! PDF backend for the composition capability.

use printpdf::image_crate::{self, ImageFormat};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Rgb,
};
use tracing::debug;

use crate::{ComposeError, DocumentComposer, PageCanvas, PageSize, Rect, Result, TextSpec};

const LAYER_NAME: &str = "Layer 1";

/// Composes single-page PDFs using the built-in Helvetica font.
#[derive(Debug, Clone)]
pub struct PdfComposer {
    title: String,
}

impl PdfComposer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for PdfComposer {
    fn default() -> Self {
        Self::new("QR Code")
    }
}

impl DocumentComposer for PdfComposer {
    fn begin_page(&self, size: PageSize) -> Result<Box<dyn PageCanvas>> {
        let (doc, page, layer) = PdfDocument::new(
            self.title.as_str(),
            Mm(size.width_mm),
            Mm(size.height_mm),
            LAYER_NAME,
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ComposeError::Font(format!("{e:?}")))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Box::new(PdfPage {
            doc,
            layer,
            font,
            size,
        }))
    }
}

struct PdfPage {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    size: PageSize,
}

impl PdfPage {
    /// Convert a top-left-origin y coordinate to PDF's bottom-left origin.
    fn flip_y(&self, y: f32) -> Mm {
        Mm(self.size.height_mm - y)
    }
}

impl PageCanvas for PdfPage {
    fn text(&mut self, spec: &TextSpec) -> Result<()> {
        let [r, g, b] = spec.color;
        self.layer.set_fill_color(Color::Rgb(Rgb::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            None,
        )));
        self.layer.use_text(
            spec.text.as_str(),
            spec.font_size,
            Mm(spec.left_edge()),
            self.flip_y(spec.y),
            &self.font,
        );
        Ok(())
    }

    fn image_png(&mut self, png: &[u8], rect: Rect) -> Result<()> {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(ComposeError::InvalidImage(format!(
                "non-positive placement {}x{}mm",
                rect.width, rect.height
            )));
        }

        let decoded = image_crate::load_from_memory_with_format(png, ImageFormat::Png)
            .map_err(|e| ComposeError::InvalidImage(e.to_string()))?;
        let (px_w, px_h) = (decoded.width() as f32, decoded.height() as f32);

        // Pick the DPI that maps the pixel width onto the target width, then
        // stretch vertically for any remaining aspect difference.
        let dpi = px_w * 25.4 / rect.width;
        let native_h_mm = px_h / dpi * 25.4;
        let scale_y = rect.height / native_h_mm;

        debug!(px_w, px_h, dpi, ?rect, "Placing raster on page");

        Image::from_dynamic_image(&decoded).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(rect.x)),
                translate_y: Some(self.flip_y(rect.y + rect.height)),
                scale_x: Some(1.0),
                scale_y: Some(scale_y),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>> {
        let bytes = self
            .doc
            .save_to_bytes()
            .map_err(|e| ComposeError::Serialize(format!("{e:?}")))?;
        debug!(bytes = bytes.len(), "Serialized PDF document");
        Ok(bytes)
    }
}
