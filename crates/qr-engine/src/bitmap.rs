//! Square RGB raster produced by the encoder, and the sources the sampler
//! can read pixels from.

use std::borrow::Cow;
use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use crate::{EngineError, Result};

/// Immutable `size × size` RGB raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBitmap {
    pixels: RgbImage,
}

impl RasterBitmap {
    /// Create a bitmap filled with a single colour.
    pub fn filled(size: u32, color: Rgb<u8>) -> Self {
        Self {
            pixels: RgbImage::from_pixel(size, size, color),
        }
    }

    /// Wrap an existing image.
    ///
    /// # Panics
    /// Panics if the image is not square.
    pub fn from_image(pixels: RgbImage) -> Self {
        assert_eq!(
            pixels.width(),
            pixels.height(),
            "Raster bitmap must be square, got {}x{}",
            pixels.width(),
            pixels.height()
        );
        Self { pixels }
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.pixels.width()
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut RgbImage {
        &mut self.pixels
    }

    /// Encode the bitmap as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.pixels
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| EngineError::RasterEncode(e.to_string()))?;
        Ok(out.into_inner())
    }
}

/// Anything the bitmap sampler can read RGB pixels from.
pub trait RasterSource {
    fn read_rgb(&self) -> Result<Cow<'_, RgbImage>>;
}

impl RasterSource for RasterBitmap {
    fn read_rgb(&self) -> Result<Cow<'_, RgbImage>> {
        Ok(Cow::Borrowed(&self.pixels))
    }
}

impl RasterSource for RgbImage {
    fn read_rgb(&self) -> Result<Cow<'_, RgbImage>> {
        Ok(Cow::Borrowed(self))
    }
}

/// PNG-encoded raster, decoded on read.
#[derive(Debug, Clone)]
pub struct PngBytes(pub Vec<u8>);

impl RasterSource for PngBytes {
    fn read_rgb(&self) -> Result<Cow<'_, RgbImage>> {
        let img = image::load_from_memory_with_format(&self.0, ImageFormat::Png)
            .map_err(|e| EngineError::BitmapUnreadable(e.to_string()))?;
        Ok(Cow::Owned(img.to_rgb8()))
    }
}
