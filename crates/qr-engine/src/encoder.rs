//! QR code generation into a square RGB raster.

use async_trait::async_trait;
use image::Rgb;
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::{EngineError, RasterBitmap, Result};

/// QR error-correction level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

impl ErrorCorrection {
    /// Parse a level letter (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Some(Self::L),
            "M" => Some(Self::M),
            "Q" => Some(Self::Q),
            "H" => Some(Self::H),
            _ => None,
        }
    }

    fn ec_level(self) -> EcLevel {
        match self {
            Self::L => EcLevel::L,
            Self::M => EcLevel::M,
            Self::Q => EcLevel::Q,
            Self::H => EcLevel::H,
        }
    }
}

/// Parameters for a single encode call.
#[derive(Debug, Clone)]
pub struct EncodeRequest {
    pub text: String,
    pub size: u32,
    pub level: ErrorCorrection,
    pub background: Rgb<u8>,
    pub foreground: Rgb<u8>,
}

impl EncodeRequest {
    /// Black on white at level M.
    pub fn new(text: impl Into<String>, size: u32) -> Self {
        Self {
            text: text.into(),
            size,
            level: ErrorCorrection::M,
            background: Rgb([255, 255, 255]),
            foreground: Rgb([0, 0, 0]),
        }
    }
}

/// Encoder capability: turns text into a `size × size` raster.
#[async_trait]
pub trait QrEncoder: Send + Sync {
    async fn encode(&self, request: &EncodeRequest) -> Result<RasterBitmap>;
}

/// Encoder backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodeEncoder;

#[async_trait]
impl QrEncoder for QrcodeEncoder {
    async fn encode(&self, request: &EncodeRequest) -> Result<RasterBitmap> {
        generate_qr(request)
    }
}

/// Generate a QR code raster of exactly `request.size` pixels per side.
///
/// When the module grid fits, each module is drawn as an integer-sized block
/// and the symbol is centred; otherwise modules are sampled fractionally so
/// the output size still holds.
pub fn generate_qr(request: &EncodeRequest) -> Result<RasterBitmap> {
    let size = request.size;
    if size == 0 {
        return Err(EngineError::Encode("size must be positive".into()));
    }

    let code =
        QrCode::with_error_correction_level(request.text.as_bytes(), request.level.ec_level())
            .map_err(|e| EngineError::Encode(e.to_string()))?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let mut bitmap = RasterBitmap::filled(size, request.background);
    let img = bitmap.pixels_mut();
    let is_dark =
        |mx: u32, my: u32| modules[(my * module_count + mx) as usize] == qrcode::Color::Dark;

    let scale = size / module_count;
    if scale >= 1 {
        let offset = (size - module_count * scale) / 2;
        debug!(module_count, scale, offset, size, "Rendering QR modules");
        for my in 0..module_count {
            for mx in 0..module_count {
                if !is_dark(mx, my) {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        img.put_pixel(
                            offset + mx * scale + dx,
                            offset + my * scale + dy,
                            request.foreground,
                        );
                    }
                }
            }
        }
    } else {
        debug!(module_count, size, "Module grid larger than target, sampling");
        for y in 0..size {
            for x in 0..size {
                let mx = x * module_count / size;
                let my = y * module_count / size;
                if is_dark(mx, my) {
                    img.put_pixel(x, y, request.foreground);
                }
            }
        }
    }

    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_qr_produces_exact_size() {
        for size in [128, 256, 512, 1000] {
            let bmp = generate_qr(&EncodeRequest::new("https://example.com", size)).unwrap();
            assert_eq!(bmp.size(), size);
        }
    }

    #[test]
    fn generate_qr_uses_requested_colours() {
        let mut req = EncodeRequest::new("test", 128);
        req.background = Rgb([250, 250, 250]);
        req.foreground = Rgb([10, 20, 30]);
        let bmp = generate_qr(&req).unwrap();
        let colours: std::collections::HashSet<[u8; 3]> =
            bmp.pixels().pixels().map(|p| p.0).collect();
        assert_eq!(colours.len(), 2);
        assert!(colours.contains(&[250, 250, 250]));
        assert!(colours.contains(&[10, 20, 30]));
    }

    #[test]
    fn generate_qr_smaller_than_module_grid() {
        let bmp = generate_qr(&EncodeRequest::new("tiny", 10)).unwrap();
        assert_eq!(bmp.size(), 10);
    }

    #[test]
    fn generate_qr_rejects_zero_size() {
        let err = generate_qr(&EncodeRequest::new("x", 0)).unwrap_err();
        assert!(matches!(err, EngineError::Encode(_)));
    }

    #[test]
    fn generate_qr_rejects_oversized_payload() {
        let text = "x".repeat(5000);
        let err = generate_qr(&EncodeRequest::new(text, 256)).unwrap_err();
        assert!(matches!(err, EngineError::Encode(_)));
    }

    #[test]
    fn error_correction_parse() {
        assert_eq!(ErrorCorrection::parse("m"), Some(ErrorCorrection::M));
        assert_eq!(ErrorCorrection::parse(" H "), Some(ErrorCorrection::H));
        assert_eq!(ErrorCorrection::parse("X"), None);
        assert_eq!(ErrorCorrection::default(), ErrorCorrection::M);
    }

    #[tokio::test]
    async fn qrcode_encoder_implements_capability() {
        let encoder: &dyn QrEncoder = &QrcodeEncoder;
        let bmp = encoder.encode(&EncodeRequest::new("hello", 256)).await.unwrap();
        assert_eq!(bmp.size(), 256);
    }
}
