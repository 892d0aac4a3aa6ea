//! Supported QR output sizes.

use std::fmt;

use super::error::QrStudioError;

/// Pixel sizes offered to the user.
pub const SUPPORTED_SIZES: [u32; 4] = [128, 256, 512, 1024];

/// A validated output size (one of [`SUPPORTED_SIZES`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetSize(u32);

impl TargetSize {
    pub const SMALL: TargetSize = TargetSize(128);
    pub const MOBILE: TargetSize = TargetSize(256);
    pub const DESKTOP: TargetSize = TargetSize(512);
    pub const LARGE: TargetSize = TargetSize(1024);

    pub fn new(px: u32) -> Result<Self, QrStudioError> {
        if SUPPORTED_SIZES.contains(&px) {
            Ok(Self(px))
        } else {
            Err(QrStudioError::UnsupportedSize(px))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// All supported sizes, ascending.
    pub fn all() -> impl Iterator<Item = TargetSize> {
        SUPPORTED_SIZES.into_iter().map(TargetSize)
    }
}

impl TryFrom<u32> for TargetSize {
    type Error = QrStudioError;

    fn try_from(px: u32) -> Result<Self, Self::Error> {
        Self::new(px)
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_sizes() {
        for px in SUPPORTED_SIZES {
            assert_eq!(TargetSize::new(px).unwrap().get(), px);
        }
    }

    #[test]
    fn rejects_other_sizes() {
        for px in [0, 1, 127, 300, 2048] {
            assert!(matches!(
                TargetSize::new(px),
                Err(QrStudioError::UnsupportedSize(p)) if p == px
            ));
        }
    }

    #[test]
    fn display_is_width_by_height() {
        assert_eq!(TargetSize::DESKTOP.to_string(), "512x512");
    }

    #[test]
    fn all_is_ascending() {
        let sizes: Vec<u32> = TargetSize::all().map(TargetSize::get).collect();
        assert_eq!(sizes, SUPPORTED_SIZES);
    }
}
