//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

use qr_engine::ErrorCorrection;

use crate::services::size::TargetSize;

static RE_HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "DEFAULT_SIZE" => {
            if value != "auto" {
                let v: u32 = value.parse().map_err(|_| "must be 'auto' or an integer")?;
                TargetSize::new(v).map_err(|e| e.to_string())?;
            }
        }
        "DEVICE_PROFILE" => {
            if !["auto", "mobile", "desktop"].contains(&value) {
                return Err("must be auto, mobile, or desktop".into());
            }
        }
        "DEBOUNCE_MS" => validate_int_range(value, 50, 5000)?,
        "FOREGROUND" | "BACKGROUND" => {
            if !RE_HEX_COLOR.is_match(value) {
                return Err("must be a #RRGGBB colour".into());
            }
        }
        "ERROR_CORRECTION" => {
            if ErrorCorrection::parse(value).is_none() {
                return Err("must be L, M, Q, or H".into());
            }
        }
        "OUTPUT_DIR" => {
            if value.len() > 4096 {
                return Err("path too long".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: u64, max: u64) -> Result<(), String> {
    let v: u64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

/// Parse a validated `#RRGGBB` string.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    if !RE_HEX_COLOR.is_match(value) {
        return None;
    }
    let hex = &value[1..];
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_size() {
        assert!(validate_setting("DEFAULT_SIZE", "auto").is_ok());
        assert!(validate_setting("DEFAULT_SIZE", "256").is_ok());
        assert!(validate_setting("DEFAULT_SIZE", "300").is_err());
        assert!(validate_setting("DEFAULT_SIZE", "big").is_err());
    }

    #[test]
    fn test_valid_device_profile() {
        assert!(validate_setting("DEVICE_PROFILE", "mobile").is_ok());
        assert!(validate_setting("DEVICE_PROFILE", "tablet").is_err());
    }

    #[test]
    fn test_valid_debounce() {
        assert!(validate_setting("DEBOUNCE_MS", "500").is_ok());
        assert!(validate_setting("DEBOUNCE_MS", "10").is_err());
        assert!(validate_setting("DEBOUNCE_MS", "9000").is_err());
        assert!(validate_setting("DEBOUNCE_MS", "soon").is_err());
    }

    #[test]
    fn test_valid_colors() {
        assert!(validate_setting("FOREGROUND", "#000000").is_ok());
        assert!(validate_setting("BACKGROUND", "#ffFFff").is_ok());
        assert!(validate_setting("FOREGROUND", "000000").is_err());
        assert!(validate_setting("FOREGROUND", "#12345").is_err());
    }

    #[test]
    fn test_valid_error_correction() {
        assert!(validate_setting("ERROR_CORRECTION", "M").is_ok());
        assert!(validate_setting("ERROR_CORRECTION", "m").is_ok());
        assert!(validate_setting("ERROR_CORRECTION", "Z").is_err());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF8000"), Some([255, 128, 0]));
        assert_eq!(parse_hex_color("#ff8000"), Some([255, 128, 0]));
        assert_eq!(parse_hex_color("red"), None);
    }
}
