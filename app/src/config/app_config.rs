//! Runtime application configuration loaded from environment + defaults.

use std::path::PathBuf;
use std::time::Duration;

use qr_engine::ErrorCorrection;

use super::manager::SettingsManager;
use super::validation::parse_hex_color;
use crate::services::device::{DeviceHints, DeviceProfile};
use crate::services::size::TargetSize;

/// How the initial QR size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePreference {
    /// Pick from the device profile.
    Auto,
    Fixed(TargetSize),
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_size: SizePreference,
    pub device_profile: DeviceProfile,
    pub debounce: Duration,
    pub output_dir: PathBuf,
    pub foreground: [u8; 3],
    pub background: [u8; 3],
    pub error_correction: ErrorCorrection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_size: SizePreference::Auto,
            device_profile: DeviceProfile::Auto,
            debounce: Duration::from_millis(500),
            output_dir: default_output_dir(),
            foreground: [0, 0, 0],
            background: [255, 255, 255],
            error_correction: ErrorCorrection::M,
        }
    }
}

impl AppConfig {
    /// Load configuration from the settings manager.
    pub fn load(sm: &SettingsManager) -> Result<Self, anyhow::Error> {
        let defaults = Self::default();

        let default_size = match sm.get_setting("DEFAULT_SIZE")?.as_str() {
            "auto" => SizePreference::Auto,
            v => SizePreference::Fixed(TargetSize::new(v.parse()?)?),
        };

        let device_profile = match sm.get_setting("DEVICE_PROFILE")?.as_str() {
            "mobile" => DeviceProfile::Mobile,
            "desktop" => DeviceProfile::Desktop,
            _ => DeviceProfile::Auto,
        };

        let debounce = Duration::from_millis(parse_u64(&sm.get_setting("DEBOUNCE_MS")?, 500));

        let output_dir = {
            let dir = sm.get_setting("OUTPUT_DIR")?;
            if dir.is_empty() {
                defaults.output_dir
            } else {
                PathBuf::from(dir)
            }
        };

        Ok(Self {
            default_size,
            device_profile,
            debounce,
            output_dir,
            foreground: parse_hex_color(&sm.get_setting("FOREGROUND")?)
                .unwrap_or(defaults.foreground),
            background: parse_hex_color(&sm.get_setting("BACKGROUND")?)
                .unwrap_or(defaults.background),
            error_correction: ErrorCorrection::parse(&sm.get_setting("ERROR_CORRECTION")?)
                .unwrap_or_default(),
        })
    }

    /// Reload config from the settings manager.
    pub fn reload(&mut self, sm: &SettingsManager) -> Result<(), anyhow::Error> {
        *self = Self::load(sm)?;
        Ok(())
    }

    /// Size to start with, given what is known about the device.
    pub fn initial_size(&self, hints: &DeviceHints) -> TargetSize {
        match self.default_size {
            SizePreference::Fixed(size) => size,
            SizePreference::Auto => self.device_profile.resolve(hints).default_size(),
        }
    }
}

/// Downloads folder, falling back to the current directory.
fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn parse_u64(s: &str, default: u64) -> u64 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn manager(pairs: &[(&str, &str)]) -> SettingsManager {
        SettingsManager::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn load_defaults() {
        let config = AppConfig::load(&SettingsManager::default()).unwrap();
        assert_eq!(config.default_size, SizePreference::Auto);
        assert_eq!(config.device_profile, DeviceProfile::Auto);
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert_eq!(config.foreground, [0, 0, 0]);
        assert_eq!(config.background, [255, 255, 255]);
        assert_eq!(config.error_correction, ErrorCorrection::M);
    }

    #[test]
    fn load_from_env_snapshot() {
        let config = AppConfig::load(&manager(&[
            ("DEFAULT_SIZE", "1024"),
            ("DEVICE_PROFILE", "mobile"),
            ("DEBOUNCE_MS", "250"),
            ("OUTPUT_DIR", "/tmp/qr"),
            ("FOREGROUND", "#102030"),
            ("ERROR_CORRECTION", "H"),
        ]))
        .unwrap();
        assert_eq!(
            config.default_size,
            SizePreference::Fixed(TargetSize::new(1024).unwrap())
        );
        assert_eq!(config.device_profile, DeviceProfile::Mobile);
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/qr"));
        assert_eq!(config.foreground, [0x10, 0x20, 0x30]);
        assert_eq!(config.error_correction, ErrorCorrection::H);
    }

    #[test]
    fn initial_size_follows_device_when_auto() {
        let config = AppConfig::load(&manager(&[("DEVICE_PROFILE", "mobile")])).unwrap();
        assert_eq!(config.initial_size(&DeviceHints::default()).get(), 256);

        let config = AppConfig::load(&SettingsManager::default()).unwrap();
        assert_eq!(config.initial_size(&DeviceHints::default()).get(), 512);

        let iphone = DeviceHints {
            user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)".into(),
            ..DeviceHints::default()
        };
        assert_eq!(config.initial_size(&iphone).get(), 256);
    }

    #[test]
    fn fixed_size_ignores_device() {
        let config = AppConfig::load(&manager(&[("DEFAULT_SIZE", "128")])).unwrap();
        let iphone = DeviceHints {
            user_agent: "iPhone".into(),
            ..DeviceHints::default()
        };
        assert_eq!(config.initial_size(&iphone).get(), 128);
    }
}
