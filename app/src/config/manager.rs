//! SettingsManager: environment-backed settings with defaults and validation.

use std::collections::HashMap;

use super::defaults::{self, DEFAULT_SETTINGS};
use super::validation::validate_setting;
use super::{SettingInfo, SettingSource};

/// Prefix for environment variables carrying settings.
pub const ENV_PREFIX: &str = "QR_STUDIO_";

/// Resolves settings from explicit overrides, then the environment snapshot,
/// then the defaults table.
#[derive(Debug, Clone, Default)]
pub struct SettingsManager {
    env: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl SettingsManager {
    /// Build from an explicit environment snapshot (keys without prefix).
    pub fn new(env: HashMap<String, String>) -> Self {
        Self {
            env,
            overrides: HashMap::new(),
        }
    }

    /// Snapshot `QR_STUDIO_*` variables from the process environment.
    pub fn from_env() -> Self {
        let env = std::env::vars()
            .filter_map(|(k, v)| k.strip_prefix(ENV_PREFIX).map(|key| (key.to_string(), v)))
            .collect();
        Self::new(env)
    }

    /// Get a setting value. Invalid environment values fall back to the
    /// default with a warning.
    pub fn get_setting(&self, key: &str) -> Result<String, anyhow::Error> {
        let default = defaults::get_default(key)
            .ok_or_else(|| anyhow::anyhow!("setting not found: {key}"))?;

        if let Some(val) = self.overrides.get(key) {
            return Ok(val.clone());
        }
        if let Some(val) = self.env.get(key) {
            match validate_setting(key, val) {
                Ok(()) => return Ok(val.clone()),
                Err(e) => {
                    tracing::warn!(key, value = %val, "Ignoring invalid setting: {e}");
                }
            }
        }
        Ok(default.to_string())
    }

    /// Set a setting value with validation. Overrides take precedence over
    /// the environment.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        if !DEFAULT_SETTINGS.contains_key(key) {
            anyhow::bail!("unknown setting key: {key}");
        }
        validate_setting(key, value)
            .map_err(|e| anyhow::anyhow!("validation error for {key}: {e}"))?;
        self.overrides.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Describe every setting with its resolved value and origin.
    pub fn get_all_settings(&self) -> Vec<SettingInfo> {
        defaults::keys()
            .filter_map(|key| {
                let def = DEFAULT_SETTINGS.get(key)?;
                let source = if self.overrides.contains_key(key) {
                    SettingSource::Override
                } else if self
                    .env
                    .get(key)
                    .is_some_and(|v| validate_setting(key, v).is_ok())
                {
                    SettingSource::Environment
                } else {
                    SettingSource::Default
                };
                Some(SettingInfo {
                    key: key.to_string(),
                    value: self.get_setting(key).unwrap_or_default(),
                    source,
                    description: def.description.to_string(),
                })
            })
            .collect()
    }
}
