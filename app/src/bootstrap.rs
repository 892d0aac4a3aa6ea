use crate::config::{AppConfig, SettingsManager};

/// Foundation init: .env, settings, typed config, output directory.
///
/// `overrides` are `(key, value)` pairs from the command line; they win over
/// the environment and are validated the same way.
pub fn init_foundation(
    overrides: &[(&str, String)],
) -> Result<(AppConfig, SettingsManager), anyhow::Error> {
    load_dotenv();

    let sm = settings_with_overrides(overrides)?;
    let config = AppConfig::load(&sm)?;
    std::fs::create_dir_all(&config.output_dir)?;

    tracing::info!(
        output_dir = %config.output_dir.display(),
        debounce_ms = config.debounce.as_millis() as u64,
        "Settings loaded"
    );
    Ok((config, sm))
}

/// Snapshot settings from the environment and apply command-line overrides.
pub fn settings_with_overrides(
    overrides: &[(&str, String)],
) -> Result<SettingsManager, anyhow::Error> {
    let mut sm = SettingsManager::from_env();
    for (key, value) in overrides {
        sm.set_setting(key, value)?;
    }
    Ok(sm)
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}
