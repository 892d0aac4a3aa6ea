//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    (
        "DEFAULT_SIZE",
        "auto",
        "QR size in pixels (128, 256, 512, 1024) or 'auto' to pick by device",
    ),
    (
        "DEVICE_PROFILE",
        "auto",
        "Device profile used for the auto size: auto, mobile or desktop",
    ),
    (
        "DEBOUNCE_MS",
        "500",
        "Quiet period before regenerating after input changes",
    ),
    (
        "OUTPUT_DIR",
        "",
        "Directory exported files are written to (empty = Downloads)",
    ),
    ("FOREGROUND", "#000000", "QR module colour (#RRGGBB)"),
    ("BACKGROUND", "#FFFFFF", "QR background colour (#RRGGBB)"),
    ("ERROR_CORRECTION", "M", "QR error-correction level: L, M, Q or H"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

/// Setting keys in declaration order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    DEFS.iter().map(|&(key, _, _)| key)
}
