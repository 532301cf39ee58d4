//! Driver configuration and environment overrides.

#![deny(static_mut_refs)]

use serde::{Deserialize, Serialize};
use tracing::warn;

const HIGH_RESOLUTION_ENV: &str = "HID_GENERIC_HIGH_RESOLUTION";
const IGNORE_SPECIAL_DRIVER_ENV: &str = "HID_GENERIC_IGNORE_SPECIAL_DRIVER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Discover and program resolution multipliers. When off the driver runs
    /// with plain detents: no multiplier is written and no high-resolution
    /// capability is declared.
    pub high_resolution: bool,
    /// Bind even when a specialised driver exists for the device.
    pub ignore_special_driver: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            high_resolution: true,
            ignore_special_driver: false,
        }
    }
}

impl DriverConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup. Unrecognised values are logged and
    /// leave the setting unchanged.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(HIGH_RESOLUTION_ENV) {
            apply_bool(&mut self.high_resolution, HIGH_RESOLUTION_ENV, &v);
        }
        if let Some(v) = lookup(IGNORE_SPECIAL_DRIVER_ENV) {
            apply_bool(&mut self.ignore_special_driver, IGNORE_SPECIAL_DRIVER_ENV, &v);
        }
        self
    }
}

fn apply_bool(target: &mut bool, key: &str, value: &str) {
    match parse_bool(value) {
        Some(b) => *target = b,
        None => warn!("Ignoring {}={:?}: expected a boolean", key, value),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enable" | "enabled" => Some(true),
        "0" | "false" | "no" | "off" | "disable" | "disabled" => Some(false),
        _ => None,
    }
}
