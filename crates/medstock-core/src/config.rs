//! User settings.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::inventory::DEFAULT_THRESHOLD_DAYS;

/// Per-user inventory settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Days before expiry at which a record is flagged as expiring soon
    pub threshold_days: i64,
    /// Whether the user wants expiry notifications (consumed by the UI)
    pub notifications_enabled: bool,
    /// Sort records by ascending expiry date after each full load
    pub sort_by_expiry_on_load: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold_days: DEFAULT_THRESHOLD_DAYS,
            notifications_enabled: true,
            sort_by_expiry_on_load: false,
        }
    }
}

impl Settings {
    /// Parse settings from TOML. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(contents).context("Failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file, falling back to defaults if it doesn't exist.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(Settings::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    /// Save settings as TOML.
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, toml_string).context("Failed to write settings file")?;
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.threshold_days < 0 {
            bail!("threshold_days must be >= 0, got {}", self.threshold_days);
        }
        Ok(())
    }
}
