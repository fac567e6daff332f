//! Analysis settings.
//!
//! Every threshold used by the pipeline is configurable through a JSON file.
//! Missing sections or fields fall back to the built-in defaults, so a file
//! only needs to list what it changes:
//!
//! ```json
//! { "filter": { "max_voltage": 9.0 } }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analysis::filters::ValidityFilter;
use crate::analysis::load::LoadThresholds;
use crate::analysis::regions::RegionThresholds;

/// Errors that can occur while loading settings
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    /// Failed to read the settings file
    #[error("Failed to read settings file: {0}")]
    Read(String),

    /// Failed to parse the settings file
    #[error("Failed to parse settings file: {0}")]
    Parse(String),

    /// A threshold is out of range or inconsistent with another
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
}

/// Thresholds for the filter and the analysis passes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub filter: ValidityFilter,
    #[serde(default)]
    pub regions: RegionThresholds,
    #[serde(default)]
    pub load: LoadThresholds,
}

fn default_version() -> u32 {
    1
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            filter: ValidityFilter::default(),
            regions: RegionThresholds::default(),
            load: LoadThresholds::default(),
        }
    }
}

impl AnalysisSettings {
    /// Get the config directory path for erpclog
    pub fn get_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("erpclog"))
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the default location, falling back to defaults
    /// when the file is absent or unusable.
    pub fn load() -> Self {
        let path = match Self::get_settings_path() {
            Some(p) => p,
            None => return Self::default(),
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate settings from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::Read(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_json(&content)?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(content).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize as pretty JSON, e.g. to print a settings template
    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Check that all thresholds are finite and correctly ordered
    pub fn validate(&self) -> Result<(), SettingsError> {
        let values = [
            ("filter.min_voltage", self.filter.min_voltage),
            ("filter.max_voltage", self.filter.max_voltage),
            ("regions.nominal_min", self.regions.nominal_min),
            ("regions.nominal_max", self.regions.nominal_max),
            ("regions.overvoltage_above", self.regions.overvoltage_above),
            ("regions.undervoltage_min", self.regions.undervoltage_min),
            ("regions.undervoltage_max", self.regions.undervoltage_max),
            ("load.light_below", self.load.light_below),
            ("load.heavy_from", self.load.heavy_from),
            ("load.transition_step", self.load.transition_step),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SettingsError::InvalidThreshold(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }

        let ordered = [
            (
                "filter.min_voltage < filter.max_voltage",
                self.filter.min_voltage < self.filter.max_voltage,
            ),
            (
                "regions.nominal_min <= regions.nominal_max",
                self.regions.nominal_min <= self.regions.nominal_max,
            ),
            (
                "regions.undervoltage_min < regions.undervoltage_max",
                self.regions.undervoltage_min < self.regions.undervoltage_max,
            ),
            (
                "load.light_below <= load.heavy_from",
                self.load.light_below <= self.load.heavy_from,
            ),
            (
                "load.transition_step >= 0",
                self.load.transition_step >= 0.0,
            ),
        ];
        if let Some((rule, _)) = ordered.iter().find(|(_, ok)| !ok) {
            return Err(SettingsError::InvalidThreshold(format!("expected {}", rule)));
        }

        Ok(())
    }
}
