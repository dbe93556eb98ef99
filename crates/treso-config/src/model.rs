use serde::{Deserialize, Serialize};

use treso_core::{ProjectionSettings, DEFAULT_BUCKET_DAYS, DEFAULT_HORIZON_DAYS};
use treso_domain::SOURCE_PREVISIONNEL;

use crate::ConfigError;

/// Horizons offered by the forecast screen selector.
pub const SUGGESTED_HORIZONS: [u32; 3] = [30, 60, 90];

/// Stores user-configurable forecast preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_horizon_days")]
    pub horizon_days: u32,
    #[serde(default = "Config::default_bucket_days")]
    pub bucket_days: u32,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_source_value")]
    pub default_source: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "fr-FR".into(),
            currency: "FCFA".into(),
            horizon_days: Self::default_horizon_days(),
            bucket_days: Self::default_bucket_days(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            default_source: Self::default_source_value(),
        }
    }
}

impl Config {
    pub fn default_horizon_days() -> u32 {
        DEFAULT_HORIZON_DAYS
    }

    pub fn default_bucket_days() -> u32 {
        DEFAULT_BUCKET_DAYS
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_source_value() -> String {
        SOURCE_PREVISIONNEL.into()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency.trim().is_empty() {
            return Err(ConfigError::Invalid("currency must not be empty".into()));
        }
        self.projection_settings().map(|_| ())
    }

    pub fn projection_settings(&self) -> Result<ProjectionSettings, ConfigError> {
        ProjectionSettings::new(self.horizon_days, self.bucket_days)
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }
}
