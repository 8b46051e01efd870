//! Configuration loading and representation.

use serde::{Deserialize, Serialize};

use crate::central::CentralError;

/// Environment variable overriding [`ShipperConfig::batch_size`].
pub const BATCH_SIZE_VAR: &str = "INVSYNC_BATCH_SIZE";

/// Bulk shipping configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipperConfig {
    /// Maximum number of actions per `ship_bulk_actions` call.
    pub batch_size: usize,
}

impl Default for ShipperConfig {
    fn default() -> Self {
        Self { batch_size: 500 }
    }
}

impl ShipperConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, CentralError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through `lookup`; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CentralError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(BATCH_SIZE_VAR) {
            let batch_size: usize = raw.trim().parse().map_err(|e| {
                CentralError::Config(format!("{BATCH_SIZE_VAR}=`{raw}`: {e}"))
            })?;
            config.batch_size = batch_size;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CentralError> {
        if self.batch_size == 0 {
            return Err(CentralError::Config("batch_size must be at least 1".to_string()));
        }
        Ok(())
    }
}
