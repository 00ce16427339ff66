//! TOML configuration file accepted through `--config`.
//!
//! Every table is optional; missing values fall back to the built-in game.
//!
//! ```toml
//! [session]
//! time_limit_secs = 90.0
//! starting_coins = 15
//!
//! [layout]
//! padding = 20.0
//!
//! [crops.pumpkin]
//! name = "Pumpkin"
//! color = { red = 255, green = 255, blue = 0 }
//! growth_duration = 8.0
//! water_boost = 3.0
//! cost = 3
//! score = 40
//! yield = 5
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use farm_dash_core::{CropTable, CropTableError, SessionConfig};
use farm_dash_system_layout::{LayoutConstants, LayoutError};
use serde::Deserialize;
use thiserror::Error;

/// Settings assembled from the configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameSettings {
    /// Round length and starting balance.
    pub(crate) session: SessionConfig,
    /// Canvas and grid measurements.
    pub(crate) layout: LayoutConstants,
    /// Crop catalogue.
    pub(crate) crops: CropTable,
}

impl GameSettings {
    /// Reads and validates the settings stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses and validates settings from TOML text.
    pub(crate) fn parse(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.try_time_limit().is_none() {
            return Err(ConfigError::InvalidTimeLimit {
                seconds: self.session.time_limit_secs,
            });
        }
        self.crops.validate()?;
        self.layout.validate()?;
        Ok(())
    }
}

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        /// Location of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML or does not match the expected tables.
    #[error("malformed configuration")]
    Parse(#[from] toml::de::Error),
    /// A crop definition is unusable.
    #[error(transparent)]
    Crops(#[from] CropTableError),
    /// The layout constants cannot host a grid.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// The round would end before it started.
    #[error("time limit must be a positive number of seconds (received {seconds})")]
    InvalidTimeLimit {
        /// Configured time limit.
        seconds: f32,
    },
}
