use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::food::FoodPolicy;
use crate::grid::{Grid, GridError};
use crate::render::RenderStyle;
use crate::session::{self, SessionError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] serde_yaml_ng::Error),
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Game settings. Every field has a default, so a config file only needs
/// the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub surface_width: u32,
    pub surface_height: u32,
    /// Size of one block in surface units. Must divide both surface sides.
    pub block_size: u32,
    pub tick_interval_ms: u64,
    pub food_policy: FoodPolicy,
    pub render_style: RenderStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            surface_width: 400,
            surface_height: 400,
            block_size: 10,
            tick_interval_ms: 100,
            food_policy: FoodPolicy::default(),
            render_style: RenderStyle::default(),
        }
    }
}

impl Settings {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Settings::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        session::check_opening(&self.grid()?)?;
        Ok(())
    }

    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Ok(Grid::from_surface(self.surface_width, self.surface_height, self.block_size)?)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
