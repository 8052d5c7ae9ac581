//! Configuration types for the simulation.

use crate::{rules, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world grid
    pub width: usize,
    /// Height of the world grid
    pub height: usize,
    /// Random seed for reproducibility; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Share of cells populated at start (0.0 to 1.0)
    pub population_density: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 16,
            seed: None,
            population_density: rules::POPULATION_DENSITY,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.population_density) {
            return Err(Error::InvalidConfig(format!(
                "population_density must be within 0.0..=1.0, got {}",
                self.population_density
            )));
        }
        Ok(())
    }
}

/// Terminal runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// World configuration
    pub world: WorldConfig,
    /// Frames (ticks) per second
    pub fps: u32,
    /// Stop after this many ticks; run until interrupted when absent
    pub max_ticks: Option<u64>,
    /// Tint glyphs with ANSI colors
    pub color: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            fps: 10,
            max_ticks: None,
            color: true,
        }
    }
}

impl RunnerConfig {
    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(Error::InvalidConfig("fps must be positive".to_string()));
        }
        self.world.validate()
    }
}
