//! Runtime settings for the headless simulation driver.

use crate::weapon::WeaponPreset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration for one or more simulated runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Frames to simulate per run
    pub frames: u64,

    /// Seconds per frame
    pub dt: f64,

    /// Seed for the first run; run `n` uses `seed + n`
    pub seed: u64,

    /// Number of independent runs
    pub runs: u32,

    /// Take the first available talent whenever a level-up is pending
    pub auto_pick_talents: bool,

    /// Let the equipped weapon fire on its own when something is in range
    pub auto_attack: bool,

    /// Weapons the player starts with, first one equipped
    pub starting_weapons: Vec<WeaponPreset>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frames: 36_000,
            dt: 1.0 / 60.0,
            seed: 42,
            runs: 1,
            auto_pick_talents: true,
            auto_attack: true,
            starting_weapons: vec![WeaponPreset::Sword, WeaponPreset::Bow],
        }
    }
}

impl SimConfig {
    /// A minute of play, for smoke tests.
    pub fn quick() -> Self {
        Self {
            frames: 3_600,
            ..Default::default()
        }
    }

    /// Many ten-minute runs for balance numbers.
    pub fn balance_sweep(runs: u32) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    /// Ranged-only loadout.
    pub fn archer() -> Self {
        Self {
            starting_weapons: vec![WeaponPreset::Bow, WeaponPreset::Crossbow],
            ..Default::default()
        }
    }

    /// Parses and validates a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if self.frames == 0 {
            return Err(ConfigError::Invalid("frames must be at least 1".into()));
        }
        if self.runs == 0 {
            return Err(ConfigError::Invalid("runs must be at least 1".into()));
        }
        Ok(())
    }

    /// Simulated seconds per run.
    pub fn duration_seconds(&self) -> f64 {
        self.frames as f64 * self.dt
    }
}
