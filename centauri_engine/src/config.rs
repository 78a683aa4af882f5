//! Game tuning loaded from `centauri.toml`.
//!
//! Every field has a default, so a partial file only overrides what it names.
//! A missing or unreadable file is never fatal: the defaults are used instead.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Default location of the configuration file, relative to the working directory.
pub const CONFIG_FILE: &str = "centauri.toml";

/// Tunable constants for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum (and starting) oxygen.
    pub starting_oxygen: u32,
    /// Maximum (and starting) energy.
    pub starting_energy: u32,
    /// How many rooms get a malfunction that must be hacked.
    pub fix_targets: usize,
    /// How many rooms get a hull breach on first entry.
    pub quick_targets: usize,
    /// Permanent max-energy bonus for each malfunction cleared.
    pub energy_reward: u32,
    /// Milliseconds between oxygen ticks during a hull breach.
    pub hazard_tick_ms: u64,
    /// Legal moves per point of ambient oxygen use; 0 disables.
    pub moves_per_oxygen: u32,
    /// Where `save` writes when no path is given.
    pub save_path: PathBuf,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_oxygen: 10,
            starting_energy: 10,
            fix_targets: 3,
            quick_targets: 2,
            energy_reward: 1,
            hazard_tick_ms: 1000,
            moves_per_oxygen: 4,
            save_path: PathBuf::from("centauri.sav"),
            seed: None,
        }
    }
}
impl GameConfig {
    pub fn hazard_tick(&self) -> Duration {
        Duration::from_millis(self.hazard_tick_ms.max(1))
    }
}

/// Parse a configuration from TOML text.
///
/// # Errors
/// - on TOML syntax errors or mistyped fields
pub fn parse_config(raw: &str) -> Result<GameConfig> {
    toml::from_str(raw).context("parsing game configuration")
}

/// Load configuration from `path`, falling back to defaults on any problem.
pub fn load_config(path: &Path) -> GameConfig {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!("no config at '{}', using defaults", path.display());
            return GameConfig::default();
        },
        Err(err) => {
            warn!("failed to read config '{}': {err}; using defaults", path.display());
            return GameConfig::default();
        },
    };
    match parse_config(&raw) {
        Ok(config) => {
            info!("game configuration loaded from '{}'", path.display());
            config
        },
        Err(err) => {
            warn!("{err:#} ('{}'); using defaults", path.display());
            GameConfig::default()
        },
    }
}
