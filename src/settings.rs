//! Demo settings with persistence
//!
//! Settings are read from `~/.config/lockon/settings.toml` unless a path is
//! given on the command line.

use std::fs;
use std::path::{Path, PathBuf};

use lockon_core::TimeConfig;
use lockon_game::{CameraConfig, TargetConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All demo settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub targeting: TargetConfig,
    pub camera: CameraConfig,
    pub time: TimeConfig,
    pub arena: ArenaSettings,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lockon"))
    }

    /// Default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from `path` (or the default location), falling back to
    /// defaults when the file is missing or unreadable
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::settings_path() {
                Some(path) => path,
                None => {
                    warn!("Could not determine config directory");
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse settings from TOML text. Missing sections and fields keep their defaults.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to `path` (or the default location)
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let Some(path) = Self::settings_path() else {
                    anyhow::bail!("Could not determine config directory");
                };
                path
            }
        };

        // Create config directory if it doesn't exist
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(path)
    }
}

/// Arena layout and simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Seed for enemy placement
    pub seed: u64,
    /// Number of enemies spawned in front of the player
    pub enemy_count: usize,
    /// Distance of the enemy arc from the player
    pub ring_radius: f32,
    /// Random radial offset applied to each enemy
    pub radius_jitter: f32,
    /// Width of the enemy arc in degrees, centred on the player's facing
    pub arc_degrees: f32,
    /// Radius of the collision sphere standing in for each entity
    pub proxy_radius: f32,
    /// How far the player strafes to get behind cover
    pub strafe_distance: f32,
    /// Simulated frames per second
    pub frame_rate: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            seed: 7,
            enemy_count: 6,
            ring_radius: 8.0,
            radius_jitter: 1.5,
            arc_degrees: 120.0,
            proxy_radius: 0.5,
            strafe_distance: 3.0,
            frame_rate: 60.0,
        }
    }
}
