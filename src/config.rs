// src/config.rs
//! Configuration stored as JSON in the user's config directory

use crate::error::{Result, TrackError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub stationary_radius_m: f64,
    pub stationary_min_duration_s: i64,
    pub smoothing_passes: usize,
    /// Fraction of the track, from its start, searched by `closest`
    pub closest_search_fraction: f64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            stationary_radius_m: 15.0,
            stationary_min_duration_s: 3 * 60,
            smoothing_passes: 2,
            closest_search_fraction: 1.0,
        }
    }
}

impl ToolsConfig {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| TrackError::Other(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| TrackError::Other(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TrackError::Other(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(config_path, contents)
            .map_err(|e| TrackError::Other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// `$HOME/.config/gps-path-tools/config.json`
    pub fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| TrackError::Other("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("gps-path-tools").join("config.json"))
    }

    /// Update stationary-segment detection settings
    pub fn update_stationary(&mut self, radius_m: f64, min_duration_s: i64) {
        self.stationary_radius_m = radius_m;
        self.stationary_min_duration_s = min_duration_s;
    }

    pub fn update_smoothing(&mut self, passes: usize) {
        self.smoothing_passes = passes;
    }

    /// Number of leading points `closest` should search in a track of `len` points
    pub fn closest_search_len(&self, len: usize) -> usize {
        let fraction = self.closest_search_fraction.clamp(0.0, 1.0);
        ((len as f64 * fraction).ceil() as usize).min(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_default_config() {
        let config = ToolsConfig::default();
        assert_eq!(config.stationary_radius_m, 15.0);
        assert_eq!(config.stationary_min_duration_s, 180);
        assert_eq!(config.smoothing_passes, 2);
    }

    #[test]
    fn test_update_stationary() {
        let mut config = ToolsConfig::default();
        config.update_stationary(10.0, 120);
        assert_eq!(config.stationary_radius_m, 10.0);
        assert_eq!(config.stationary_min_duration_s, 120);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new("config-missing").unwrap();
        let config = ToolsConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, ToolsConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new("config-save").unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = ToolsConfig::default();
        config.update_smoothing(4);
        config.save_to(&path).unwrap();

        assert_eq!(ToolsConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new("config-partial").unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "stationary_radius_m": 25.0 }"#).unwrap();

        let config = ToolsConfig::load_from(&path).unwrap();
        assert_eq!(config.stationary_radius_m, 25.0);
        assert_eq!(config.smoothing_passes, 2);
    }

    #[test]
    fn test_closest_search_len() {
        let mut config = ToolsConfig::default();
        assert_eq!(config.closest_search_len(9), 9);
        config.closest_search_fraction = 1.0 / 3.0;
        assert_eq!(config.closest_search_len(9), 3);
        config.closest_search_fraction = 5.0;
        assert_eq!(config.closest_search_len(9), 9);
    }
}
