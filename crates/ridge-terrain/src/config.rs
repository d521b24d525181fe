//! Layered terrain configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `RIDGE_SEED`, `RIDGE_STREAM_RADIUS`, `RIDGE_FRAGMENT_SIZE`
//! 2. Project-local: `ridge.toml`
//! 3. Built-in defaults

use log::warn;
use ridge_core::{Color, Result, RidgeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Largest accepted fragment edge, in tiles
pub const MAX_FRAGMENT_SIZE: u32 = 4096;
/// Largest accepted streaming radius, in fragments
pub const MAX_STREAM_RADIUS: i32 = 64;

/// Terrain generation and streaming parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Number of tiles per fragment edge (vertices = size + 1)
    pub fragment_size: u32,
    /// Divisor applied to world coordinates before sampling noise
    pub noise_stretch: f64,
    /// Multiplier applied to noise output to get elevation
    pub noise_scale: f32,
    /// Half-width of the square window of fragments kept around the viewpoint
    pub stream_radius: i32,
    /// Noise seed shared by every fragment
    pub seed: u32,
    /// Flat vertex color
    pub terrain_color: Color,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            fragment_size: 100,
            noise_stretch: 40.0,
            noise_scale: 10.0,
            stream_radius: 2,
            seed: 0,
            terrain_color: Color::GRASS,
        }
    }
}

impl TerrainConfig {
    /// Load config with layered precedence: defaults < `ridge.toml` < env vars
    pub fn load() -> Result<Self> {
        let local_path = PathBuf::from("ridge.toml");
        let mut config = if local_path.exists() {
            Self::load_file(&local_path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file path, then apply env overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML, as written in `ridge.toml`
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value is usable for generation
    pub fn validate(&self) -> Result<()> {
        if self.fragment_size == 0 || self.fragment_size > MAX_FRAGMENT_SIZE {
            return Err(out_of_range(
                "fragment_size",
                1.0,
                MAX_FRAGMENT_SIZE as f64,
                self.fragment_size as f64,
            ));
        }
        if !(0..=MAX_STREAM_RADIUS).contains(&self.stream_radius) {
            return Err(out_of_range(
                "stream_radius",
                0.0,
                MAX_STREAM_RADIUS as f64,
                self.stream_radius as f64,
            ));
        }
        if !(self.noise_stretch.is_finite() && self.noise_stretch > 0.0) {
            return Err(out_of_range(
                "noise_stretch",
                f64::MIN_POSITIVE,
                f64::MAX,
                self.noise_stretch,
            ));
        }
        if !self.noise_scale.is_finite() {
            return Err(out_of_range(
                "noise_scale",
                f32::MIN as f64,
                f32::MAX as f64,
                self.noise_scale as f64,
            ));
        }
        Ok(())
    }

    /// Number of fragments in the streaming window
    pub fn window_len(&self) -> usize {
        let side = (2 * self.stream_radius + 1) as usize;
        side * side
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(seed) = env_override("RIDGE_SEED") {
            self.seed = seed;
        }
        if let Some(radius) = env_override("RIDGE_STREAM_RADIUS") {
            self.stream_radius = radius;
        }
        if let Some(size) = env_override("RIDGE_FRAGMENT_SIZE") {
            self.fragment_size = size;
        }
    }
}

fn env_override<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

fn out_of_range(field: &str, min: f64, max: f64, value: f64) -> RidgeError {
    RidgeError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ridge_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ridge.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        std::fs::remove_file(path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_defaults_match_reference_terrain() {
        let config = TerrainConfig::default();
        assert_eq!(config.fragment_size, 100);
        assert_eq!(config.noise_stretch, 40.0);
        assert_eq!(config.noise_scale, 10.0);
        assert_eq!(config.stream_radius, 2);
        assert_eq!(config.window_len(), 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let path = temp_config(
            r#"
noise_scale = 25.0
terrain_color = { r = 0.5, g = 0.4, b = 0.3 }
"#,
        );
        let config = TerrainConfig::load_file(&path).unwrap();

        assert_eq!(config.noise_scale, 25.0);
        assert_eq!(config.fragment_size, 100);
        assert_eq!(config.terrain_color, Color::rgb(0.5, 0.4, 0.3));

        cleanup(&path);
    }

    #[test]
    fn test_malformed_file_is_toml_parse_error() {
        let path = temp_config("fragment_size = \"big\"\n");
        let err = TerrainConfig::load_file(&path).unwrap_err();
        assert!(matches!(err, RidgeError::TomlParseError(_)));
        cleanup(&path);
    }

    #[test]
    fn test_env_var_override() {
        let path = temp_config("seed = 7\n");

        std::env::set_var("RIDGE_SEED", "1234");
        let config = TerrainConfig::load_from_file(&path).unwrap();
        std::env::remove_var("RIDGE_SEED");

        assert_eq!(config.seed, 1234);
        cleanup(&path);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = TerrainConfig {
            fragment_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(RidgeError::ValueOutOfRange { ref field, .. }) if field == "fragment_size"
        ));

        let negative = TerrainConfig {
            stream_radius: -1,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let flat = TerrainConfig {
            noise_stretch: 0.0,
            ..Default::default()
        };
        assert!(flat.validate().is_err());

        let nan = TerrainConfig {
            noise_scale: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let text = TerrainConfig::default().to_toml_string().unwrap();
        let parsed: TerrainConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, TerrainConfig::default());
    }
}
