//! CLI command implementations

pub mod config;
pub mod explore;
pub mod fragment;
pub mod heightmap;

use anyhow::{Context, Result};
use ridge_terrain::TerrainConfig;
use std::path::Path;

/// Resolve the terrain config from an explicit file or the layered defaults,
/// then apply command-line overrides
pub fn load_config(path: Option<&str>, seed: Option<u32>) -> Result<TerrainConfig> {
    let mut config = match path {
        Some(path) => TerrainConfig::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config '{}'", path))?,
        None => TerrainConfig::load().context("Failed to load config")?,
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    Ok(config)
}
