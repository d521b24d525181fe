//! Config command

use anyhow::Result;
use ridge_terrain::TerrainConfig;

pub fn run(config: &TerrainConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
