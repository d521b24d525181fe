//! Heightmap export command

use anyhow::{Context, Result};
use ridge_terrain::{FragmentIndex, HeightSampler, Heightmap, SimplexNoise, TerrainConfig};
use std::path::Path;

pub fn run(config: TerrainConfig, x: i32, y: i32, output: &str) -> Result<()> {
    config.validate()?;
    let index = FragmentIndex::new(x, y);
    let noise = SimplexNoise::new(config.seed);
    let sampler = HeightSampler::from_config(&config);
    let heightmap = Heightmap::generate(index, config.fragment_size, &sampler, &noise);

    heightmap
        .to_png(Path::new(output), config.noise_scale)
        .with_context(|| format!("Failed to export fragment {}", index))?;

    let (lo, hi) = heightmap.range();
    println!(
        "Wrote {}x{} heightmap for fragment {} to {} (elevation {:.3} .. {:.3})",
        heightmap.verts_per_edge(),
        heightmap.verts_per_edge(),
        index,
        output,
        lo,
        hi
    );
    Ok(())
}
