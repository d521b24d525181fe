//! Fragment inspection command

use anyhow::Result;
use ridge_terrain::{FragmentIndex, TerrainConfig, TerrainFragment, World};
use serde::Serialize;

#[derive(Serialize)]
struct FragmentReport {
    index: FragmentIndex,
    origin: [f32; 3],
    center: [f32; 2],
    vertex_count: usize,
    triangle_count: usize,
    min_height: f32,
    max_height: f32,
}

impl FragmentReport {
    fn new(fragment: &TerrainFragment) -> Self {
        let (min_height, max_height) = fragment.heightmap().range();
        let (cx, cz) = fragment.center();
        let translation = fragment.world_matrix()[3];
        Self {
            index: fragment.index(),
            origin: [translation[0], translation[1], translation[2]],
            center: [cx, cz],
            vertex_count: fragment.vertex_count(),
            triangle_count: fragment.vertex_count() / 3,
            min_height,
            max_height,
        }
    }
}

pub fn run(config: TerrainConfig, x: i32, y: i32, format: &str) -> Result<()> {
    let index = FragmentIndex::new(x, y);
    let mut world = World::new(config)?;
    world.generate_fragment(index);

    let fragment = world
        .fragment(index)
        .ok_or_else(|| anyhow::anyhow!("Fragment {} was not generated", index))?;
    let report = FragmentReport::new(fragment);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => {
            println!("Fragment {}", report.index);
            println!(
                "  Origin:    [{:.2}, {:.2}, {:.2}]",
                report.origin[0], report.origin[1], report.origin[2]
            );
            println!("  Center:    [{:.2}, {:.2}]", report.center[0], report.center[1]);
            println!("  Vertices:  {}", report.vertex_count);
            println!("  Triangles: {}", report.triangle_count);
            println!(
                "  Elevation: {:.3} .. {:.3}",
                report.min_height, report.max_height
            );
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }

    Ok(())
}
