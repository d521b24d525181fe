//! Explore command

use anyhow::Result;
use ridge_core::Vec3;
use ridge_terrain::{TerrainConfig, World};

pub struct ExploreArgs {
    pub steps: u32,
    pub dx: f32,
    pub dz: f32,
    pub yaw: f32,
}

pub fn run(config: TerrainConfig, args: ExploreArgs) -> Result<()> {
    let mut world = World::new(config)?;

    let initial = world.stream();
    println!(
        "Start {}: generated {} fragment(s)",
        world.viewpoint_index(),
        initial
    );

    world.rotate_viewpoint(args.yaw, 0.0);
    let step = Vec3::new(args.dx, 0.0, args.dz);

    for i in 1..=args.steps {
        let generated = world.move_viewpoint(step);
        let (x, z) = world.viewpoint().horizontal();
        let height = world
            .height_at(x, z)
            .map(|h| format!("{:.2}", h))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "Step {:>3}: pos [{:.1}, {:.1}] fragment {} height {} new {} near {}",
            i,
            x,
            z,
            world.viewpoint_index(),
            height,
            generated,
            world.fragments_near().len()
        );
    }

    println!();
    println!("Fragments generated: {}", world.fragment_count());
    println!("Total vertices: {}", world.vertex_count());

    Ok(())
}
