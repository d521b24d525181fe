//! Ridge Terrain - Chunked procedural terrain streamed around a viewpoint
//!
//! Terrain is split into square fragments addressed by `FragmentIndex`. Each
//! fragment samples a shared noise source in world-absolute coordinates, so
//! neighbours agree exactly along their shared edges, then triangulates the
//! heightmap into an unindexed vertex stream with smoothed normals. `World`
//! keeps a window of fragments generated around the moving `Viewpoint`.
//! Does not depend on any renderer: fragments expose raw vertex data and a
//! placement transform for a render layer to upload.

pub mod config;
pub mod fragment;
pub mod heightmap;
pub mod index;
pub mod mesh;
pub mod noise_source;
pub mod viewpoint;
pub mod world;

pub use config::TerrainConfig;
pub use fragment::{RenderHandle, TerrainFragment};
pub use heightmap::{HeightSampler, Heightmap};
pub use index::FragmentIndex;
pub use mesh::{FragmentMesher, TerrainVertex};
pub use noise_source::{NoiseSource, SimplexNoise};
pub use viewpoint::Viewpoint;
pub use world::World;

#[cfg(test)]
mod tests {
    use super::*;
    use ridge_core::Vec3;
    use std::sync::Arc;

    fn small_config() -> TerrainConfig {
        TerrainConfig {
            fragment_size: 16,
            stream_radius: 1,
            seed: 99,
            ..Default::default()
        }
    }

    #[test]
    fn seams_match_between_neighbours() {
        let mut world = World::new(small_config()).unwrap();
        let a = FragmentIndex::new(-1, 3);
        let east = FragmentIndex::new(0, 3);
        let south = FragmentIndex::new(-1, 4);
        for index in [a, east, south] {
            world.generate_fragment(index);
        }

        let size = world.config().fragment_size as usize;
        let first = world.fragment(a).unwrap().heightmap();
        let east_map = world.fragment(east).unwrap().heightmap();
        let south_map = world.fragment(south).unwrap().heightmap();

        // Last column of `a` is the first column of its east neighbour
        assert_eq!(first.column(size), east_map.column(0));
        // Last row of `a` is the first row of its south neighbour
        assert_eq!(first.row(size), south_map.row(0));
    }

    #[test]
    fn seams_match_regardless_of_generation_order() {
        let config = small_config();
        let mut forward = World::new(config.clone()).unwrap();
        let mut backward = World::new(config).unwrap();
        let indices: Vec<_> = FragmentIndex::new(0, 0).window(1).collect();

        for &index in &indices {
            forward.generate_fragment(index);
        }
        for &index in indices.iter().rev() {
            backward.generate_fragment(index);
        }

        for index in indices {
            assert_eq!(
                forward.fragment(index).unwrap().heightmap(),
                backward.fragment(index).unwrap().heightmap()
            );
        }
    }

    #[test]
    fn normals_are_unit_length_on_noisy_terrain() {
        let mut world = World::new(small_config()).unwrap();
        world.move_viewpoint(Vec3::new(-30.0, 0.0, 12.0));
        assert_eq!(world.fragment_count(), 9);

        for fragment in world.fragments() {
            for v in fragment.vertices() {
                let len = Vec3::from_array(v.normal).length();
                assert!((len - 1.0).abs() < 1e-4, "normal length {}", len);
            }
        }
    }

    #[test]
    fn reference_sized_fragment_has_sixty_thousand_vertices() {
        let mut world = World::new(TerrainConfig::default()).unwrap();
        world.generate_fragment(FragmentIndex::new(0, 0));
        let fragment = world.fragment(FragmentIndex::new(0, 0)).unwrap();
        assert_eq!(fragment.vertex_count(), 6 * 100 * 100);
        assert_eq!(fragment.heightmap().heights().len(), 101 * 101);
    }

    #[test]
    fn flat_scenario_with_tiny_fragments() {
        let config = TerrainConfig {
            fragment_size: 2,
            ..Default::default()
        };
        let mut world = World::with_noise(config, Arc::new(|_: f64, _: f64| 0.0)).unwrap();
        world.generate_fragment(FragmentIndex::new(0, 0));
        let fragment = world.fragment(FragmentIndex::new(0, 0)).unwrap();

        assert!(fragment.heightmap().heights().iter().all(|&h| h == 0.0));
        assert_eq!(fragment.vertex_count(), 24);
        for v in fragment.vertices() {
            assert_eq!(v.position[1], 0.0);
            assert!((v.normal[1] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn window_around_origin_after_wandering() {
        let config = TerrainConfig {
            fragment_size: 10,
            stream_radius: 2,
            ..Default::default()
        };
        let mut world = World::with_noise(config, Arc::new(|x: f64, y: f64| (x * y).sin())).unwrap();

        // Wander east, generating fragments well outside the origin window
        for _ in 0..8 {
            world.move_viewpoint(Vec3::new(10.0, 0.0, 0.0));
        }
        world.set_viewpoint_position(Vec3::ZERO);
        assert!(world.fragment_count() > 25);

        let near = world.fragments_near();
        assert_eq!(near.len(), 25);
        for fragment in near {
            let index = fragment.index();
            assert!((-2..=2).contains(&index.x) && (-2..=2).contains(&index.y));
        }
    }
}
