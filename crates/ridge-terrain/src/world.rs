//! Fragment store and viewpoint-driven streaming

use std::collections::HashMap;
use std::sync::Arc;

use log::info;
use ridge_core::{Result, Vec3};

use crate::config::TerrainConfig;
use crate::fragment::TerrainFragment;
use crate::heightmap::HeightSampler;
use crate::index::FragmentIndex;
use crate::mesh::FragmentMesher;
use crate::noise_source::{NoiseSource, SimplexNoise};
use crate::viewpoint::Viewpoint;

/// Owns every generated fragment and the viewpoint they are streamed around.
///
/// Fragments are generated synchronously on the calling thread and are never
/// evicted, so memory grows with the area explored.
pub struct World {
    config: TerrainConfig,
    noise: Arc<dyn NoiseSource>,
    sampler: HeightSampler,
    mesher: FragmentMesher,
    viewpoint: Viewpoint,
    fragments: HashMap<FragmentIndex, TerrainFragment>,
}

impl World {
    /// Create a world using OpenSimplex noise seeded from the config
    pub fn new(config: TerrainConfig) -> Result<Self> {
        let noise = Arc::new(SimplexNoise::new(config.seed));
        Self::with_noise(config, noise)
    }

    /// Create a world over any noise source
    pub fn with_noise(config: TerrainConfig, noise: Arc<dyn NoiseSource>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sampler: HeightSampler::from_config(&config),
            mesher: FragmentMesher::new(config.terrain_color),
            viewpoint: Viewpoint::new(),
            fragments: HashMap::new(),
            noise,
            config,
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn viewpoint(&self) -> &Viewpoint {
        &self.viewpoint
    }

    /// Index of the fragment under the viewpoint
    pub fn viewpoint_index(&self) -> FragmentIndex {
        let (x, z) = self.viewpoint.horizontal();
        self.index_of(x, z)
    }

    pub fn index_of(&self, x: f32, z: f32) -> FragmentIndex {
        FragmentIndex::containing(x, z, self.config.fragment_size)
    }

    /// Move the viewpoint by a heading-relative delta and generate any missing
    /// fragment in the window around it. Returns how many were generated.
    pub fn move_viewpoint(&mut self, delta: Vec3) -> usize {
        let before = self.viewpoint_index();
        self.viewpoint.move_by(delta);
        let after = self.viewpoint_index();

        let generated = self.stream();
        if generated > 0 {
            info!(
                "Viewpoint moved {} -> {}: generated {} fragment(s), {} total",
                before,
                after,
                generated,
                self.fragments.len()
            );
        }
        generated
    }

    /// Teleport the viewpoint and stream around its new position
    pub fn set_viewpoint_position(&mut self, position: Vec3) -> usize {
        self.viewpoint.set_position(position.x, position.y, position.z);
        self.stream()
    }

    /// Turn the viewpoint. Orientation never changes which fragments are needed.
    pub fn rotate_viewpoint(&mut self, dyaw: f32, dpitch: f32) {
        self.viewpoint.rotate(dyaw, dpitch);
    }

    /// Generate every missing fragment in the window around the viewpoint
    pub fn stream(&mut self) -> usize {
        let center = self.viewpoint_index();
        let mut generated = 0;
        for index in center.window(self.config.stream_radius) {
            if self.generate_fragment(index) {
                generated += 1;
            }
        }
        generated
    }

    /// Generate the fragment at `index` unless it already exists.
    /// Returns `true` if a new fragment was built.
    pub fn generate_fragment(&mut self, index: FragmentIndex) -> bool {
        if self.fragments.contains_key(&index) {
            return false;
        }
        let fragment = TerrainFragment::generate(
            index,
            self.config.fragment_size,
            &self.sampler,
            &self.mesher,
            self.noise.as_ref(),
        );
        self.fragments.insert(index, fragment);
        true
    }

    /// Generated fragments in the window around the viewpoint
    pub fn fragments_near(&self) -> Vec<&TerrainFragment> {
        let (x, z) = self.viewpoint.horizontal();
        self.fragments_near_position(x, z)
    }

    /// Generated fragments in the window around an arbitrary position
    pub fn fragments_near_position(&self, x: f32, z: f32) -> Vec<&TerrainFragment> {
        self.index_of(x, z)
            .window(self.config.stream_radius)
            .filter_map(|index| self.fragments.get(&index))
            .collect()
    }

    pub fn fragment(&self, index: FragmentIndex) -> Option<&TerrainFragment> {
        self.fragments.get(&index)
    }

    /// The fragment covering `(x, z)`, if generated
    pub fn fragment_at(&self, x: f32, z: f32) -> Option<&TerrainFragment> {
        self.fragments.get(&self.index_of(x, z))
    }

    /// Terrain elevation at `(x, z)`, if its fragment is generated
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        self.fragment_at(x, z)?.height_at(x, z)
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Every generated fragment, in no particular order
    pub fn fragments(&self) -> impl Iterator<Item = &TerrainFragment> {
        self.fragments.values()
    }

    /// Total vertices across all generated fragments
    pub fn vertex_count(&self) -> usize {
        self.fragments.values().map(|f| f.vertex_count()).sum()
    }
}
