//! A single generated square of terrain

use std::sync::OnceLock;

use log::debug;
use ridge_core::{Result, RidgeError, Transform, Vec3};

use crate::heightmap::{HeightSampler, Heightmap};
use crate::index::FragmentIndex;
use crate::mesh::{FragmentMesher, TerrainVertex};
use crate::noise_source::NoiseSource;

/// Opaque handle owned by the render layer (e.g. a GPU buffer id)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u64);

/// One chunk of terrain: its heightmap, triangle stream and world placement.
///
/// Immutable once built, apart from the render handle slot which the render
/// layer may fill in once.
#[derive(Debug)]
pub struct TerrainFragment {
    index: FragmentIndex,
    heightmap: Heightmap,
    vertices: Vec<TerrainVertex>,
    world_transform: Transform,
    aabb_min: [f32; 3],
    aabb_max: [f32; 3],
    render_handle: OnceLock<RenderHandle>,
}

impl TerrainFragment {
    /// Sample, triangulate and place the fragment at `index`
    pub fn generate(
        index: FragmentIndex,
        size: u32,
        sampler: &HeightSampler,
        mesher: &FragmentMesher,
        noise: &dyn NoiseSource,
    ) -> Self {
        let heightmap = Heightmap::generate(index, size, sampler, noise);
        Self::from_heightmap(index, heightmap, mesher)
    }

    /// Build a fragment around an existing heightmap
    pub fn from_heightmap(index: FragmentIndex, heightmap: Heightmap, mesher: &FragmentMesher) -> Self {
        let vertices = mesher.build(&heightmap);
        let (origin_x, origin_z) = index.origin(heightmap.size);
        let world_transform = Transform::from_position(Vec3::new(origin_x, 0.0, origin_z));

        let (lo, hi) = heightmap.range();
        let extent = heightmap.size as f32;
        let aabb_min = [0.0, lo, 0.0];
        let aabb_max = [extent, hi, extent];

        debug!(
            "Generated terrain fragment {} with {} vertices and origin [{:.2}, {:.2}]",
            index,
            vertices.len(),
            origin_x,
            origin_z
        );

        Self {
            index,
            heightmap,
            vertices,
            world_transform,
            aabb_min,
            aabb_max,
            render_handle: OnceLock::new(),
        }
    }

    pub fn index(&self) -> FragmentIndex {
        self.index
    }

    pub fn heightmap(&self) -> &Heightmap {
        &self.heightmap
    }

    /// Unindexed triangle list in fragment-local space
    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex stream as raw bytes, ready for a vertex buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Places the local origin at `(index.x * size, 0, index.y * size)`
    pub fn world_transform(&self) -> &Transform {
        &self.world_transform
    }

    /// Model matrix for the render layer (column-major)
    pub fn world_matrix(&self) -> [[f32; 4]; 4] {
        self.world_transform.to_matrix()
    }

    pub fn normal_matrix(&self) -> [[f32; 3]; 3] {
        self.world_transform.normal_matrix()
    }

    /// Local-space bounding box `(min, max)`
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        (self.aabb_min, self.aabb_max)
    }

    /// World-space horizontal center
    pub fn center(&self) -> (f32, f32) {
        let half = self.heightmap.size as f32 / 2.0;
        let origin = self.world_transform.position;
        (origin.x + half, origin.z + half)
    }

    /// Elevation at a world position, if it lies on this fragment
    pub fn height_at(&self, world_x: f32, world_z: f32) -> Option<f32> {
        let origin = self.world_transform.position;
        self.heightmap.sample(world_x - origin.x, world_z - origin.z)
    }

    /// Record the render layer's handle for this fragment. Fails if one is
    /// already attached.
    pub fn attach_render_handle(&self, handle: RenderHandle) -> Result<()> {
        self.render_handle
            .set(handle)
            .map_err(|_| RidgeError::RenderHandleAlreadyAttached {
                x: self.index.x,
                y: self.index.y,
            })
    }

    pub fn render_handle(&self) -> Option<RenderHandle> {
        self.render_handle.get().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(index: FragmentIndex, size: u32, noise: &dyn NoiseSource) -> TerrainFragment {
        TerrainFragment::generate(
            index,
            size,
            &HeightSampler::default(),
            &FragmentMesher::default(),
            noise,
        )
    }

    #[test]
    fn placement_follows_index() {
        let frag = build(FragmentIndex::new(-1, 2), 10, &|_: f64, _: f64| 0.0);
        assert_eq!(frag.world_transform().position, Vec3::new(-10.0, 0.0, 20.0));
        assert_eq!(frag.world_matrix()[3], [-10.0, 0.0, 20.0, 1.0]);
        assert_eq!(frag.center(), (-5.0, 25.0));
        assert_eq!(frag.vertex_count(), 600);
        assert_eq!(frag.vertex_bytes().len(), 600 * TerrainVertex::STRIDE * 4);
    }

    #[test]
    fn positions_stay_local() {
        let frag = build(FragmentIndex::new(5, 5), 2, &|_: f64, _: f64| 0.0);
        for v in frag.vertices() {
            assert!(v.position[0] >= 0.0 && v.position[0] <= 2.0);
            assert!(v.position[2] >= 0.0 && v.position[2] <= 2.0);
        }
    }

    #[test]
    fn bounds_cover_elevation_range() {
        let noise = |x: f64, _: f64| if x > 0.0 { 1.0 } else { -0.5 };
        let frag = build(FragmentIndex::new(0, 0), 4, &noise);
        let (min, max) = frag.bounds();
        assert_eq!(min, [0.0, -5.0, 0.0]);
        assert_eq!(max, [4.0, 10.0, 4.0]);
    }

    #[test]
    fn height_at_uses_world_coordinates() {
        let noise = |x: f64, _: f64| x / 100.0;
        let frag = TerrainFragment::generate(
            FragmentIndex::new(1, 0),
            10,
            &HeightSampler::new(1.0, 1.0),
            &FragmentMesher::default(),
            &noise,
        );
        assert!((frag.height_at(12.0, 3.0).unwrap() - 0.12).abs() < 1e-5);
        assert!((frag.height_at(15.5, 9.0).unwrap() - 0.155).abs() < 1e-5);
        assert_eq!(frag.height_at(9.0, 3.0), None);
        assert_eq!(frag.height_at(12.0, -1.0), None);
    }

    #[test]
    fn render_handle_attaches_once() {
        let frag = build(FragmentIndex::new(0, 0), 1, &|_: f64, _: f64| 0.0);
        assert_eq!(frag.render_handle(), None);

        frag.attach_render_handle(RenderHandle(7)).unwrap();
        assert_eq!(frag.render_handle(), Some(RenderHandle(7)));

        let err = frag.attach_render_handle(RenderHandle(8)).unwrap_err();
        assert!(matches!(
            err,
            RidgeError::RenderHandleAlreadyAttached { x: 0, y: 0 }
        ));
        assert_eq!(frag.render_handle(), Some(RenderHandle(7)));
    }

    #[test]
    fn translation_only_normal_matrix_is_identity() {
        let frag = build(FragmentIndex::new(3, -3), 1, &|_: f64, _: f64| 0.0);
        assert_eq!(
            frag.normal_matrix(),
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        );
    }
}
