//! Heightmap triangulation with smoothed vertex normals

use bytemuck::{Pod, Zeroable};
use ridge_core::{Color, Vec3};

use crate::heightmap::Heightmap;

/// One vertex of the terrain triangle stream, laid out for direct GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl TerrainVertex {
    /// Floats per vertex
    pub const STRIDE: usize = 9;
}

/// Builds unindexed triangle lists from heightmaps
#[derive(Clone, Copy, Debug)]
pub struct FragmentMesher {
    pub color: Color,
}

impl Default for FragmentMesher {
    fn default() -> Self {
        Self { color: Color::GRASS }
    }
}

impl FragmentMesher {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    /// Triangulate `heightmap` into `6 * size * size` vertices.
    ///
    /// Each cell emits `(top_right, top_left, bottom_left)` then
    /// `(bottom_left, bottom_right, top_right)`, counter-clockwise seen from above.
    /// Positions are fragment-local `(column, height, row)`.
    pub fn build(&self, heightmap: &Heightmap) -> Vec<TerrainVertex> {
        let size = heightmap.size as usize;
        let verts = heightmap.verts_per_edge();
        let color = self.color.to_rgb_array();

        let normals: Vec<[f32; 3]> = (0..verts)
            .flat_map(|i| (0..verts).map(move |j| (i, j)))
            .map(|(i, j)| vertex_normal(heightmap, i, j).to_array())
            .collect();

        let vertex = |i: usize, j: usize| TerrainVertex {
            position: grid_point(heightmap, i, j).to_array(),
            normal: normals[i * verts + j],
            color,
        };

        let mut vertices = Vec::with_capacity(6 * size * size);
        for i in 0..size {
            for j in 0..size {
                let top_left = vertex(i, j);
                let top_right = vertex(i, j + 1);
                let bottom_left = vertex(i + 1, j);
                let bottom_right = vertex(i + 1, j + 1);

                vertices.extend_from_slice(&[
                    top_right,
                    top_left,
                    bottom_left,
                    bottom_left,
                    bottom_right,
                    top_right,
                ]);
            }
        }
        vertices
    }
}

/// Local-space position of grid point `(i, j)`
pub fn grid_point(heightmap: &Heightmap, i: usize, j: usize) -> Vec3 {
    Vec3::new(j as f32, heightmap.get(i, j), i as f32)
}

/// Normal of a quad from its diagonals, oriented to the side its triangles face
pub fn face_normal(top_left: Vec3, top_right: Vec3, bottom_left: Vec3, bottom_right: Vec3) -> Vec3 {
    (bottom_left - top_right)
        .cross(&(bottom_right - top_left))
        .normalized_or(Vec3::UP)
}

/// Normalized sum of the face normals of the up to four quads touching `(i, j)`
pub fn vertex_normal(heightmap: &Heightmap, i: usize, j: usize) -> Vec3 {
    let last = heightmap.size as usize;
    let p = |i: usize, j: usize| grid_point(heightmap, i, j);
    let mut sum = Vec3::ZERO;

    if i > 0 && j > 0 {
        sum += face_normal(p(i - 1, j - 1), p(i - 1, j), p(i, j - 1), p(i, j));
    }
    if i > 0 && j < last {
        sum += face_normal(p(i - 1, j), p(i - 1, j + 1), p(i, j), p(i, j + 1));
    }
    if i < last && j > 0 {
        sum += face_normal(p(i, j - 1), p(i, j), p(i + 1, j - 1), p(i + 1, j));
    }
    if i < last && j < last {
        sum += face_normal(p(i, j), p(i, j + 1), p(i + 1, j), p(i + 1, j + 1));
    }

    sum.normalized_or(Vec3::UP)
}
