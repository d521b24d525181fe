//! Heightmap sampling from noise

use std::path::Path;

use ridge_core::{Result, RidgeError};

use crate::config::TerrainConfig;
use crate::index::FragmentIndex;
use crate::noise_source::NoiseSource;

/// Converts noise into elevation: `noise(x / stretch, y / stretch) * scale`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightSampler {
    /// Horizontal stretch; larger values give broader hills
    pub stretch: f64,
    /// Vertical scale; noise in `[-1, 1]` maps to `[-scale, scale]`
    pub scale: f32,
}

impl Default for HeightSampler {
    fn default() -> Self {
        Self {
            stretch: 40.0,
            scale: 10.0,
        }
    }
}

impl HeightSampler {
    pub fn new(stretch: f64, scale: f32) -> Self {
        Self { stretch, scale }
    }

    pub fn from_config(config: &TerrainConfig) -> Self {
        Self::new(config.noise_stretch, config.noise_scale)
    }

    /// Elevation at absolute world coordinates
    pub fn elevation(&self, noise: &dyn NoiseSource, world_x: f64, world_y: f64) -> f32 {
        noise.sample(world_x / self.stretch, world_y / self.stretch) as f32 * self.scale
    }
}

/// A square grid of elevation samples, `(size + 1) × (size + 1)`, row-major.
///
/// Row `i` runs along world Z ("south"), column `j` along world X ("east").
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
    heights: Vec<f32>,
    /// Tiles per edge; the grid has `size + 1` samples per edge
    pub size: u32,
}

impl Heightmap {
    /// Sample the heightmap of fragment `index` in world-absolute coordinates,
    /// so neighbouring fragments produce identical values on shared edges.
    pub fn generate(
        index: FragmentIndex,
        size: u32,
        sampler: &HeightSampler,
        noise: &dyn NoiseSource,
    ) -> Self {
        let verts = size as usize + 1;
        let (origin_x, origin_y) = index.origin(size);
        let mut heights = Vec::with_capacity(verts * verts);

        for i in 0..verts {
            for j in 0..verts {
                let world_x = origin_x as f64 + j as f64;
                let world_y = origin_y as f64 + i as f64;
                heights.push(sampler.elevation(noise, world_x, world_y));
            }
        }

        Self { heights, size }
    }

    /// Create a heightmap from raw row-major data (for testing)
    pub fn from_raw(heights: Vec<f32>, size: u32) -> Self {
        let verts = size as usize + 1;
        assert_eq!(heights.len(), verts * verts);
        Self { heights, size }
    }

    /// Samples per edge
    pub fn verts_per_edge(&self) -> usize {
        self.size as usize + 1
    }

    /// Elevation at row `i`, column `j`
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.heights[i * self.verts_per_edge() + j]
    }

    /// One row of samples, west to east
    pub fn row(&self, i: usize) -> &[f32] {
        let verts = self.verts_per_edge();
        &self.heights[i * verts..(i + 1) * verts]
    }

    /// One column of samples, north to south
    pub fn column(&self, j: usize) -> Vec<f32> {
        (0..self.verts_per_edge()).map(|i| self.get(i, j)).collect()
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Lowest and highest elevation
    pub fn range(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }

    /// Bilinear sample at local coordinates (`x` along columns, `z` along rows).
    /// Returns `None` outside `[0, size]` on either axis.
    pub fn sample(&self, x: f32, z: f32) -> Option<f32> {
        let size = self.size as f32;
        if !(0.0..=size).contains(&x) || !(0.0..=size).contains(&z) {
            return None;
        }

        let last = self.size as usize - 1;
        let j0 = (x as usize).min(last);
        let i0 = (z as usize).min(last);
        let tx = x - j0 as f32;
        let tz = z - i0 as f32;

        let h00 = self.get(i0, j0);
        let h01 = self.get(i0, j0 + 1);
        let h10 = self.get(i0 + 1, j0);
        let h11 = self.get(i0 + 1, j0 + 1);

        let h0 = h00 * (1.0 - tx) + h01 * tx;
        let h1 = h10 * (1.0 - tx) + h11 * tx;

        Some(h0 * (1.0 - tz) + h1 * tz)
    }

    /// Write a 16-bit grayscale PNG, mapping `[-scale, scale]` to `[0, 65535]`
    pub fn to_png(&self, path: &Path, scale: f32) -> Result<()> {
        let verts = self.verts_per_edge() as u32;
        let scale = if scale > 0.0 { scale } else { 1.0 };
        let pixels: Vec<u16> = self
            .heights
            .iter()
            .map(|h| {
                let t = ((h / scale + 1.0) * 0.5).clamp(0.0, 1.0);
                (t * 65535.0).round() as u16
            })
            .collect();

        let img = image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_raw(verts, verts, pixels)
            .ok_or_else(|| RidgeError::ImageError("heightmap buffer size mismatch".to_string()))?;
        img.save(path).map_err(|e| {
            RidgeError::ImageError(format!(
                "Failed to write heightmap '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
