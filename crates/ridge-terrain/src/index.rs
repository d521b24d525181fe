//! Fragment grid coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer coordinate of one fragment in the infinite fragment grid.
///
/// `x` follows world X, `y` follows world Z.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FragmentIndex {
    pub x: i32,
    pub y: i32,
}

impl FragmentIndex {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Index of the fragment covering the horizontal world position `(x, z)`.
    ///
    /// Uses floor division so that `-0.5` lands in fragment `-1` and `-100.0`
    /// (with `size == 100`) lands in fragment `-1`, not `-2` or `0`.
    pub fn containing(x: f32, z: f32, size: u32) -> Self {
        debug_assert!(x.is_finite() && z.is_finite(), "non-finite position ({}, {})", x, z);
        debug_assert!(size > 0, "fragment size must be positive");
        Self {
            x: floor_div(x, size),
            y: floor_div(z, size),
        }
    }

    /// World-space horizontal origin `(x * size, y * size)` of this fragment
    pub fn origin(&self, size: u32) -> (f32, f32) {
        let size = size as i64;
        ((self.x as i64 * size) as f32, (self.y as i64 * size) as f32)
    }

    /// Square window of indices `[x-r, x+r] × [y-r, y+r]`, column by column.
    /// The window is cut off at the edges of the `i32` grid.
    pub fn window(self, radius: i32) -> impl Iterator<Item = FragmentIndex> {
        let radius = radius.max(0);
        let (y_lo, y_hi) = (self.y.saturating_sub(radius), self.y.saturating_add(radius));
        (self.x.saturating_sub(radius)..=self.x.saturating_add(radius))
            .flat_map(move |x| (y_lo..=y_hi).map(move |y| FragmentIndex::new(x, y)))
    }

    /// Whether `other` lies in the square window of `radius` around `self`
    pub fn within(&self, other: &FragmentIndex, radius: i32) -> bool {
        let radius = radius as i64;
        (other.x as i64 - self.x as i64).abs() <= radius
            && (other.y as i64 - self.y as i64).abs() <= radius
    }
}

impl fmt::Display for FragmentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Positions beyond the `i32` grid saturate to its outermost fragment
fn floor_div(coord: f32, size: u32) -> i32 {
    (coord.floor() as i64)
        .div_euclid(size as i64)
        .clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
