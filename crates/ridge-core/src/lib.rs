//! Ridge Core - Foundational types for the Ridge terrain streamer
//!
//! This crate provides the types shared by the terrain and CLI crates:
//! - `Transform`, `Vec3` - Spatial types
//! - `Color` - Flat vertex colors
//! - Error types and Result alias

mod error;
mod types;

pub use error::{Result, RidgeError};
pub use types::{Color, Transform, Vec3};
