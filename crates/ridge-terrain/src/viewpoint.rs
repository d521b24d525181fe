//! The moving viewpoint terrain is streamed around

use ridge_core::Vec3;

/// Position and facing of the viewer. Angles are in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewpoint {
    pub position: Vec3,
    /// Heading around the up axis, in `[0, 360)`
    pub yaw: f32,
    /// Elevation angle, in `[-90, 90]`
    pub pitch: f32,
}

impl Viewpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vec3::new(x, y, z);
    }

    /// Move by `delta`, expressed relative to the current heading
    pub fn move_by(&mut self, delta: Vec3) {
        let heading = glam::Quat::from_rotation_y(self.yaw.to_radians());
        let world_delta = heading * to_glam_vec3(delta);
        self.position += Vec3::new(world_delta.x, world_delta.y, world_delta.z);
    }

    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = wrap(yaw, 0.0, 360.0);
        self.pitch = wrap(pitch, -90.0, 90.0);
    }

    /// Turn by the given angles. Yaw wraps around, pitch stops at straight up/down.
    pub fn rotate(&mut self, dyaw: f32, dpitch: f32) {
        self.yaw = wrap(self.yaw + dyaw, 0.0, 360.0);
        self.pitch = (self.pitch + dpitch).clamp(-90.0, 90.0);
    }

    /// Horizontal `(x, z)` position
    pub fn horizontal(&self) -> (f32, f32) {
        (self.position.x, self.position.z)
    }
}

fn to_glam_vec3(v: Vec3) -> glam::Vec3 {
    glam::Vec3::new(v.x, v.y, v.z)
}

/// Wrap `value` into `[start, end)`
fn wrap(value: f32, start: f32, end: f32) -> f32 {
    let width = end - start;
    let offset = value - start;
    offset - (offset / width).floor() * width + start
}
