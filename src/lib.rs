//! 2D signed-distance-field ray marching
//!
//! Core modules:
//! - `sim`: Deterministic marching core (shapes, scene, rays, camera)
//! - `renderer`: Rendering sink contract, state snapshots out, no pixels
//! - `settings`: Runtime configuration with JSON persistence

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Simulation tuning constants
pub mod consts {
    /// Minimum distance at or below which a ray counts as hitting a surface
    pub const COLLISION_THRESHOLD: f32 = 0.1;

    /// Default scene extents (the marching bounds)
    pub const SCENE_WIDTH: f32 = 1280.0;
    pub const SCENE_HEIGHT: f32 = 720.0;

    /// Scene generation defaults
    pub const SCENE_OBJECT_COUNT: usize = 10;
    pub const MIN_SHAPE_RADIUS: f32 = 15.0;
    pub const MAX_SHAPE_RADIUS: f32 = 100.0;

    /// Camera fan defaults
    pub const CAMERA_FOV_DEG: f32 = 45.0;
    pub const CAMERA_RAY_COUNT: usize = 10;

    /// Safety cap on frames when driving a world headless
    pub const MAX_FRAMES: u64 = 10_000;
}

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
