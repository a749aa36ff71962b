//! Signed distance functions for scene shapes
//!
//! A signed distance is negative inside the shape, zero on its boundary and
//! positive outside. The marcher reads the raw value: a probe already inside
//! a shape reports a negative distance and trips the collision threshold on
//! the spot.

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to an axis-aligned box centered at `center` with
/// half-extents `half`
pub fn sd_box(p: Vec2, center: Vec2, half: Vec2) -> f32 {
    let q = (p - center).abs() - half;
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0)
}

/// Compute SDF gradient (surface normal) using central differences
pub fn sdf_gradient<F>(p: Vec2, sdf: F) -> Vec2
where
    F: Fn(Vec2) -> f32,
{
    let eps = 0.5;
    let dx = sdf(p + Vec2::new(eps, 0.0)) - sdf(p - Vec2::new(eps, 0.0));
    let dy = sdf(p + Vec2::new(0.0, eps)) - sdf(p - Vec2::new(0.0, eps));
    Vec2::new(dx, dy).normalize_or_zero()
}
