//! Deterministic marching core
//!
//! All marching logic lives here. This module must be pure and deterministic:
//! - One adaptive step per ray per frame
//! - Seeded RNG only (scene generation)
//! - Stable iteration order (scene order breaks distance ties)
//! - No rendering or platform dependencies

pub mod camera;
pub mod ray;
pub mod scene;
pub mod sdf;
pub mod world;

pub use camera::Camera;
pub use ray::{MarchOptions, MarchResult, Ray, RaySnapshot};
pub use scene::{Scene, Shape, WHITE};
pub use sdf::{sd_box, sd_circle, sdf_gradient};
pub use world::World;
