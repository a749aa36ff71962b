//! The per-ray marching state machine
//!
//! A ray advances in discrete adaptive steps: each step moves the tip by the
//! last measured minimum distance to the scene (sphere tracing), so it can
//! never overshoot the nearest surface. A ray is terminal once it collides
//! (min distance at or below the threshold) or leaves the marching bounds;
//! terminal rays never step again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::scene::{Scene, WHITE};
use crate::consts::COLLISION_THRESHOLD;

/// Bounds consumed by [`Ray::march`]; any absent field disables that bound
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarchOptions {
    /// Inclusive `[min, max]` range for the tip's x coordinate
    pub x_range: Option<[f32; 2]>,
    /// Inclusive `[min, max]` range for the tip's y coordinate
    pub y_range: Option<[f32; 2]>,
    /// Cap on cumulative path length
    pub max_len: Option<f32>,
}

impl MarchOptions {
    /// Bounds covering `[0, extent]` on both axes with the diagonal as the
    /// path cap
    pub fn bounded(extent: Vec2) -> Self {
        Self {
            x_range: Some([0.0, extent.x]),
            y_range: Some([0.0, extent.y]),
            max_len: Some(extent.length()),
        }
    }

    fn violates(&self, pos: Vec2, len: f32) -> bool {
        if let Some([lo, hi]) = self.x_range {
            if pos.x < lo || pos.x > hi {
                return true;
            }
        }
        if let Some([lo, hi]) = self.y_range {
            if pos.y < lo || pos.y > hi {
                return true;
            }
        }
        if let Some(max) = self.max_len {
            if len >= max {
                return true;
            }
        }
        false
    }
}

/// One past ray state, the unit handed to the rendering sink
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaySnapshot {
    pub origin: Vec2,
    pub position: Vec2,
    pub min_dist: f32,
    pub color: u32,
    pub step: u32,
}

/// Outcome of a march call: the current snapshot plus the collision flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarchResult {
    pub origin: Vec2,
    pub position: Vec2,
    pub min_dist: f32,
    pub color: u32,
    pub step: u32,
    pub collided: bool,
}

/// A single marching probe
#[derive(Debug, Clone, Serialize)]
pub struct Ray {
    origin: Vec2,
    dir: Vec2,
    /// Accumulated offset from the origin (tip = origin + offset)
    offset: Vec2,
    /// Cumulative path length
    path_len: f32,
    steps: u32,
    /// Only valid immediately after a distance recomputation
    min_dist: f32,
    color: u32,
    collision_threshold: f32,
    /// Past snapshots, oldest first; see [`Ray::history`] for newest-first
    history: Vec<RaySnapshot>,
}

impl Ray {
    /// Create a ray, optionally seeding `min_dist` against a scene.
    ///
    /// Without a scene the ray reads as already collided (`min_dist` starts
    /// at zero) and will not march until a distance query runs.
    pub fn new(origin: Vec2, dir: Vec2, scene: Option<&Scene>) -> Self {
        let mut ray = Self {
            origin,
            dir,
            offset: Vec2::ZERO,
            path_len: 0.0,
            steps: 0,
            min_dist: 0.0,
            color: WHITE,
            collision_threshold: COLLISION_THRESHOLD,
            history: Vec::new(),
        };
        if let Some(scene) = scene {
            ray.calc_min_dist(scene);
        }
        ray
    }

    /// Current tip position, always derived from origin + offset
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.origin + self.offset
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    /// Cumulative path length marched so far
    pub fn path_len(&self) -> f32 {
        self.path_len
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Last computed minimum distance to the scene
    pub fn min_dist(&self) -> f32 {
        self.min_dist
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn has_collided(&self) -> bool {
        self.min_dist <= self.collision_threshold
    }

    pub fn out_of_bounds(&self, options: &MarchOptions) -> bool {
        options.violates(self.position(), self.path_len)
    }

    pub fn snapshot(&self) -> RaySnapshot {
        RaySnapshot {
            origin: self.origin,
            position: self.position(),
            min_dist: self.min_dist,
            color: self.color,
            step: self.steps,
        }
    }

    pub fn last_result(&self) -> MarchResult {
        MarchResult {
            origin: self.origin,
            position: self.position(),
            min_dist: self.min_dist,
            color: self.color,
            step: self.steps,
            collided: self.has_collided(),
        }
    }

    /// Past snapshots, newest first
    pub fn history(&self) -> impl DoubleEndedIterator<Item = &RaySnapshot> {
        self.history.iter().rev()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Recompute the minimum distance to `scene` at the current tip.
    ///
    /// Returns `None` on an empty scene and leaves the previous value
    /// untouched; an empty scene never refreshes a distance.
    pub fn calc_min_dist(&mut self, scene: &Scene) -> Option<f32> {
        let d = scene.min_distance(self.position())?;
        self.min_dist = d;
        Some(d)
    }

    /// Take one marching step.
    ///
    /// Out-of-bounds and already-collided rays return the last result
    /// without mutating anything. Otherwise the current state is recorded
    /// into history, the step counter increments, and the tip advances by
    /// `step_override` if given, else by the last computed `min_dist`.
    pub fn march(&mut self, step_override: Option<f32>, options: &MarchOptions) -> MarchResult {
        if self.out_of_bounds(options) || self.has_collided() {
            return self.last_result();
        }

        self.history.push(self.snapshot());
        self.steps += 1;

        let step_len = step_override.unwrap_or(self.min_dist);
        self.offset += self.dir * step_len;
        self.path_len += step_len;

        self.last_result()
    }

    /// Restart the march from the current origin and direction: zero the
    /// offset, path length, step count and min distance, reset history to
    /// the single fresh snapshot, then recompute against `scene` if given.
    pub fn reset(&mut self, scene: Option<&Scene>) {
        self.offset = Vec2::ZERO;
        self.path_len = 0.0;
        self.steps = 0;
        self.min_dist = 0.0;
        self.history.clear();
        self.history.push(self.snapshot());

        if let Some(scene) = scene {
            self.calc_min_dist(scene);
        }
    }

    /// Reposition the ray; always restarts the march
    pub fn set_origin(&mut self, origin: Vec2, scene: Option<&Scene>) {
        self.origin = origin;
        self.reset(scene);
    }

    /// Redirect the ray; always restarts the march
    pub fn set_direction(&mut self, dir: Vec2, scene: Option<&Scene>) {
        self.dir = dir;
        self.reset(scene);
    }
}
