//! Scene shapes and the scene container
//!
//! A scene is an ordered list of shapes. Order never changes a distance
//! *value*, but it breaks ties: the first shape in scene order wins when two
//! report the same distance, which keeps nearest-shape queries deterministic.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::sdf::{sd_box, sd_circle, sdf_gradient};
use crate::consts::{MAX_SHAPE_RADIUS, MIN_SHAPE_RADIUS};

/// Packed 0xRRGGBBAA display color, never read by the marcher
pub const WHITE: u32 = 0xFFFF_FFFF;

/// A scene shape carrying its own signed distance function
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle {
        center: Vec2,
        radius: f32,
        color: u32,
    },
    Rect {
        center: Vec2,
        /// Half-extents (half-width, half-height)
        half: Vec2,
        color: u32,
    },
}

impl Shape {
    pub fn circle(center: Vec2, radius: f32) -> Self {
        debug_assert!(radius >= 0.0);
        Self::Circle {
            center,
            radius,
            color: WHITE,
        }
    }

    pub fn rect(center: Vec2, half: Vec2) -> Self {
        debug_assert!(half.x >= 0.0 && half.y >= 0.0);
        Self::Rect {
            center,
            half,
            color: WHITE,
        }
    }

    /// Signed distance from `p` to this shape's boundary
    #[inline]
    pub fn distance(&self, p: Vec2) -> f32 {
        match *self {
            Shape::Circle { center, radius, .. } => sd_circle(p, center, radius),
            Shape::Rect { center, half, .. } => sd_box(p, center, half),
        }
    }

    pub fn position(&self) -> Vec2 {
        match *self {
            Shape::Circle { center, .. } | Shape::Rect { center, .. } => center,
        }
    }

    pub fn color(&self) -> u32 {
        match *self {
            Shape::Circle { color, .. } | Shape::Rect { color, .. } => color,
        }
    }
}

/// An ordered collection of shapes with nearest-distance queries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// Generate `count` circles with uniform positions in `[0, extent]` and
    /// uniform radii, drawn from a caller-seeded RNG
    pub fn generate(count: usize, extent: Vec2, rng: &mut impl Rng) -> Self {
        let mut shapes = Vec::with_capacity(count);
        for _ in 0..count {
            let center = Vec2::new(
                rng.random_range(0.0..extent.x),
                rng.random_range(0.0..extent.y),
            );
            let radius = rng.random_range(MIN_SHAPE_RADIUS..MAX_SHAPE_RADIUS);
            shapes.push(Shape::circle(center, radius));
        }
        Self { shapes }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Minimum raw signed distance from `p` over all shapes, `None` when the
    /// scene is empty. Callers keep their previous value on `None`; an empty
    /// scene never refreshes a distance.
    pub fn min_distance(&self, p: Vec2) -> Option<f32> {
        let (first, rest) = self.shapes.split_first()?;
        let mut min = first.distance(p);
        for shape in rest {
            let d = shape.distance(p);
            if d < min {
                min = d;
            }
        }
        Some(min)
    }

    /// Nearest shape and its distance; the first shape in scene order wins
    /// ties
    pub fn nearest(&self, p: Vec2) -> Option<(&Shape, f32)> {
        let (first, rest) = self.shapes.split_first()?;
        let mut best = (first, first.distance(p));
        for shape in rest {
            let d = shape.distance(p);
            if d < best.1 {
                best = (shape, d);
            }
        }
        Some(best)
    }

    /// Surface normal of the combined scene field at `p` (central
    /// differences); zero for an empty scene
    pub fn normal_at(&self, p: Vec2) -> Vec2 {
        sdf_gradient(p, |q| self.min_distance(q).unwrap_or(f32::MAX))
    }
}
