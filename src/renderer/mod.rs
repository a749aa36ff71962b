//! Rendering sink contract
//!
//! The marching core never paints pixels. Once per frame the driver walks
//! the world and hands immutable state to a [`RenderSink`], in a fixed
//! order: each camera ray's current snapshot (with a surface normal at hit
//! points), the probe ray's current snapshot and its trail newest-first,
//! then every scene shape. What a sink does with them (canvas, SVG,
//! terminal) is its own business.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{RaySnapshot, Shape, World};

pub trait RenderSink {
    fn draw_snapshot(&mut self, snap: &RaySnapshot);
    fn draw_shape(&mut self, shape: &Shape);
    /// Surface normal at a collision point; sinks without hit markers can
    /// ignore it
    fn draw_normal(&mut self, _at: Vec2, _normal: Vec2) {}
}

/// Feed one frame of world state to a sink
pub fn present(world: &World, sink: &mut impl RenderSink) {
    for ray in world.camera().rays() {
        sink.draw_snapshot(&ray.snapshot());
        if ray.has_collided() {
            let pos = ray.position();
            sink.draw_normal(pos, world.scene().normal_at(pos));
        }
    }

    sink.draw_snapshot(&world.probe().snapshot());
    for snap in world.probe().history() {
        sink.draw_snapshot(snap);
    }

    for shape in world.scene().shapes() {
        sink.draw_shape(shape);
    }
}

/// One recorded sink call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DrawOp {
    Ray(RaySnapshot),
    HitNormal { at: Vec2, normal: Vec2 },
    Shape(Shape),
}

/// A sink that records every call in order; the reference sink for the
/// headless driver and for tests
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub ops: Vec<DrawOp>,
}

impl RecordingSink {
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn ray_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Ray(_)))
            .count()
    }

    pub fn shape_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Shape(_)))
            .count()
    }
}

impl RenderSink for RecordingSink {
    fn draw_snapshot(&mut self, snap: &RaySnapshot) {
        self.ops.push(DrawOp::Ray(*snap));
    }

    fn draw_shape(&mut self, shape: &Shape) {
        self.ops.push(DrawOp::Shape(*shape));
    }

    fn draw_normal(&mut self, at: Vec2, normal: Vec2) {
        self.ops.push(DrawOp::HitNormal { at, normal });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Scene, Shape, World};
    use crate::Settings;
    use glam::Vec2;

    fn small_world() -> World {
        let scene = Scene::new(vec![
            Shape::circle(Vec2::new(900.0, 360.0), 250.0),
            Shape::rect(Vec2::new(200.0, 600.0), Vec2::new(40.0, 20.0)),
        ]);
        let settings = Settings {
            camera_rays: 4,
            ..Default::default()
        };
        World::from_scene(scene, &settings, 9)
    }

    #[test]
    fn test_present_walks_rays_then_trail_then_shapes() {
        let world = small_world();
        let mut sink = RecordingSink::default();
        present(&world, &mut sink);

        // 4 camera rays + probe current (empty trail before any march)
        assert_eq!(sink.ray_count(), 5);
        assert_eq!(sink.shape_count(), 2);

        // Camera snapshots lead, shapes close the frame
        assert!(matches!(sink.ops.first(), Some(DrawOp::Ray(_))));
        assert!(matches!(sink.ops.last(), Some(DrawOp::Shape(_))));
    }

    #[test]
    fn test_present_includes_probe_trail() {
        let mut world = small_world();
        for _ in 0..3 {
            world.frame();
        }

        let mut sink = RecordingSink::default();
        present(&world, &mut sink);

        let expected = world.camera().rays().len() + 1 + world.probe().history_len();
        assert_eq!(sink.ray_count(), expected);
    }

    #[test]
    fn test_normals_only_for_collided_rays() {
        let world = small_world();
        let mut sink = RecordingSink::default();
        present(&world, &mut sink);

        // Nothing has marched yet: no hits, no normals
        assert!(
            !sink
                .ops
                .iter()
                .any(|op| matches!(op, DrawOp::HitNormal { .. }))
        );

        // Run the world dry, then collided rays must carry normals
        let mut world = world;
        let mut guard = 0;
        while !world.finished() {
            world.frame();
            guard += 1;
            assert!(guard < 2000);
        }
        sink.clear();
        present(&world, &mut sink);

        let collided = world
            .camera()
            .rays()
            .iter()
            .filter(|r| r.has_collided())
            .count();
        let normals = sink
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::HitNormal { .. }))
            .count();
        assert!(collided > 0);
        assert_eq!(normals, collided);
    }
}
