//! Camera ray fan
//!
//! A camera owns a fixed set of rays spread across its field of view. One
//! `render` call advances every non-terminal ray by a single adaptive step;
//! the frame driver calls it once per tick until the whole fan has collided
//! or been cut off by the marching bounds.

use glam::Vec2;

use super::ray::{MarchOptions, Ray};
use super::scene::Scene;
use crate::{normalize_angle, polar_to_cartesian};

#[derive(Debug, Clone)]
pub struct Camera {
    pos: Vec2,
    /// Facing angle in radians
    rotation: f32,
    /// Field of view in degrees
    fov: f32,
    /// Number of rays in the fan
    res: usize,
    rays: Vec<Ray>,
    render_finished: bool,
}

impl Camera {
    pub fn new(pos: Vec2, rotation: f32, fov: f32, res: usize) -> Self {
        Self {
            pos,
            rotation: normalize_angle(rotation),
            fov,
            res,
            rays: Vec::new(),
            render_finished: false,
        }
    }

    /// Unit vector the camera is facing
    pub fn direction(&self) -> Vec2 {
        polar_to_cartesian(1.0, self.rotation)
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn res(&self) -> usize {
        self.res
    }

    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    pub fn render_finished(&self) -> bool {
        self.render_finished
    }

    /// Build the ray fan: `res` rays from the camera position, angles spread
    /// evenly across the field of view and centered on the facing angle,
    /// each seeded with an initial distance query against `scene`.
    ///
    /// Rays are created here once; `render` never adds, removes or reorders
    /// them.
    pub fn init(&mut self, scene: &Scene) {
        self.rays.clear();
        self.render_finished = false;

        let fov = self.fov.to_radians();
        for i in 0..self.res {
            let t = if self.res > 1 {
                i as f32 / (self.res - 1) as f32
            } else {
                0.5
            };
            let angle = self.rotation - fov / 2.0 + fov * t;
            let dir = polar_to_cartesian(1.0, angle);
            self.rays.push(Ray::new(self.pos, dir, Some(scene)));
        }
    }

    /// One frame step: every ray that is neither collided nor out of bounds
    /// recomputes its minimum distance and marches once. Latches
    /// `render_finished` on the first frame where no ray needed stepping;
    /// after that every call is a no-op.
    pub fn render(&mut self, scene: &Scene, options: &MarchOptions) {
        if self.render_finished {
            return;
        }

        let mut finished = true;
        for ray in &mut self.rays {
            if ray.has_collided() || ray.out_of_bounds(options) {
                continue;
            }
            ray.calc_min_dist(scene);
            let result = ray.march(None, options);
            if result.collided {
                log::debug!(
                    "ray collided at ({:.1}, {:.1}) after {} steps",
                    result.position.x,
                    result.position.y,
                    result.step
                );
            }
            finished = false;
        }
        self.render_finished = finished;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CAMERA_FOV_DEG, CAMERA_RAY_COUNT};
    use crate::sim::scene::Shape;
    use std::f32::consts::FRAC_PI_2;

    fn ring_scene() -> Scene {
        // Circles surrounding the origin so every fan direction hits something
        Scene::new(vec![
            Shape::circle(Vec2::new(300.0, 0.0), 40.0),
            Shape::circle(Vec2::new(300.0, 200.0), 40.0),
            Shape::circle(Vec2::new(300.0, -200.0), 40.0),
        ])
    }

    #[test]
    fn test_init_builds_full_fan() {
        let scene = ring_scene();
        let mut camera = Camera::new(Vec2::ZERO, 0.0, CAMERA_FOV_DEG, CAMERA_RAY_COUNT);
        camera.init(&scene);

        assert_eq!(camera.rays().len(), CAMERA_RAY_COUNT);
        for ray in camera.rays() {
            assert_eq!(ray.origin(), Vec2::ZERO);
            assert!((ray.dir().length() - 1.0).abs() < 1e-4);
            // Seeded with a real distance, not the default zero
            assert!(ray.min_dist() > 0.0);
        }
    }

    #[test]
    fn test_fan_spans_fov_centered_on_facing() {
        let scene = ring_scene();
        let mut camera = Camera::new(Vec2::ZERO, FRAC_PI_2, 45.0, 10);
        camera.init(&scene);

        let half_fov = 45.0_f32.to_radians() / 2.0;
        let first = camera.rays().first().unwrap().dir();
        let last = camera.rays().last().unwrap().dir();

        let lo = FRAC_PI_2 - half_fov;
        let hi = FRAC_PI_2 + half_fov;
        assert!((first.y.atan2(first.x) - lo).abs() < 1e-4);
        assert!((last.y.atan2(last.x) - hi).abs() < 1e-4);
    }

    #[test]
    fn test_single_ray_fan_faces_forward() {
        let scene = ring_scene();
        let mut camera = Camera::new(Vec2::ZERO, 0.3, 45.0, 1);
        camera.init(&scene);

        let dir = camera.rays()[0].dir();
        assert!((dir.y.atan2(dir.x) - 0.3).abs() < 1e-4);
        assert!((dir - camera.direction()).length() < 1e-5);
    }

    #[test]
    fn test_render_runs_fan_to_completion() {
        let scene = ring_scene();
        let options = MarchOptions {
            max_len: Some(5000.0),
            ..Default::default()
        };
        let mut camera = Camera::new(Vec2::ZERO, 0.0, 45.0, 10);
        camera.init(&scene);

        let mut frames = 0;
        while !camera.render_finished() {
            camera.render(&scene, &options);
            frames += 1;
            assert!(frames < 1000, "render never finished");
        }

        // Every ray ended terminal, and the fan itself is intact
        assert_eq!(camera.rays().len(), 10);
        for ray in camera.rays() {
            assert!(ray.has_collided() || ray.out_of_bounds(&options));
        }
    }

    #[test]
    fn test_render_steps_each_live_ray_once() {
        let scene = ring_scene();
        let options = MarchOptions::default();
        let mut camera = Camera::new(Vec2::ZERO, 0.0, 45.0, 4);
        camera.init(&scene);

        camera.render(&scene, &options);
        for ray in camera.rays() {
            assert_eq!(ray.steps(), 1);
        }
    }

    #[test]
    fn test_render_is_noop_once_finished() {
        // Camera inside a circle: every ray collides on its first query
        let scene = Scene::new(vec![Shape::circle(Vec2::ZERO, 50.0)]);
        let options = MarchOptions::default();
        let mut camera = Camera::new(Vec2::ZERO, 0.0, 45.0, 4);
        camera.init(&scene);

        // All rays are collided from the start: the first render latches
        camera.render(&scene, &options);
        assert!(camera.render_finished());

        let steps: Vec<u32> = camera.rays().iter().map(Ray::steps).collect();
        camera.render(&scene, &options);
        let after: Vec<u32> = camera.rays().iter().map(Ray::steps).collect();
        assert_eq!(steps, after);
    }
}
