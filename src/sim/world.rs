//! The world aggregate
//!
//! Owns everything a frame tick touches: the scene, the camera fan, the
//! interactive probe ray, the marching bounds and the seeded RNG. The frame
//! driver holds a `World` and calls `frame()` once per tick; there is no
//! free-standing global state anywhere in the crate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::camera::Camera;
use super::ray::{MarchOptions, Ray};
use super::scene::Scene;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct World {
    scene: Scene,
    camera: Camera,
    /// Free-roaming probe ray, repositioned/redirected by the input layer
    probe: Ray,
    options: MarchOptions,
    auto_march: bool,
    rng: Pcg32,
    seed: u64,
    extent: Vec2,
    frames: u64,
}

impl World {
    /// Seed a world: generate the scene, fan out the camera rays and aim the
    /// probe, all from one reproducible seed
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let extent = Vec2::new(settings.width, settings.height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let scene = Scene::generate(settings.object_count, extent, &mut rng);
        Self::assemble(scene, settings, seed, rng)
    }

    /// Build a world around a hand-made scene instead of a generated one
    pub fn from_scene(scene: Scene, settings: &Settings, seed: u64) -> Self {
        let rng = Pcg32::seed_from_u64(seed);
        Self::assemble(scene, settings, seed, rng)
    }

    fn assemble(scene: Scene, settings: &Settings, seed: u64, rng: Pcg32) -> Self {
        let extent = Vec2::new(settings.width, settings.height);
        let options = MarchOptions::bounded(extent);

        let start = Vec2::new(extent.x / 4.0, extent.y / 2.0);
        let mut camera = Camera::new(start, 0.0, settings.camera_fov, settings.camera_rays);
        camera.init(&scene);

        let probe = Ray::new(start, Vec2::X, Some(&scene));

        log::info!(
            "world seeded: {} shapes, {} camera rays (seed {seed})",
            scene.len(),
            camera.rays().len()
        );

        Self {
            scene,
            camera,
            probe,
            options,
            auto_march: settings.auto_march,
            rng,
            seed,
            extent,
            frames: 0,
        }
    }

    /// One frame tick: advance the camera fan, then auto-march the probe
    pub fn frame(&mut self) {
        self.camera.render(&self.scene, &self.options);

        if self.auto_march && !self.probe.has_collided() {
            self.probe.calc_min_dist(&self.scene);
            let result = self.probe.march(None, &self.options);
            if result.collided {
                log::info!(
                    "probe collided at ({:.1}, {:.1}) after {} steps",
                    result.position.x,
                    result.position.y,
                    result.step
                );
            }
        }

        self.frames += 1;
    }

    /// True once nothing is left to advance: the camera fan has latched and
    /// the probe (when auto-marching) is terminal
    pub fn finished(&self) -> bool {
        let probe_done = !self.auto_march
            || self.probe.has_collided()
            || self.probe.out_of_bounds(&self.options);
        self.camera.render_finished() && probe_done
    }

    /// Move the probe ray's origin; restarts its march
    pub fn reposition_ray(&mut self, point: Vec2) {
        self.probe.set_origin(point, Some(&self.scene));
    }

    /// Change the probe ray's direction; restarts its march
    pub fn redirect_ray(&mut self, dir: Vec2) {
        self.probe.set_direction(dir, Some(&self.scene));
    }

    /// Point the probe ray at a target (the click-to-aim gesture)
    pub fn aim_ray(&mut self, target: Vec2) {
        let dir = (target - self.probe.origin()).normalize_or_zero();
        self.redirect_ray(dir);
    }

    /// Replace the scene wholesale and restart every ray against it
    pub fn regenerate_scene(&mut self, count: usize) {
        self.scene = Scene::generate(count, self.extent, &mut self.rng);
        self.probe.reset(Some(&self.scene));
        self.camera.init(&self.scene);
        log::info!("scene regenerated with {count} shapes");
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn probe(&self) -> &Ray {
        &self.probe
    }

    pub fn options(&self) -> &MarchOptions {
        &self.options
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn auto_march(&self) -> bool {
        self.auto_march
    }

    pub fn set_auto_march(&mut self, on: bool) {
        self.auto_march = on;
    }
}
