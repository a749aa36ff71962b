//! Headless frame driver
//!
//! Seeds a world, ticks it once per frame until the camera fan finishes (or
//! the frame cap hits), then hands the final state to a recording sink and
//! logs a per-ray summary. A windowed front end would drive the same
//! `World::frame` / `present` pair from its own event loop.

use std::path::Path;

use raymarch2d::Settings;
use raymarch2d::consts::MAX_FRAMES;
use raymarch2d::renderer::{RecordingSink, present};
use raymarch2d::sim::World;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(rand::random::<u64>);

    let settings = Settings::load(Path::new("settings.json"));
    let mut world = World::new(&settings, seed);

    while !world.finished() && world.frames() < MAX_FRAMES {
        world.frame();
    }
    log::info!("marching stopped after {} frames", world.frames());

    let mut sink = RecordingSink::default();
    present(&world, &mut sink);

    let rays = world.camera().rays();
    let collided = rays.iter().filter(|r| r.has_collided()).count();
    log::info!(
        "{collided}/{} rays collided, {} draw ops handed to the sink",
        rays.len(),
        sink.ops.len()
    );

    for (i, ray) in rays.iter().enumerate() {
        let result = ray.last_result();
        log::info!(
            "ray {i}: steps={} collided={} tip=({:.1}, {:.1}) min_dist={:.3}",
            result.step,
            result.collided,
            result.position.x,
            result.position.y,
            result.min_dist
        );
    }
}
