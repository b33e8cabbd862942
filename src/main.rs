/*
 * Circle Flocking Simulation
 *
 * Circles roam a rectangular arena, bounce off its edges, swap directions
 * when they collide and flock according to three rules:
 * 1. Separation: move away from circles they overlap
 * 2. Alignment: steer towards the average heading of the others
 * 3. Cohesion: drift towards the centre of the flock
 *
 * The control window sets the number of circles, the speed and the strength
 * of each rule. Set RUST_LOG (e.g. `RUST_LOG=circle_flock=debug`) for logs and
 * CIRCLE_FLOCK_SEED for a reproducible run.
 */

use anyhow::Result;
use circle_flock::app;

fn main() -> Result<()> {
    init_tracing();
    // Fail before opening a window if the configuration is unusable.
    app::engine_config()?;
    nannou::app(app::model).update(app::update).run();
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
