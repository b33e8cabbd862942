/*
 * Simulation Clock Module
 *
 * Owns the background thread that drives the world. The thread loops for as
 * long as the clock is started: while Running it runs one full tick and then
 * calls the render-notify callback; while Paused it changes nothing and
 * notifies nobody. Either way it then sleeps for the interval set by the
 * current speed level. The sleep is never cut short: pausing only suppresses
 * the effect of the next wakeup, and `stop` waits for the current sleep to end.
 *
 * Controller calls (`set_count`, `set_speed`, the strength setters, `pause`,
 * `play`) lock the same mutex as the tick, so a tick always sees a consistent
 * parameter block and a renderer always sees a fully advanced population.
 */

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::agent::AgentView;
use crate::debug::TickStats;
use crate::world::World;

pub type SharedWorld = Arc<Mutex<World>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClockState {
    #[default]
    Paused,
    Running,
}

pub struct SimulationClock {
    world: SharedWorld,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SimulationClock {
    pub fn new(world: World) -> Self {
        Self::from_shared(Arc::new(Mutex::new(world)))
    }

    pub fn from_shared(world: SharedWorld) -> Self {
        Self {
            world,
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    // Handle to the shared world, for collaborators that need direct access.
    pub fn world(&self) -> SharedWorld {
        Arc::clone(&self.world)
    }

    fn lock(&self) -> MutexGuard<'_, World> {
        lock_world(&self.world)
    }

    // Spawn the tick thread. `render_notify` runs after every completed tick
    // while Running. Starting an already started clock does nothing.
    pub fn start<F>(&mut self, render_notify: F) -> io::Result<()>
    where
        F: FnMut() + Send + 'static,
    {
        if self.handle.is_some() {
            debug!("clock already started");
            return Ok(());
        }

        let stop = Arc::new(AtomicBool::new(false));
        let world = Arc::clone(&self.world);
        let thread_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("simulation-clock".into())
            .spawn(move || run(world, thread_stop, render_notify))?;

        self.stop = stop;
        self.handle = Some(handle);
        info!("clock started");
        Ok(())
    }

    // Ask the tick thread to exit and wait for it. The current sleep is not interrupted.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        self.stop.store(true, Ordering::Release);
        if handle.join().is_err() {
            warn!("clock thread panicked");
        }
        info!("clock stopped");
    }

    pub fn is_started(&self) -> bool {
        self.handle.is_some()
    }

    pub fn play(&self) {
        self.lock().play();
    }

    pub fn pause(&self) {
        self.lock().pause();
    }

    pub fn state(&self) -> ClockState {
        self.lock().state()
    }

    pub fn is_running(&self) -> bool {
        self.state() == ClockState::Running
    }

    pub fn set_count(&self, count: i64) -> usize {
        self.lock().set_count(count)
    }

    pub fn set_speed(&self, level: i64) -> Duration {
        self.lock().set_speed(level)
    }

    pub fn set_cohesion_strength(&self, value: f64) {
        self.lock().set_cohesion_strength(value);
    }

    pub fn set_separation_strength(&self, value: f64) {
        self.lock().set_separation_strength(value);
    }

    pub fn set_alignment_strength(&self, value: f64) {
        self.lock().set_alignment_strength(value);
    }

    // Owned snapshot of the active agents, taken between ticks.
    pub fn active_agents(&self) -> Vec<AgentView> {
        self.lock().active_agents()
    }

    pub fn stats(&self) -> TickStats {
        self.lock().stats()
    }

    // Run a single tick now, whatever the clock state.
    pub fn step_once(&self) -> TickStats {
        self.lock().tick()
    }

    // Read the world under the lock.
    pub fn with_world<T>(&self, f: impl FnOnce(&World) -> T) -> T {
        f(&self.lock())
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        self.stop();
    }
}

fn lock_world(world: &Mutex<World>) -> MutexGuard<'_, World> {
    // A panic mid-tick leaves agents in a valid (if partially advanced) state.
    world.lock().unwrap_or_else(PoisonError::into_inner)
}

fn run<F>(world: SharedWorld, stop: Arc<AtomicBool>, mut render_notify: F)
where
    F: FnMut(),
{
    while !stop.load(Ordering::Acquire) {
        let (ticked, interval) = {
            let mut world = lock_world(&world);
            let ticked = world.state() == ClockState::Running;
            if ticked {
                world.tick();
            }
            (ticked, world.interval())
        };

        // Notify outside the lock so the renderer can read the snapshot.
        if ticked {
            render_notify();
        }
        thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use std::sync::atomic::AtomicUsize;

    fn clock() -> SimulationClock {
        let world = World::new(EngineConfig { rng_seed: Some(11), ..EngineConfig::default() })
            .expect("default config is valid");
        SimulationClock::new(world)
    }

    #[test]
    fn play_and_pause_toggle_state() {
        let clock = clock();
        assert_eq!(clock.state(), ClockState::Paused);
        clock.play();
        assert!(clock.is_running());
        clock.pause();
        assert_eq!(clock.state(), ClockState::Paused);
    }

    #[test]
    fn step_once_ticks_while_paused() {
        let clock = clock();
        let stats = clock.step_once();
        assert_eq!(stats.tick, 1);
        assert_eq!(clock.with_world(World::tick_count), 1);
    }

    #[test]
    fn start_twice_spawns_one_thread() {
        let mut clock = clock();
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notified);
        clock.start(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .expect("spawn clock thread");
        clock.start(|| {}).expect("second start is a no-op");
        assert!(clock.is_started());
        clock.stop();
        assert!(!clock.is_started());
    }
}
