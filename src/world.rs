/*
 * World Module
 *
 * The single-threaded simulation state: the agent pool, the live parameters,
 * the Paused/Running flag and the random source. One call to `tick` runs the
 * flocking step and boundary policy for every active agent, then resolves
 * collisions once over all active pairs.
 *
 * The world is not shared by itself; `SimulationClock` wraps it in a mutex and
 * drives it from a background thread.
 */

use std::time::{Duration, Instant};

use glam::IVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::agent::AgentView;
use crate::boundary::{Arena, BoundaryPolicy};
use crate::clock::ClockState;
use crate::collision::CollisionResolver;
use crate::config::EngineConfig;
use crate::debug::TickStats;
use crate::error::ConfigError;
use crate::params::SimulationParams;
use crate::physics::{update_agents, FlockForceModel};
use crate::population::Population;

#[derive(Debug, Clone)]
pub struct World {
    population: Population,
    params: SimulationParams,
    policy: BoundaryPolicy,
    collisions: CollisionResolver,
    state: ClockState,
    rng: StdRng,
    tick: u64,
    stats: TickStats,
}

impl World {
    // Validate `config`, allocate the agent pool and activate `initial_count` agents.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut population = Population::new(
            config.capacity,
            config.min_active,
            config.radius,
            &config.arena,
            &mut rng,
        )?;
        population.set_count(config.initial_count as i64, &config.arena, &mut rng);

        info!(
            capacity = config.capacity,
            active = population.active_count(),
            seed = ?config.rng_seed,
            "world created"
        );

        Ok(Self {
            population,
            params: config.params,
            policy: BoundaryPolicy::new(config.arena, config.color_pulse),
            collisions: CollisionResolver,
            state: ClockState::Paused,
            rng,
            tick: 0,
            stats: TickStats::default(),
        })
    }

    // Advance every active agent one step, then resolve collisions.
    pub fn tick(&mut self) -> TickStats {
        let started = Instant::now();
        let model = FlockForceModel::new(self.params.weights());

        let outcome = update_agents(
            self.population.active_mut(),
            &model,
            &self.policy,
            &mut self.rng,
        );
        let collisions = self.collisions.resolve(self.population.active_mut());

        self.tick += 1;
        self.stats = TickStats {
            tick: self.tick,
            active: outcome.moved,
            collisions,
            reflections: outcome.reflections,
            reseeded: outcome.reseeded,
            step_time: started.elapsed(),
        };
        debug!(
            tick = self.tick,
            active = outcome.moved,
            collisions,
            reflections = outcome.reflections,
            "tick complete"
        );
        self.stats
    }

    pub fn set_count(&mut self, count: i64) -> usize {
        let arena = self.policy.arena();
        self.population.set_count(count, &arena, &mut self.rng)
    }

    // Set the speed level (clamped to 1..=5) and return the resulting tick interval.
    pub fn set_speed(&mut self, level: i64) -> Duration {
        let applied = self.params.set_speed_level(level);
        let interval = self.params.interval();
        info!(level = applied, interval_ms = interval.as_millis() as u64, "speed changed");
        interval
    }

    pub fn set_cohesion_strength(&mut self, value: f64) {
        if let Some(value) = finite_strength("cohesion", value) {
            self.params.cohesion_strength = value;
        }
    }

    pub fn set_separation_strength(&mut self, value: f64) {
        if let Some(value) = finite_strength("separation", value) {
            self.params.separation_strength = value;
        }
    }

    pub fn set_alignment_strength(&mut self, value: f64) {
        if let Some(value) = finite_strength("alignment", value) {
            self.params.alignment_strength = value;
        }
    }

    pub fn play(&mut self) {
        if self.state != ClockState::Running {
            info!("simulation playing");
        }
        self.state = ClockState::Running;
    }

    pub fn pause(&mut self) {
        if self.state != ClockState::Paused {
            info!("simulation paused");
        }
        self.state = ClockState::Paused;
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    // Owned snapshot of the active agents for rendering.
    pub fn active_agents(&self) -> Vec<AgentView> {
        self.population.views()
    }

    // Put an active agent at an exact position and direction.
    // Returns false if `index` is not an active slot.
    pub fn place_agent(&mut self, index: usize, position: IVec2, direction: IVec2) -> bool {
        match self.population.get_mut(index) {
            Some(agent) => {
                agent.position = position;
                agent.direction = direction;
                true
            }
            None => false,
        }
    }

    // Read-only access to the whole agent pool.
    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn active_count(&self) -> usize {
        self.population.active_count()
    }

    pub fn capacity(&self) -> usize {
        self.population.capacity()
    }

    pub fn arena(&self) -> Arena {
        self.policy.arena()
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn interval(&self) -> Duration {
        self.params.interval()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    // Counters from the most recent tick.
    pub fn stats(&self) -> TickStats {
        self.stats
    }
}

fn finite_strength(name: &'static str, value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        warn!(strength = name, value, "ignoring non-finite strength");
        None
    }
}
