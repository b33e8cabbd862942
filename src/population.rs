/*
 * Population Module
 *
 * A fixed pool of agent slots allocated once at startup. The first
 * `active_count` slots are visible and simulated; the rest stay hidden until
 * a later `set_count` brings them back.
 */

use rand::Rng;
use tracing::{info, warn};

use crate::agent::{Agent, AgentView};
use crate::boundary::Arena;
use crate::config::check_pool;
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct Population {
    agents: Vec<Agent>,
    active_count: usize,
    min_active: usize,
}

impl Population {
    // Allocate `capacity` hidden agents with sequential ids.
    // Fails if the bounds could not hold a valid population.
    pub fn new<R: Rng + ?Sized>(
        capacity: usize,
        min_active: usize,
        radius: i32,
        arena: &Arena,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        check_pool(arena, radius, capacity, min_active)?;
        let agents = (0..capacity)
            .map(|id| Agent::new(id, radius, arena, rng))
            .collect();
        Ok(Self { agents, active_count: 0, min_active })
    }

    // Clamp `requested` into `[min_active, capacity]`, reset that many leading
    // agents and hide the rest. Returns the count applied.
    pub fn set_count<R: Rng + ?Sized>(&mut self, requested: i64, arena: &Arena, rng: &mut R) -> usize {
        let count = clamp_count(requested, self.min_active, self.capacity());
        if i64::try_from(count).ok() != Some(requested) {
            warn!(requested, applied = count, "agent count clamped");
        }

        let (active, hidden) = self.agents.split_at_mut(count);
        for agent in active {
            agent.reset(arena, rng);
        }
        for agent in hidden {
            agent.hide();
        }
        self.active_count = count;

        info!(count, "population reset");
        count
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn capacity(&self) -> usize {
        self.agents.len()
    }

    pub fn min_active(&self) -> usize {
        self.min_active
    }

    // The live slice the tick operates on.
    pub fn active(&self) -> &[Agent] {
        &self.agents[..self.active_count]
    }

    pub fn active_mut(&mut self) -> &mut [Agent] {
        &mut self.agents[..self.active_count]
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Agent> {
        self.active_mut().get_mut(index)
    }

    // Every slot, hidden ones included.
    pub fn all(&self) -> &[Agent] {
        &self.agents
    }

    pub fn views(&self) -> Vec<AgentView> {
        self.active().iter().map(Agent::view).collect()
    }
}

fn clamp_count(requested: i64, min: usize, max: usize) -> usize {
    if requested <= 0 {
        return min;
    }
    usize::try_from(requested).map_or(max, |count| count.clamp(min, max))
}
