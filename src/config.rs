/*
 * Configuration Module
 *
 * Construction-time wiring for the engine: arena bounds, agent radius,
 * population bounds, starting parameters and the optional random seed.
 * Validation runs once, before any agent is created.
 */

use crate::boundary::Arena;
use crate::error::ConfigError;
use crate::params::SimulationParams;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub arena: Arena,
    pub radius: i32,
    // Number of agent slots allocated up front.
    pub capacity: usize,
    pub min_active: usize,
    pub initial_count: usize,
    pub params: SimulationParams,
    // Recolor agents when they bounce off an edge.
    pub color_pulse: bool,
    // Fixed seed for reproducible runs; `None` draws from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            radius: 15,
            capacity: 100,
            min_active: 2,
            initial_count: 2,
            params: SimulationParams::default(),
            color_pulse: true,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_pool(&self.arena, self.radius, self.capacity, self.min_active)?;
        if !(self.min_active..=self.capacity).contains(&self.initial_count) {
            return Err(ConfigError::InitialCountOutOfRange {
                count: self.initial_count,
                min_active: self.min_active,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

// Bounds every agent pool must satisfy before any agent is placed
pub(crate) fn check_pool(
    arena: &Arena,
    radius: i32,
    capacity: usize,
    min_active: usize,
) -> Result<(), ConfigError> {
    if radius <= 0 {
        return Err(ConfigError::NonPositiveRadius(radius));
    }
    if arena.x_min >= arena.x_max {
        return Err(ConfigError::EmptyXRange { min: arena.x_min, max: arena.x_max });
    }
    if arena.y_min >= arena.y_max {
        return Err(ConfigError::EmptyYRange { min: arena.y_min, max: arena.y_max });
    }
    let diameter = radius.saturating_mul(2);
    if arena.width() < diameter || arena.height() < diameter {
        return Err(ConfigError::ArenaTooSmall {
            width: arena.width(),
            height: arena.height(),
            diameter,
        });
    }
    if min_active == 0 {
        return Err(ConfigError::ZeroMinimumActive);
    }
    if capacity < min_active {
        return Err(ConfigError::CapacityBelowMinimum { capacity, min_active });
    }
    Ok(())
}
