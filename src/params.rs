/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains the values
 * the controller may change while the simulation runs: the speed level and
 * the three flocking strengths. Out-of-range input is clamped, never rejected.
 */

use std::ops::RangeInclusive;
use std::time::Duration;

use tracing::warn;

// Milliseconds added to the tick interval per speed level below the maximum.
const INTERVAL_STEP_MS: u64 = 80;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    speed_level: u32,
    pub cohesion_strength: f64,
    pub separation_strength: f64,
    pub alignment_strength: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            speed_level: 4,
            cohesion_strength: 100.0,
            separation_strength: 100.0,
            alignment_strength: 100.0,
        }
    }
}

// The three strengths divided by 100, ready to scale the flocking components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockWeights {
    pub separation: f64,
    pub alignment: f64,
    pub cohesion: f64,
}

impl FlockWeights {
    pub const ZERO: Self = Self { separation: 0.0, alignment: 0.0, cohesion: 0.0 };
}

impl SimulationParams {
    pub fn speed_level(&self) -> u32 {
        self.speed_level
    }

    // Set the speed level, clamping into 1..=5. Returns the level actually stored.
    pub fn set_speed_level(&mut self, level: i64) -> u32 {
        let range = Self::speed_range();
        let clamped = level.clamp(i64::from(*range.start()), i64::from(*range.end())) as u32;
        if i64::from(clamped) != level {
            warn!(requested = level, applied = clamped, "speed level clamped");
        }
        self.speed_level = clamped;
        clamped
    }

    // Time between ticks: 80 ms at level 5 up to 400 ms at level 1.
    pub fn interval(&self) -> Duration {
        interval_for_level(self.speed_level)
    }

    pub fn weights(&self) -> FlockWeights {
        FlockWeights {
            separation: self.separation_strength / 100.0,
            alignment: self.alignment_strength / 100.0,
            cohesion: self.cohesion_strength / 100.0,
        }
    }

    // Parameter ranges for UI sliders
    pub fn speed_range() -> RangeInclusive<u32> {
        1..=5
    }

    pub fn strength_range() -> RangeInclusive<f64> {
        0.0..=100.0
    }
}

pub fn interval_for_level(level: u32) -> Duration {
    let level = u64::from(level.clamp(1, 5));
    Duration::from_millis((6 - level) * INTERVAL_STEP_MS)
}
