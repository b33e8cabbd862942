/*
 * Error Module
 *
 * Errors raised while validating the engine configuration at construction time.
 * The running simulation itself never fails: out-of-range requests are clamped.
 */

use thiserror::Error;

// A construction-time configuration problem. Fatal: the engine refuses to start.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("agent radius must be positive, got {0}")]
    NonPositiveRadius(i32),
    #[error("arena x range is empty: x_min {min} must be below x_max {max}")]
    EmptyXRange { min: i32, max: i32 },
    #[error("arena y range is empty: y_min {min} must be below y_max {max}")]
    EmptyYRange { min: i32, max: i32 },
    #[error("arena {width}x{height} cannot hold an agent of diameter {diameter}")]
    ArenaTooSmall { width: i32, height: i32, diameter: i32 },
    #[error("minimum active count must be at least 1")]
    ZeroMinimumActive,
    #[error("capacity {capacity} is below the minimum active count {min_active}")]
    CapacityBelowMinimum { capacity: usize, min_active: usize },
    #[error("initial count {count} is outside {min_active}..={capacity}")]
    InitialCountOutOfRange { count: usize, min_active: usize, capacity: usize },
}
