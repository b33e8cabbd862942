/*
 * Circle Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the circle flocking engine.
 * The core (agents, forces, boundaries, collisions, population, clock) has no
 * windowing dependency; the `gui` feature adds the nannou view and controller.
 */

// Re-export key components for easier access
pub use agent::{Agent, AgentView, Rgb};
pub use boundary::{Arena, BoundaryPolicy, Reflection};
pub use clock::{ClockState, SharedWorld, SimulationClock};
pub use collision::CollisionResolver;
pub use config::EngineConfig;
pub use debug::TickStats;
pub use error::ConfigError;
pub use params::{FlockWeights, SimulationParams};
pub use physics::{FlockForceModel, MAX_DELTA};
pub use population::Population;
pub use world::World;

// Define modules
pub mod agent;
pub mod boundary;
pub mod clock;
pub mod collision;
pub mod config;
pub mod debug;
pub mod error;
pub mod params;
pub mod physics;
pub mod population;
pub mod world;

#[cfg(feature = "gui")]
pub mod app;
#[cfg(feature = "gui")]
pub mod renderer;
#[cfg(feature = "gui")]
pub mod ui;
