/*
 * Application Module
 *
 * This module defines the nannou model for the circle simulation window.
 * It plays the role of view and controller around the engine: it builds the
 * world, starts the simulation clock, forwards control changes to it and keeps
 * a snapshot of the active circles for the renderer.
 *
 * The clock's render-notify callback bumps a shared tick counter; the model
 * refreshes its snapshot whenever that counter moves.
 */

use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use nannou::prelude::{App, Update};
use nannou_egui::Egui;
use tracing::info;

use crate::agent::AgentView;
use crate::boundary::Arena;
use crate::clock::{ClockState, SimulationClock};
use crate::config::EngineConfig;
use crate::debug::TickStats;
use crate::renderer;
use crate::ui::{self, ControlState};
use crate::world::World;

pub const WINDOW_WIDTH: u32 = 1200;
pub const WINDOW_HEIGHT: u32 = 900;

// Environment variable holding an optional `u64` seed for reproducible runs.
pub const SEED_VAR: &str = "CIRCLE_FLOCK_SEED";

// Main model for the application
pub struct Model {
    pub clock: SimulationClock,
    pub egui: Egui,
    pub controls: ControlState,
    pub agents: Vec<AgentView>,
    pub stats: TickStats,
    pub running: bool,
    pub arena: Arena,
    ticks_notified: Arc<AtomicU64>,
    ticks_seen: u64,
}

// Engine configuration for the window, with the seed taken from the environment.
pub fn engine_config() -> Result<EngineConfig> {
    let rng_seed = match env::var(SEED_VAR) {
        Ok(raw) => Some(
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("{SEED_VAR} must be an unsigned integer, got {raw:?}"))?,
        ),
        Err(_) => None,
    };
    let config = EngineConfig { rng_seed, ..EngineConfig::default() };
    config.validate().context("invalid engine configuration")?;
    Ok(config)
}

fn build_clock() -> Result<(SimulationClock, Arc<AtomicU64>)> {
    let world = World::new(engine_config()?)?;
    let mut clock = SimulationClock::new(world);

    let ticks_notified = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&ticks_notified);
    clock
        .start(move || {
            counter.fetch_add(1, Ordering::Release);
        })
        .context("failed to start simulation clock")?;

    Ok((clock, ticks_notified))
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Circle Flocking Simulation")
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .resizable(false)
        .view(renderer::view)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build window");
    let window = app.window(window_id).expect("window was just built");
    let egui = Egui::from_window(&window);

    // main() has already validated the configuration, so this only fails on thread spawn.
    let (clock, ticks_notified) = build_clock().expect("failed to start simulation");

    let (controls, agents, stats, arena) = clock.with_world(|world| {
        (
            ControlState::new(world.active_count(), world.params()),
            world.active_agents(),
            world.stats(),
            world.arena(),
        )
    });
    info!(circles = agents.len(), "window ready");

    Model {
        clock,
        egui,
        controls,
        agents,
        stats,
        running: false,
        arena,
        ticks_notified,
        ticks_seen: 0,
    }
}

// Update the model
pub fn update(_app: &App, model: &mut Model, update: Update) {
    model.egui.set_elapsed_time(update.since_start);

    let previous = model.controls.clone();
    let capacity = model.clock.with_world(World::capacity);
    let actions = ui::update_ui(
        &mut model.egui,
        &mut model.controls,
        capacity,
        model.running,
        &model.stats,
    );
    apply_controls(&model.clock, &previous, &model.controls);

    if actions.set_up {
        let applied = model.clock.set_count(model.controls.count as i64);
        model.controls.count = applied;
    }
    if actions.play {
        model.clock.play();
    }
    if actions.stop {
        model.clock.pause();
    }
    if actions.step {
        model.clock.step_once();
    }

    let ticks = model.ticks_notified.load(Ordering::Acquire);
    if ticks != model.ticks_seen || actions.any() {
        model.ticks_seen = ticks;
        refresh_snapshot(model);
    }
}

// Forward every changed slider to the clock.
fn apply_controls(clock: &SimulationClock, previous: &ControlState, current: &ControlState) {
    if current.speed != previous.speed {
        clock.set_speed(i64::from(current.speed));
    }
    if current.cohesion != previous.cohesion {
        clock.set_cohesion_strength(current.cohesion);
    }
    if current.separation != previous.separation {
        clock.set_separation_strength(current.separation);
    }
    if current.alignment != previous.alignment {
        clock.set_alignment_strength(current.alignment);
    }
}

fn refresh_snapshot(model: &mut Model) {
    let (agents, stats, running) = model
        .clock
        .with_world(|world| (world.active_agents(), world.stats(), world.state()));
    model.agents = agents;
    model.stats = stats;
    model.running = running == ClockState::Running;
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
