/*
 * UI Module
 *
 * This module contains the egui control window: population size with a
 * "Set Up" button, speed, the three flocking strengths, play/stop/step
 * buttons and an optional debug readout. The widgets edit a local
 * ControlState; the app compares it against the previous frame and forwards
 * only what changed to the simulation clock.
 */

use nannou_egui::{egui, Egui};

use crate::debug::TickStats;
use crate::params::SimulationParams;

// Slider values as last shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub count: usize,
    pub speed: u32,
    pub cohesion: f64,
    pub separation: f64,
    pub alignment: f64,
    pub show_debug: bool,
}

impl ControlState {
    pub fn new(count: usize, params: &SimulationParams) -> Self {
        Self {
            count,
            speed: params.speed_level(),
            cohesion: params.cohesion_strength,
            separation: params.separation_strength,
            alignment: params.alignment_strength,
            show_debug: false,
        }
    }
}

// Buttons pressed during this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiActions {
    pub set_up: bool,
    pub play: bool,
    pub stop: bool,
    pub step: bool,
}

impl UiActions {
    pub fn any(&self) -> bool {
        self.set_up || self.play || self.stop || self.step
    }
}

pub fn update_ui(
    egui: &mut Egui,
    controls: &mut ControlState,
    capacity: usize,
    running: bool,
    stats: &TickStats,
) -> UiActions {
    let mut actions = UiActions::default();
    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Circles", |ui| {
                ui.add(egui::Slider::new(&mut controls.count, 2..=capacity).text("Circles"));
                if ui.button("Set Up").clicked() {
                    actions.set_up = true;
                }
                ui.add(
                    egui::Slider::new(&mut controls.speed, SimulationParams::speed_range())
                        .text("Speed"),
                );
            });

            ui.collapsing("Flocking Behavior", |ui| {
                let range = SimulationParams::strength_range();
                ui.add(egui::Slider::new(&mut controls.cohesion, range.clone()).text("Cohesion"));
                ui.add(egui::Slider::new(&mut controls.separation, range.clone()).text("Separation"));
                ui.add(egui::Slider::new(&mut controls.alignment, range).text("Alignment"));
            });

            ui.horizontal(|ui| {
                if ui.button("Play").clicked() {
                    actions.play = true;
                }
                if ui.button("Stop").clicked() {
                    actions.stop = true;
                }
                if ui.button("Step").clicked() {
                    actions.step = true;
                }
                ui.label(if running { "Running" } else { "Paused" });
            });

            ui.checkbox(&mut controls.show_debug, "Show Debug Info");
            if controls.show_debug {
                ui.separator();
                ui.label(format!("Tick: {}", stats.tick));
                ui.label(format!("Active circles: {}", stats.active));
                ui.label(format!("Collisions: {}", stats.collisions));
                ui.label(format!("Edge bounces: {}", stats.reflections));
                ui.label(format!("Step time: {:.3} ms", stats.step_time.as_secs_f64() * 1000.0));
            }
        });

    actions
}
