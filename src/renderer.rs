/*
 * Renderer Module
 *
 * This module draws the simulation: the arena outline and every visible
 * circle in its own color. Arena coordinates have their origin at the top-left
 * of the window with y growing downwards; nannou puts the origin at the centre
 * with y growing upwards, so every point is mapped before drawing.
 */

use glam::IVec2;
use nannou::color::{rgb8, Rgb8};
use nannou::prelude::*;
use tracing::error;

use crate::agent::Rgb;
use crate::app::Model;
use crate::boundary::Arena;

const BACKGROUND: Rgb = Rgb::new(60, 60, 60);
const ARENA_OUTLINE: Rgb = Rgb::new(192, 96, 0);

fn to_color(color: Rgb) -> Rgb8 {
    rgb8(color.r, color.g, color.b)
}

// Convert arena coordinates to nannou window coordinates.
pub fn arena_to_screen(position: IVec2, window_rect: Rect) -> Point2 {
    pt2(
        window_rect.left() + position.x as f32,
        window_rect.top() - position.y as f32,
    )
}

fn draw_arena(draw: &Draw, arena: &Arena, window_rect: Rect) {
    let top_left = arena_to_screen(arena.min(), window_rect);
    let bottom_right = arena_to_screen(arena.max(), window_rect);
    let bounds = Rect::from_corners(top_left, bottom_right);

    draw.rect()
        .xy(bounds.xy())
        .wh(bounds.wh())
        .no_fill()
        .stroke_weight(1.0)
        .stroke(to_color(ARENA_OUTLINE));
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(to_color(BACKGROUND));

    let window_rect = app.window_rect();
    draw_arena(&draw, &model.arena, window_rect);

    for agent in model.agents.iter().filter(|agent| agent.visible) {
        draw.ellipse()
            .xy(arena_to_screen(agent.position, window_rect))
            .radius(agent.radius as f32)
            .color(to_color(agent.color));
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        error!(?err, "failed to draw circles");
    }
    // Draw the egui UI
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        error!(?err, "failed to draw controls");
    }
}
