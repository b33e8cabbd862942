/*
 * Boundary Module
 *
 * Defines the rectangular arena the agents live in and the policy applied
 * when an agent steps past one of its edges. Each axis is handled on its own:
 * the position is clamped back onto the violated bound and that axis of the
 * direction is inverted. Clamping (rather than a bare bounce) guarantees every
 * agent is inside the arena once a tick completes.
 */

use glam::IVec2;

// Inclusive integer bounds of the play area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            x_min: 60,
            x_max: 1090,
            y_min: 160,
            y_max: 740,
        }
    }
}

impl Arena {
    pub const fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }

    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    pub fn min(&self) -> IVec2 {
        IVec2::new(self.x_min, self.y_min)
    }

    pub fn max(&self) -> IVec2 {
        IVec2::new(self.x_max, self.y_max)
    }

    pub fn contains(&self, position: IVec2) -> bool {
        (self.x_min..=self.x_max).contains(&position.x)
            && (self.y_min..=self.y_max).contains(&position.y)
    }
}

// Which axes were reflected by a boundary check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reflection {
    pub x: bool,
    pub y: bool,
}

impl Reflection {
    pub fn any(&self) -> bool {
        self.x || self.y
    }

    pub fn count(&self) -> usize {
        usize::from(self.x) + usize::from(self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryPolicy {
    arena: Arena,
    color_pulse: bool,
}

impl BoundaryPolicy {
    pub fn new(arena: Arena, color_pulse: bool) -> Self {
        Self { arena, color_pulse }
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    // Whether a reflected agent should be given a fresh color.
    pub fn color_pulse(&self) -> bool {
        self.color_pulse
    }

    // Clamp `position` into the arena, inverting the direction of every axis that was out.
    pub fn apply(&self, position: &mut IVec2, direction: &mut IVec2) -> Reflection {
        let x = reflect_axis(&mut position.x, &mut direction.x, self.arena.x_min, self.arena.x_max);
        let y = reflect_axis(&mut position.y, &mut direction.y, self.arena.y_min, self.arena.y_max);
        Reflection { x, y }
    }
}

#[inline]
fn reflect_axis(position: &mut i32, direction: &mut i32, min: i32, max: i32) -> bool {
    if *position < min || *position > max {
        *position = (*position).clamp(min, max);
        *direction = -*direction;
        true
    } else {
        false
    }
}
