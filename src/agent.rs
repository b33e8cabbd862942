/*
 * Agent Module
 *
 * This module defines the Agent struct: a plain data record for one circle in
 * the simulation. Agents are allocated once and reused; hiding an agent takes
 * it out of the simulation without destroying it.
 *
 * Positions and directions are integer vectors. The direction is the per-tick
 * displacement and doubles as the agent's velocity.
 */

use glam::IVec2;
use rand::Rng;

use crate::boundary::{Arena, BoundaryPolicy, Reflection};

// Direction given to an agent whose direction collapsed to zero.
pub const STUCK_RESEED: IVec2 = IVec2::new(5, 5);

// Each axis of a fresh direction is drawn from `-3..3`.
const DIRECTION_RANGE: std::ops::Range<i32> = -3..3;

// Color specified in RGB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen_range(0..255), rng.gen_range(0..255), rng.gen_range(0..255))
    }
}

// Read-only copy of the fields a renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentView {
    pub id: usize,
    pub position: IVec2,
    pub color: Rgb,
    pub radius: i32,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct Agent {
    id: usize,
    radius: i32,
    visible: bool,
    pub position: IVec2,
    pub direction: IVec2,
    pub color: Rgb,
}

impl Agent {
    // Create a hidden agent with random position, direction and color.
    pub(crate) fn new<R: Rng + ?Sized>(id: usize, radius: i32, arena: &Arena, rng: &mut R) -> Self {
        let mut agent = Self {
            id,
            radius,
            visible: false,
            position: IVec2::ZERO,
            direction: IVec2::ZERO,
            color: Rgb::default(),
        };
        agent.randomize(arena, rng);
        agent
    }

    // Reassign position, direction and color, and make the agent visible.
    pub fn reset<R: Rng + ?Sized>(&mut self, arena: &Arena, rng: &mut R) {
        self.randomize(arena, rng);
        self.show();
    }

    fn randomize<R: Rng + ?Sized>(&mut self, arena: &Arena, rng: &mut R) {
        // Keep a radius of margin so a fresh agent never starts on or past an edge.
        let x = rng.gen_range(arena.x_min + self.radius..=arena.x_max - self.radius);
        let y = rng.gen_range(arena.y_min + self.radius..=arena.y_max - self.radius);
        self.position = IVec2::new(x, y);
        self.direction = IVec2::new(rng.gen_range(DIRECTION_RANGE), rng.gen_range(DIRECTION_RANGE));
        self.color = Rgb::random(rng);
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    // Euclidean distance between centers, truncated to an integer.
    pub fn distance(&self, other: &Agent) -> i32 {
        let offset = (other.position - self.position).as_dvec2();
        offset.length() as i32
    }

    pub fn overlaps(&self, other: &Agent) -> bool {
        self.distance(other) < self.radius + other.radius
    }

    // Give a motionless agent a fixed direction. Returns true if it was stuck.
    pub fn recover_if_stuck(&mut self) -> bool {
        if self.direction == IVec2::ZERO {
            self.direction = STUCK_RESEED;
            true
        } else {
            false
        }
    }

    // Add a steering delta to the direction, then move by the new direction.
    pub fn advance(&mut self, delta: IVec2) {
        self.direction += delta;
        self.position += self.direction;
    }

    // Apply the boundary policy, recoloring on reflection when the policy asks for it.
    pub fn confine<R: Rng + ?Sized>(&mut self, policy: &BoundaryPolicy, rng: &mut R) -> Reflection {
        let reflection = policy.apply(&mut self.position, &mut self.direction);
        if reflection.any() && policy.color_pulse() {
            self.color = Rgb::random(rng);
        }
        reflection
    }

    pub fn view(&self) -> AgentView {
        AgentView {
            id: self.id,
            position: self.position,
            color: self.color,
            radius: self.radius,
            visible: self.visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn agent_at(x: i32, y: i32) -> Agent {
        let mut rng = StdRng::seed_from_u64(1);
        let mut agent = Agent::new(0, 15, &Arena::default(), &mut rng);
        agent.position = IVec2::new(x, y);
        agent
    }

    #[test]
    fn new_agent_is_hidden_until_reset() {
        let mut rng = StdRng::seed_from_u64(7);
        let arena = Arena::default();
        let mut agent = Agent::new(3, 15, &arena, &mut rng);
        assert!(!agent.is_visible());
        agent.reset(&arena, &mut rng);
        assert!(agent.is_visible());
        assert_eq!(agent.id(), 3);
    }

    #[test]
    fn reset_respects_radius_margin_and_direction_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let arena = Arena::new(0, 40, 0, 40);
        let mut agent = Agent::new(0, 15, &arena, &mut rng);
        for _ in 0..200 {
            agent.reset(&arena, &mut rng);
            assert!((15..=25).contains(&agent.position.x));
            assert!((15..=25).contains(&agent.position.y));
            assert!((-3..=2).contains(&agent.direction.x));
            assert!((-3..=2).contains(&agent.direction.y));
        }
    }

    #[test]
    fn reset_reassigns_color() {
        let mut rng = StdRng::seed_from_u64(11);
        let arena = Arena::default();
        let mut agent = Agent::new(0, 15, &arena, &mut rng);
        // Channels are drawn from 0..255, so a reset can never produce white.
        agent.color = Rgb::new(255, 255, 255);
        agent.reset(&arena, &mut rng);
        assert_ne!(agent.color, Rgb::new(255, 255, 255));
    }

    #[test]
    fn show_and_hide_keep_motion_state() {
        let mut agent = agent_at(100, 200);
        agent.direction = IVec2::new(2, -1);
        agent.show();
        agent.hide();
        assert_eq!(agent.position, IVec2::new(100, 200));
        assert_eq!(agent.direction, IVec2::new(2, -1));
    }

    #[test]
    fn distance_is_truncated() {
        let a = agent_at(0, 0);
        let b = agent_at(2, 2);
        // sqrt(8) = 2.83
        assert_eq!(a.distance(&b), 2);
    }

    #[test]
    fn overlap_uses_strict_radius_sum() {
        let a = agent_at(100, 300);
        assert!(a.overlaps(&agent_at(120, 300)));
        assert!(a.overlaps(&agent_at(129, 300)));
        assert!(!a.overlaps(&agent_at(130, 300)));
    }

    #[test]
    fn stuck_agent_is_reseeded() {
        let mut agent = agent_at(100, 300);
        agent.direction = IVec2::ZERO;
        assert!(agent.recover_if_stuck());
        assert_eq!(agent.direction, STUCK_RESEED);
        assert!(!agent.recover_if_stuck());
    }

    #[test]
    fn advance_accumulates_direction_before_moving() {
        let mut agent = agent_at(100, 300);
        agent.direction = IVec2::new(1, 1);
        agent.advance(IVec2::new(2, -3));
        assert_eq!(agent.direction, IVec2::new(3, -2));
        assert_eq!(agent.position, IVec2::new(103, 298));
    }

    #[test]
    fn confine_recolors_only_with_pulse() {
        let mut rng = StdRng::seed_from_u64(9);
        let arena = Arena::default();
        let mut agent = agent_at(arena.x_max + 4, 300);
        agent.color = Rgb::new(255, 255, 255);
        agent.direction = IVec2::new(4, 0);
        let reflection = agent.confine(&BoundaryPolicy::new(arena, false), &mut rng);
        assert!(reflection.x);
        assert_eq!(agent.color, Rgb::new(255, 255, 255));
        assert_eq!(agent.position.x, arena.x_max);
        assert_eq!(agent.direction.x, -4);

        // Random channels are drawn from 0..255, so white can never come back.
        agent.position.x = arena.x_min - 1;
        agent.confine(&BoundaryPolicy::new(arena, true), &mut rng);
        assert_ne!(agent.color, Rgb::new(255, 255, 255));
    }

    #[test]
    fn view_copies_render_fields() {
        let agent = agent_at(111, 222);
        let view = agent.view();
        assert_eq!(view.position, IVec2::new(111, 222));
        assert_eq!(view.radius, 15);
        assert_eq!(view.visible, agent.is_visible());
    }
}
