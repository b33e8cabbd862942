/*
 * Physics Module
 *
 * This module handles the flocking step for every active agent. Each agent
 * looks at all the other active agents (no spatial partitioning) and combines
 * three rules into a steering delta:
 * 1. Separation: push away from agents it currently overlaps
 * 2. Alignment: steer towards the average heading of the others
 * 3. Cohesion: drift towards the centroid of the others, damped by 100
 *
 * All three components share one neighbor counter. Every neighbor counts once,
 * and every overlapping neighbor counts a second time, so crowded agents get a
 * larger denominator for all three rules. This weighting is intentional.
 *
 * Agents are updated in place and in order: agent i sees agents before it at
 * their already-advanced state for this tick.
 */

use glam::{DVec2, IVec2};
use rand::Rng;
use tracing::trace;

use crate::agent::Agent;
use crate::boundary::BoundaryPolicy;
use crate::params::FlockWeights;

// Per-axis limit on the steering delta applied in a single tick.
pub const MAX_DELTA: i32 = 5;

// Raw (unweighted) flocking components for one agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlockComponents {
    pub separation: IVec2,
    pub alignment: IVec2,
    pub cohesion: IVec2,
    // Shared denominator: one per neighbor plus one per overlapping neighbor.
    pub count: i32,
}

pub fn flock_components<'a, I>(agent: &Agent, neighbors: I) -> FlockComponents
where
    I: IntoIterator<Item = &'a Agent>,
{
    let mut separation = IVec2::ZERO;
    let mut alignment = IVec2::ZERO;
    let mut centroid = IVec2::ZERO;
    let mut count = 0;

    for other in neighbors.into_iter().filter(|other| other.is_visible()) {
        if agent.overlaps(other) {
            separation += other.position - agent.position;
            count += 1;
        }
        alignment += other.direction;
        centroid += other.position;
        count += 1;
    }

    if count == 0 {
        return FlockComponents::default();
    }

    let centroid = centroid / count;
    FlockComponents {
        separation: -(separation / count),
        alignment: alignment / count,
        cohesion: (centroid - agent.position) / 100,
        count,
    }
}

// Limit each axis of a weighted delta to `±MAX_DELTA`, truncating toward zero.
pub fn clamp_delta(delta: DVec2) -> IVec2 {
    let limit = f64::from(MAX_DELTA);
    delta.clamp(DVec2::splat(-limit), DVec2::splat(limit)).as_ivec2()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockForceModel {
    weights: FlockWeights,
}

impl FlockForceModel {
    pub fn new(weights: FlockWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> FlockWeights {
        self.weights
    }

    // Weighted, clamped change to `agent`'s direction for this tick.
    pub fn compute_delta<'a, I>(&self, agent: &Agent, neighbors: I) -> IVec2
    where
        I: IntoIterator<Item = &'a Agent>,
    {
        let components = flock_components(agent, neighbors);
        let weighted = components.separation.as_dvec2() * self.weights.separation
            + components.alignment.as_dvec2() * self.weights.alignment
            + components.cohesion.as_dvec2() * self.weights.cohesion;
        clamp_delta(weighted)
    }
}

// What happened to the population during one flocking pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub moved: usize,
    pub reflections: usize,
    pub reseeded: usize,
}

// Advance every visible agent in `agents` by one flocking step and confine it to the arena.
pub fn update_agents<R: Rng + ?Sized>(
    agents: &mut [Agent],
    model: &FlockForceModel,
    policy: &BoundaryPolicy,
    rng: &mut R,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    for i in 0..agents.len() {
        let (before, rest) = agents.split_at_mut(i);
        let Some((agent, after)) = rest.split_first_mut() else {
            break;
        };
        if !agent.is_visible() {
            continue;
        }

        let delta = model.compute_delta(agent, before.iter().chain(after.iter()));

        if agent.recover_if_stuck() {
            trace!(id = agent.id(), "reseeded motionless agent");
            outcome.reseeded += 1;
        }
        agent.advance(delta);
        outcome.reflections += agent.confine(policy, rng).count();
        outcome.moved += 1;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Arena;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn agent(id: usize, position: (i32, i32), direction: (i32, i32)) -> Agent {
        let mut rng = StdRng::seed_from_u64(id as u64);
        let mut agent = Agent::new(id, 15, &Arena::default(), &mut rng);
        agent.show();
        agent.position = IVec2::new(position.0, position.1);
        agent.direction = IVec2::new(direction.0, direction.1);
        agent
    }

    fn full_weights() -> FlockWeights {
        FlockWeights { separation: 1.0, alignment: 1.0, cohesion: 1.0 }
    }

    #[test]
    fn no_neighbors_gives_zero_components() {
        let me = agent(0, (500, 400), (2, 1));
        let none: [&Agent; 0] = [];
        assert_eq!(flock_components(&me, none), FlockComponents::default());
        let model = FlockForceModel::new(full_weights());
        assert_eq!(model.compute_delta(&me, none), IVec2::ZERO);
    }

    #[test]
    fn distant_neighbor_counts_once() {
        let me = agent(0, (200, 400), (0, 0));
        let other = agent(1, (600, 400), (2, -2));
        let components = flock_components(&me, [&other]);
        assert_eq!(components.count, 1);
        assert_eq!(components.separation, IVec2::ZERO);
        assert_eq!(components.alignment, IVec2::new(2, -2));
        assert_eq!(components.cohesion, IVec2::new(4, 0));
    }

    #[test]
    fn overlapping_neighbor_counts_twice() {
        let me = agent(0, (500, 400), (0, 0));
        let other = agent(1, (520, 400), (4, 2));
        let components = flock_components(&me, [&other]);
        assert_eq!(components.count, 2);
        // Offset 20 split over the doubled count, pointing away from the neighbor.
        assert_eq!(components.separation, IVec2::new(-10, 0));
        assert_eq!(components.alignment, IVec2::new(2, 1));
        // Centroid 520 / 2 = 260, so the pull is (260 - 500) / 100.
        assert_eq!(components.cohesion, IVec2::new(-2, -2));
    }

    #[test]
    fn hidden_neighbors_are_ignored() {
        let me = agent(0, (500, 400), (1, 1));
        let mut other = agent(1, (510, 400), (3, 3));
        other.hide();
        assert_eq!(flock_components(&me, [&other]).count, 0);
    }

    #[test]
    fn extreme_weights_are_clamped_to_limit() {
        let me = agent(0, (500, 400), (0, 0));
        let other = agent(1, (900, 100), (3, -3));
        let model = FlockForceModel::new(FlockWeights {
            separation: 0.0,
            alignment: 1000.0,
            cohesion: 0.0,
        });
        assert_eq!(model.compute_delta(&me, [&other]), IVec2::new(MAX_DELTA, -MAX_DELTA));
    }

    #[test]
    fn clamp_truncates_toward_zero() {
        assert_eq!(clamp_delta(DVec2::new(2.9, -2.9)), IVec2::new(2, -2));
        assert_eq!(clamp_delta(DVec2::new(17.0, -0.5)), IVec2::new(5, 0));
    }

    #[test]
    fn zero_weights_give_inertial_motion() {
        let mut agents = vec![agent(0, (300, 300), (2, -1)), agent(1, (800, 600), (-3, 2))];
        let model = FlockForceModel::new(FlockWeights::ZERO);
        let policy = BoundaryPolicy::new(Arena::default(), true);
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = update_agents(&mut agents, &model, &policy, &mut rng);

        assert_eq!(outcome.moved, 2);
        assert_eq!(agents[0].position, IVec2::new(302, 299));
        assert_eq!(agents[0].direction, IVec2::new(2, -1));
        assert_eq!(agents[1].position, IVec2::new(797, 602));
        assert_eq!(agents[1].direction, IVec2::new(-3, 2));
    }

    #[test]
    fn motionless_agent_is_reseeded_before_moving() {
        let mut agents = vec![agent(0, (300, 300), (0, 0))];
        let model = FlockForceModel::new(full_weights());
        let policy = BoundaryPolicy::new(Arena::default(), true);
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = update_agents(&mut agents, &model, &policy, &mut rng);

        assert_eq!(outcome.reseeded, 1);
        assert_eq!(agents[0].position, IVec2::new(305, 305));
    }

    #[test]
    fn hidden_agents_do_not_move() {
        let mut agents = vec![agent(0, (300, 300), (2, 2)), agent(1, (700, 500), (1, 1))];
        agents[1].hide();
        let model = FlockForceModel::new(full_weights());
        let policy = BoundaryPolicy::new(Arena::default(), true);
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = update_agents(&mut agents, &model, &policy, &mut rng);

        assert_eq!(outcome.moved, 1);
        assert_eq!(agents[1].position, IVec2::new(700, 500));
    }
}
