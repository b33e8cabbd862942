/*
 * Collision Module
 *
 * Detects overlapping pairs of visible agents and exchanges their directions.
 * Runs once per tick after every agent has moved, over unordered pairs (i, j)
 * with i < j. There is no cooldown: a pair that still overlaps on the next
 * tick swaps again.
 */

use tracing::trace;

use crate::agent::Agent;

#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    // Swap directions of every overlapping pair. Returns the number of swaps.
    pub fn resolve(&self, agents: &mut [Agent]) -> usize {
        let mut collisions = 0;

        for i in 0..agents.len() {
            let (head, tail) = agents.split_at_mut(i + 1);
            let first = &mut head[i];
            if !first.is_visible() {
                continue;
            }
            for second in tail.iter_mut().filter(|agent| agent.is_visible()) {
                if first.overlaps(second) {
                    trace!(a = first.id(), b = second.id(), "collision");
                    std::mem::swap(&mut first.direction, &mut second.direction);
                    collisions += 1;
                }
            }
        }

        collisions
    }
}
