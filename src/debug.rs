/*
 * Debug Information Module
 *
 * Counters describing the most recent tick, logged by the world and shown
 * in the control window's debug section.
 */

use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub tick: u64,
    pub active: usize,
    pub collisions: usize,
    pub reflections: usize,
    pub reseeded: usize,
    pub step_time: Duration,
}
