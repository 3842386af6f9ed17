//! Oscillation cycle segmentation.
//!
//! A cycle is one full forward-and-back stroke. The counter edge-triggers
//! on "direction returned to the sequence's initial direction after having
//! left it", which fires exactly once per full oscillation. The first
//! sample is always labelled with the caller's `initial_cycle`; the counter
//! state lives for one burst only and is never shared between bursts.

use crate::types::Direction;

/// Stateful cycle counter, advanced once per direction value.
#[derive(Debug, Clone)]
pub struct CycleCounter {
    cycle: u32,
    initial_sign: Direction,
    former_sign: Direction,
}

impl CycleCounter {
    /// Start counting at `initial_cycle`, anchored on the first sample's
    /// direction. `former_sign` starts equal to `initial_sign` so the very
    /// first sample never triggers an increment.
    pub fn new(initial_cycle: u32, initial_sign: Direction) -> Self {
        Self {
            cycle: initial_cycle,
            initial_sign,
            former_sign: initial_sign,
        }
    }

    /// Feed the next direction value and get the cycle id it belongs to.
    pub fn advance(&mut self, sign: Direction) -> u32 {
        if sign == self.initial_sign && self.former_sign != self.initial_sign {
            self.cycle += 1;
        }
        self.former_sign = sign;
        self.cycle
    }
}

/// Assign a cycle id to every direction value in sequence order.
///
/// Ids are monotonically non-decreasing and start at `initial_cycle`.
pub fn assign_cycles(directions: &[Direction], initial_cycle: u32) -> Vec<u32> {
    let Some(&first) = directions.first() else {
        return Vec::new();
    };
    let mut counter = CycleCounter::new(initial_cycle, first);
    directions.iter().map(|&d| counter.advance(d)).collect()
}
