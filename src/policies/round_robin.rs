//! Round-robin with a fixed time quantum.
//!
//! # Algorithm
//! 1. Admit arrived tasks to a FIFO ready queue (arrival order).
//! 2. Pop the head and run it for `min(quantum, remaining)`.
//! 3. Admit tasks that arrived during (or at the end of) the slice.
//! 4. Re-append the preempted task behind them if it still has work.
//!
//! If the queue is empty while tasks are still to arrive, the clock
//! jumps to the next arrival. Every dispatch is its own entry, even when
//! the same task runs again immediately.

use std::collections::VecDeque;

use super::working::WorkingSet;
use super::SchedulingPolicy;
use crate::models::{Task, Timeline, TimelineEntry};
use crate::validation::ValidationError;

/// Round-robin policy.
///
/// The quantum is always positive; construct with [`RoundRobin::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobin {
    quantum: i64,
}

impl RoundRobin {
    /// Creates a round-robin policy with the given time quantum.
    ///
    /// Fails with `MissingPolicyConfig` if `quantum <= 0`.
    pub fn new(quantum: i64) -> Result<Self, ValidationError> {
        if quantum <= 0 {
            return Err(ValidationError::missing_config(
                "RoundRobin",
                format!("RoundRobin requires a positive time quantum, got {quantum}"),
            ));
        }
        Ok(Self { quantum })
    }

    /// Maximum slice length per dispatch.
    pub fn quantum(&self) -> i64 {
        self.quantum
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RoundRobin"
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn schedule(&self, tasks: &[Task]) -> Timeline {
        let mut timeline = Timeline::new();
        let mut ws = WorkingSet::new(tasks);
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(tasks.len());
        let mut now = 0;

        loop {
            ws.admit(now, |i| queue.push_back(i));

            let Some(current) = queue.pop_front() else {
                match ws.next_arrival_time() {
                    Some(arrival) => {
                        now = arrival;
                        continue;
                    }
                    None => break,
                }
            };

            let slice = self.quantum.min(ws.remaining(current));
            timeline.push(TimelineEntry::new(&ws.task(current).id, now, now + slice));
            ws.consume(current, slice);
            now += slice;

            // Arrivals during the slice queue ahead of the preempted task.
            ws.admit(now, |i| queue.push_back(i));
            if ws.remaining(current) > 0 {
                queue.push_back(current);
            }
        }

        timeline
    }

    fn description(&self) -> &'static str {
        "Round Robin"
    }
}
