//! Shortest-Remaining-Time-First (preemptive SJF).
//!
//! # Algorithm
//! Event-driven: decisions happen only at arrivals and completions.
//! 1. Admit every task that has arrived by `now`.
//! 2. Keep the running task unless a ready task has strictly less
//!    remaining time; otherwise switch.
//! 3. Run until the earlier of the running task's completion and the
//!    next arrival.
//!
//! Entry boundaries are identical to a unit-step simulation that
//! re-evaluates every time unit and keeps the incumbent on ties.
//!
//! # Complexity
//! O(n log n) for n tasks, independent of the total elapsed time.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::working::WorkingSet;
use super::SchedulingPolicy;
use crate::models::{Task, Timeline};

/// Shortest-Remaining-Time-First.
///
/// Ready tasks are ordered by `(remaining, arrival, input index)`.
#[derive(Debug, Clone, Copy)]
pub struct Srtf;

impl SchedulingPolicy for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn schedule(&self, tasks: &[Task]) -> Timeline {
        let mut timeline = Timeline::new();
        let mut ws = WorkingSet::new(tasks);
        let mut ready: BinaryHeap<Reverse<(i64, i64, usize)>> = BinaryHeap::new();
        let mut running: Option<usize> = None;
        let mut now = 0;

        loop {
            // Newly admitted tasks have not run yet: remaining == service.
            ws.admit(now, |i| ready.push(Reverse((tasks[i].service, tasks[i].arrival, i))));

            running = match running {
                Some(current) => match ready.peek() {
                    Some(&Reverse((remaining, _, _))) if remaining < ws.remaining(current) => {
                        let task = ws.task(current);
                        ready.push(Reverse((ws.remaining(current), task.arrival, current)));
                        ready.pop().map(|Reverse((_, _, i))| i)
                    }
                    _ => Some(current),
                },
                None => ready.pop().map(|Reverse((_, _, i))| i),
            };

            let Some(current) = running else {
                match ws.next_arrival_time() {
                    Some(arrival) => {
                        now = arrival;
                        continue;
                    }
                    None => break,
                }
            };

            let completion = now + ws.remaining(current);
            let until = match ws.next_arrival_time() {
                Some(arrival) => completion.min(arrival),
                None => completion,
            };

            timeline.push_or_extend(&ws.task(current).id, now, until);
            ws.consume(current, until - now);
            now = until;

            if ws.remaining(current) == 0 {
                running = None;
            }
        }

        timeline
    }

    fn description(&self) -> &'static str {
        "Shortest-Remaining-Time-First"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimelineEntry;

    /// Unit-step reference: re-evaluates every time unit and keeps the
    /// incumbent unless a ready task has strictly less remaining time.
    fn unit_step(tasks: &[Task]) -> Timeline {
        let mut remaining: Vec<i64> = tasks.iter().map(|t| t.service).collect();
        let mut timeline = Timeline::new();
        let mut running: Option<usize> = None;
        let mut now = 0;

        while remaining.iter().any(|&r| r > 0) {
            let best = (0..tasks.len())
                .filter(|&i| remaining[i] > 0 && tasks[i].arrival <= now)
                .min_by_key(|&i| (remaining[i], tasks[i].arrival, i));

            let Some(best) = best else {
                now += 1;
                continue;
            };

            let pick = match running {
                Some(cur) if remaining[cur] > 0 && remaining[cur] <= remaining[best] => cur,
                _ => best,
            };

            timeline.push_or_extend(&tasks[pick].id, now, now + 1);
            remaining[pick] -= 1;
            running = Some(pick);
            now += 1;
        }

        timeline
    }

    #[test]
    fn test_srtf_preempts_on_shorter_arrival() {
        let tasks = vec![Task::new("P1", 0, 5), Task::new("P2", 1, 3)];
        let t = Srtf.schedule(&tasks);
        assert_eq!(
            t.entries(),
            &[
                TimelineEntry::new("P1", 0, 1),
                TimelineEntry::new("P2", 1, 4),
                TimelineEntry::new("P1", 4, 8),
            ]
        );
    }

    #[test]
    fn test_srtf_keeps_incumbent_on_tie() {
        // At t=2, P1 has 3 left and P2 needs 3 → no preemption
        let tasks = vec![Task::new("P1", 0, 5), Task::new("P2", 2, 3)];
        let t = Srtf.schedule(&tasks);
        assert_eq!(
            t.entries(),
            &[TimelineEntry::new("P1", 0, 5), TimelineEntry::new("P2", 5, 8)]
        );
    }

    #[test]
    fn test_srtf_arrival_without_preemption_keeps_one_entry() {
        let tasks = vec![Task::new("P1", 0, 3), Task::new("P2", 1, 10)];
        let t = Srtf.schedule(&tasks);
        assert_eq!(
            t.entries(),
            &[TimelineEntry::new("P1", 0, 3), TimelineEntry::new("P2", 3, 13)]
        );
    }

    #[test]
    fn test_srtf_idle_then_resume() {
        let tasks = vec![Task::new("P1", 0, 2), Task::new("P2", 5, 2)];
        let t = Srtf.schedule(&tasks);
        assert_eq!(
            t.entries(),
            &[TimelineEntry::new("P1", 0, 2), TimelineEntry::new("P2", 5, 7)]
        );
    }

    #[test]
    fn test_srtf_matches_unit_step_reference() {
        let tasks = vec![
            Task::new("P1", 0, 8),
            Task::new("P2", 1, 4),
            Task::new("P3", 2, 9),
            Task::new("P4", 3, 5),
            Task::new("P5", 3, 2),
            Task::new("P6", 20, 1),
            Task::new("P7", 21, 3),
        ];
        assert_eq!(Srtf.schedule(&tasks), unit_step(&tasks));
    }

    #[test]
    fn test_srtf_input_untouched() {
        let tasks = vec![Task::new("P1", 0, 5), Task::new("P2", 1, 3)];
        let before = tasks.clone();
        let _ = Srtf.schedule(&tasks);
        assert_eq!(tasks, before);
    }

    #[test]
    fn test_srtf_empty() {
        assert!(Srtf.schedule(&[]).is_empty());
    }
}
