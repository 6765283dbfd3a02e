//! Non-preemptive policies: FCFS, SJF and priority.
//!
//! A dispatched task always runs to completion. SJF and priority share
//! one event-driven loop that differs only in the selection key.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::working::{arrival_order, WorkingSet};
use super::SchedulingPolicy;
use crate::models::{Task, Timeline, TimelineEntry};

/// First-Come-First-Served.
///
/// Tasks run in arrival order (input order on ties), each starting at
/// `max(now, arrival)`.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn schedule(&self, tasks: &[Task]) -> Timeline {
        let mut timeline = Timeline::new();
        let mut now = 0;
        for index in arrival_order(tasks) {
            let task = &tasks[index];
            let start = now.max(task.arrival);
            now = start + task.service;
            timeline.push(TimelineEntry::new(&task.id, start, now));
        }
        timeline
    }

    fn description(&self) -> &'static str {
        "First-Come-First-Served"
    }
}

/// Shortest-Job-First.
///
/// Among arrived tasks, the one with the smallest service runs next.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl SchedulingPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn schedule(&self, tasks: &[Task]) -> Timeline {
        run_to_completion(tasks, |task| task.service)
    }

    fn description(&self) -> &'static str {
        "Shortest-Job-First"
    }
}

/// Non-preemptive priority.
///
/// Among arrived tasks, the one with the lowest priority value runs next.
/// Tasks without a priority rank after every prioritized task.
#[derive(Debug, Clone, Copy)]
pub struct PriorityFirst;

impl SchedulingPolicy for PriorityFirst {
    fn name(&self) -> &'static str {
        "Priority"
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn schedule(&self, tasks: &[Task]) -> Timeline {
        run_to_completion(tasks, |task| task.priority.unwrap_or(i32::MAX))
    }

    fn description(&self) -> &'static str {
        "Non-preemptive Priority"
    }
}

/// Dispatches ready tasks by `(key, arrival, input index)` and runs each
/// to completion. When nothing is ready the clock jumps to the next arrival.
fn run_to_completion<K: Ord>(tasks: &[Task], key: impl Fn(&Task) -> K) -> Timeline {
    let mut timeline = Timeline::new();
    let mut ws = WorkingSet::new(tasks);
    let mut ready = BinaryHeap::new();
    let mut now = 0;

    loop {
        ws.admit(now, |i| ready.push(Reverse((key(&tasks[i]), tasks[i].arrival, i))));

        let Some(Reverse((_, _, index))) = ready.pop() else {
            match ws.next_arrival_time() {
                Some(arrival) => {
                    now = arrival;
                    continue;
                }
                None => break,
            }
        };

        let task = ws.task(index);
        let finish = now + task.service;
        timeline.push(TimelineEntry::new(&task.id, now, finish));
        now = finish;
    }

    timeline
}
