//! Per-run working state shared by the event-driven policies.
//!
//! Tasks stay immutable; mutable `remaining` service lives in a separate
//! table indexed by input position and is dropped when the run ends.

use crate::models::Task;

/// Remaining-service table for one simulation run.
#[derive(Debug, Clone)]
pub(crate) struct WorkingSet<'a> {
    tasks: &'a [Task],
    remaining: Vec<i64>,
    /// Task indices in arrival order (stable on ties).
    arrivals: Vec<usize>,
    /// Position of the next not-yet-admitted task in `arrivals`.
    next_arrival: usize,
}

impl<'a> WorkingSet<'a> {
    pub(crate) fn new(tasks: &'a [Task]) -> Self {
        Self {
            tasks,
            remaining: tasks.iter().map(|t| t.service).collect(),
            arrivals: arrival_order(tasks),
            next_arrival: 0,
        }
    }

    #[inline]
    pub(crate) fn task(&self, index: usize) -> &'a Task {
        &self.tasks[index]
    }

    #[inline]
    pub(crate) fn remaining(&self, index: usize) -> i64 {
        self.remaining[index]
    }

    /// Consumes `amount` of a task's remaining service.
    #[inline]
    pub(crate) fn consume(&mut self, index: usize, amount: i64) {
        self.remaining[index] -= amount;
    }

    /// Admits every task that has arrived by `now`, in arrival order.
    pub(crate) fn admit(&mut self, now: i64, mut enqueue: impl FnMut(usize)) {
        while let Some(&index) = self.arrivals.get(self.next_arrival) {
            if !self.tasks[index].has_arrived(now) {
                break;
            }
            enqueue(index);
            self.next_arrival += 1;
        }
    }

    /// Arrival time of the next task not yet admitted.
    pub(crate) fn next_arrival_time(&self) -> Option<i64> {
        self.arrivals
            .get(self.next_arrival)
            .map(|&index| self.tasks[index].arrival)
    }
}

/// Task indices sorted by arrival time; ties keep input order.
pub(crate) fn arrival_order(tasks: &[Task]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..tasks.len()).collect();
    order.sort_by_key(|&i| tasks[i].arrival);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrival_order_is_stable() {
        let tasks = vec![
            Task::new("A", 3, 1),
            Task::new("B", 0, 1),
            Task::new("C", 3, 1),
            Task::new("D", 1, 1),
        ];
        assert_eq!(arrival_order(&tasks), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_admit_and_next_arrival() {
        let tasks = vec![Task::new("A", 0, 4), Task::new("B", 2, 1), Task::new("C", 5, 1)];
        let mut ws = WorkingSet::new(&tasks);
        let mut admitted = Vec::new();

        ws.admit(2, |i| admitted.push(i));
        assert_eq!(admitted, vec![0, 1]);
        assert_eq!(ws.next_arrival_time(), Some(5));

        ws.admit(4, |i| admitted.push(i));
        assert_eq!(admitted.len(), 2);

        ws.admit(5, |i| admitted.push(i));
        assert_eq!(admitted, vec![0, 1, 2]);
        assert_eq!(ws.next_arrival_time(), None);
    }

    #[test]
    fn test_consume_leaves_tasks_untouched() {
        let tasks = vec![Task::new("A", 0, 4)];
        let mut ws = WorkingSet::new(&tasks);
        ws.consume(0, 3);
        assert_eq!(ws.remaining(0), 1);
        assert_eq!(tasks[0].service, 4);
    }
}
