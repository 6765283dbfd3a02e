//! Task (process) model.
//!
//! A task is one unit of CPU work competing for the single processor:
//! it becomes eligible at its arrival time and needs a fixed amount of
//! service before it completes.
//!
//! # Time Representation
//! All times are integer simulation time units relative to t=0.
//! The caller defines what one unit means (tick, ms, quantum of work).

use serde::{Deserialize, Serialize};

/// A task to be simulated.
///
/// Immutable input record. Policies never modify tasks; preemptive
/// policies keep their mutable state in a separate working table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier (e.g. "P1").
    pub id: String,
    /// Earliest time the task may run (>= 0).
    pub arrival: i64,
    /// Total execution time required (> 0). Also known as burst time.
    pub service: i64,
    /// Scheduling priority (lower value = more urgent). Required by the
    /// priority policy only.
    #[serde(default)]
    pub priority: Option<i32>,
    /// Latest desired completion time. Reported by metrics, never used
    /// for dispatch decisions.
    #[serde(default)]
    pub deadline: Option<i64>,
}

impl Task {
    /// Creates a task with the given arrival and service times.
    pub fn new(id: impl Into<String>, arrival: i64, service: i64) -> Self {
        Self {
            id: id.into(),
            arrival,
            service,
            priority: None,
            deadline: None,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the deadline.
    pub fn with_deadline(mut self, deadline: i64) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Whether the task has arrived by `time`.
    #[inline]
    pub fn has_arrived(&self, time: i64) -> bool {
        self.arrival <= time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("P1", 2, 5).with_priority(3).with_deadline(20);

        assert_eq!(task.id, "P1");
        assert_eq!(task.arrival, 2);
        assert_eq!(task.service, 5);
        assert_eq!(task.priority, Some(3));
        assert_eq!(task.deadline, Some(20));
    }

    #[test]
    fn test_task_defaults() {
        let task = Task::new("P1", 0, 1);
        assert_eq!(task.priority, None);
        assert_eq!(task.deadline, None);
    }

    #[test]
    fn test_has_arrived() {
        let task = Task::new("P1", 4, 1);
        assert!(!task.has_arrived(3));
        assert!(task.has_arrived(4));
        assert!(task.has_arrived(10));
    }

    #[test]
    fn test_task_deserialize_optional_fields() {
        let task: Task =
            serde_json::from_str(r#"{"id":"P2","arrival":1,"service":3}"#).unwrap();
        assert_eq!(task, Task::new("P2", 1, 3));

        let task: Task = serde_json::from_str(
            r#"{"id":"P3","arrival":0,"service":2,"priority":1,"deadline":9}"#,
        )
        .unwrap();
        assert_eq!(task.priority, Some(1));
        assert_eq!(task.deadline, Some(9));
    }
}
