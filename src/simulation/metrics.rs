//! Performance metrics of a simulated timeline.
//!
//! Computes standard single-processor scheduling indicators from a
//! timeline and the task set it was produced from.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - service |
//! | Response | first start - arrival |
//! | Tardiness | max(0, completion - deadline) |
//! | Makespan | Latest completion time |
//! | Utilization | busy time / (makespan - earliest arrival) |
//! | Throughput | tasks / (makespan - earliest arrival) |
//!
//! Waiting time is always derived from turnaround. It is not accumulated
//! from gaps between a task's bursts.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{Task, Timeline, Violation};

/// Metrics for a single task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMetrics {
    /// Task ID.
    pub task_id: String,
    /// Arrival time (copied from the task).
    pub arrival: i64,
    /// Service time (copied from the task).
    pub service: i64,
    /// Finish time of the task's last entry.
    pub completion: i64,
    /// Time from arrival to completion.
    pub turnaround: i64,
    /// Time ready but not executing.
    pub waiting: i64,
    /// Time from arrival to first dispatch.
    pub response: i64,
    /// Lateness past the deadline; `None` if the task has no deadline.
    pub tardiness: Option<i64>,
}

/// Aggregate metrics for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Per-task metrics in input order.
    pub per_task: Vec<TaskMetrics>,
    /// Mean waiting time (0 for an empty task set).
    pub average_waiting: f64,
    /// Mean turnaround time (0 for an empty task set).
    pub average_turnaround: f64,
    /// Mean response time (0 for an empty task set).
    pub average_response: f64,
    /// Latest completion time.
    pub makespan: i64,
    /// Total time the processor executes tasks.
    pub busy_time: i64,
    /// Busy fraction between the first arrival and the makespan (0.0..=1.0).
    pub utilization: f64,
    /// Completed tasks per time unit over the same span.
    pub throughput: f64,
    /// Number of dispatches that switch to a different task.
    pub context_switches: usize,
    /// Tasks completing after their deadline.
    pub deadline_misses: usize,
}

impl Metrics {
    /// Computes metrics from a timeline and its input tasks.
    ///
    /// The timeline must be consistent with `tasks` (every task present,
    /// executed for exactly its service time, no overlap, no early start).
    /// Otherwise the detected violations are returned and nothing is computed.
    ///
    /// # Arguments
    /// * `timeline` - The simulated timeline.
    /// * `tasks` - The input tasks (for arrival, service and deadlines).
    pub fn calculate(timeline: &Timeline, tasks: &[Task]) -> Result<Self, Vec<Violation>> {
        let violations = timeline.verify(tasks);
        if !violations.is_empty() {
            return Err(violations);
        }

        let mut per_task = Vec::with_capacity(tasks.len());
        for task in tasks {
            // verify() guarantees every task has at least one entry
            let (Some(completion), Some(first_start)) =
                (timeline.completion_time(&task.id), timeline.first_start(&task.id))
            else {
                return Err(vec![Violation::missing_task(&task.id)]);
            };

            let turnaround = completion - task.arrival;
            per_task.push(TaskMetrics {
                task_id: task.id.clone(),
                arrival: task.arrival,
                service: task.service,
                completion,
                turnaround,
                waiting: turnaround - task.service,
                response: first_start - task.arrival,
                tardiness: task.deadline.map(|d| (completion - d).max(0)),
            });
        }

        let average_waiting = mean(per_task.iter().map(|m| m.waiting));
        let average_turnaround = mean(per_task.iter().map(|m| m.turnaround));
        let average_response = mean(per_task.iter().map(|m| m.response));

        let makespan = timeline.makespan();
        let busy_time = timeline.busy_time();
        let span = tasks
            .iter()
            .map(|t| t.arrival)
            .min()
            .map_or(0, |first| makespan - first);

        let (utilization, throughput) = if span > 0 {
            (
                busy_time as f64 / span as f64,
                tasks.len() as f64 / span as f64,
            )
        } else {
            (0.0, 0.0)
        };

        let deadline_misses = per_task
            .iter()
            .filter(|m| m.tardiness.is_some_and(|t| t > 0))
            .count();

        Ok(Self {
            per_task,
            average_waiting,
            average_turnaround,
            average_response,
            makespan,
            busy_time,
            utilization,
            throughput,
            context_switches: timeline.context_switches(),
            deadline_misses,
        })
    }

    /// Metrics for a single task.
    pub fn for_task(&self, task_id: &str) -> Option<&TaskMetrics> {
        self.per_task.iter().find(|m| m.task_id == task_id)
    }

    /// Waiting time for a task.
    pub fn waiting(&self, task_id: &str) -> Option<i64> {
        self.for_task(task_id).map(|m| m.waiting)
    }

    /// Turnaround time for a task.
    pub fn turnaround(&self, task_id: &str) -> Option<i64> {
        self.for_task(task_id).map(|m| m.turnaround)
    }
}

fn mean(values: impl ExactSizeIterator<Item = i64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.map(|v| v as f64).sum::<f64>() / n as f64
}
