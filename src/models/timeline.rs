//! Timeline (simulation output) model.
//!
//! A timeline is the ordered record of which task occupied the single
//! processor over which interval. Each entry is one uninterrupted burst.
//!
//! # Invariants
//! For a timeline produced from a task set:
//! - entries are ordered by `start` and never overlap
//! - each task's entry durations sum to exactly its `service`
//! - no entry starts before its task's arrival

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Task;

/// One uninterrupted burst of execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Executing task ID.
    pub task_id: String,
    /// Burst start time.
    pub start: i64,
    /// Burst end time (exclusive, > start).
    pub finish: i64,
}

impl TimelineEntry {
    /// Creates a new entry.
    pub fn new(task_id: impl Into<String>, start: i64, finish: i64) -> Self {
        Self {
            task_id: task_id.into(),
            start,
            finish,
        }
    }

    /// Burst length (finish - start).
    #[inline]
    pub fn duration(&self) -> i64 {
        self.finish - self.start
    }
}

/// Ordered sequence of execution bursts on one processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

/// A broken timeline invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related task ID.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of timeline violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Entry starts before the previous entry finished (or out of order).
    Overlap,
    /// Entry starts before its task arrived.
    EarlyStart,
    /// Executed time for a task differs from its service time.
    ServiceMismatch,
    /// Entry references a task that is not in the task set.
    UnknownTask,
    /// A task from the task set never executes.
    MissingTask,
    /// Entry with `finish <= start`.
    EmptyInterval,
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }

    /// A task with no entry in the timeline.
    pub(crate) fn missing_task(task_id: &str) -> Self {
        Self::new(
            ViolationType::MissingTask,
            task_id,
            format!("Task '{task_id}' never executes"),
        )
    }
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Callers append in start order.
    pub fn push(&mut self, entry: TimelineEntry) {
        self.entries.push(entry);
    }

    /// Appends a burst, merging it into the last entry when the same task
    /// continues without a gap.
    pub fn push_or_extend(&mut self, task_id: &str, start: i64, finish: i64) {
        if let Some(last) = self.entries.last_mut() {
            if last.task_id == task_id && last.finish == start {
                last.finish = finish;
                return;
            }
        }
        self.entries.push(TimelineEntry::new(task_id, start, finish));
    }

    /// All entries in start order.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Iterates over entries in start order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimelineEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timeline has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Latest finish time across all entries (0 if empty).
    pub fn makespan(&self) -> i64 {
        self.entries.iter().map(|e| e.finish).max().unwrap_or(0)
    }

    /// Total time the processor is busy.
    pub fn busy_time(&self) -> i64 {
        self.entries.iter().map(TimelineEntry::duration).sum()
    }

    /// Returns all entries for a given task.
    pub fn entries_for_task(&self, task_id: &str) -> Vec<&TimelineEntry> {
        self.entries
            .iter()
            .filter(|e| e.task_id == task_id)
            .collect()
    }

    /// Completion time for a task (finish of its last entry).
    pub fn completion_time(&self, task_id: &str) -> Option<i64> {
        self.entries
            .iter()
            .filter(|e| e.task_id == task_id)
            .map(|e| e.finish)
            .max()
    }

    /// First dispatch time for a task.
    pub fn first_start(&self, task_id: &str) -> Option<i64> {
        self.entries
            .iter()
            .filter(|e| e.task_id == task_id)
            .map(|e| e.start)
            .min()
    }

    /// Number of dispatches that switch to a different task.
    pub fn context_switches(&self) -> usize {
        self.entries
            .windows(2)
            .filter(|w| w[0].task_id != w[1].task_id)
            .count()
    }

    /// Checks the timeline against the task set it was produced from.
    ///
    /// Returns every violation found; an empty vector means the timeline
    /// is consistent with `tasks`.
    pub fn verify(&self, tasks: &[Task]) -> Vec<Violation> {
        let mut violations = Vec::new();
        let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
        let mut executed: HashMap<&str, i64> = HashMap::new();

        for entry in &self.entries {
            if entry.finish <= entry.start {
                violations.push(Violation::new(
                    ViolationType::EmptyInterval,
                    &entry.task_id,
                    format!(
                        "Entry [{}, {}) for '{}' is empty",
                        entry.start, entry.finish, entry.task_id
                    ),
                ));
            }

            match by_id.get(entry.task_id.as_str()) {
                Some(task) => {
                    if entry.start < task.arrival {
                        violations.push(Violation::new(
                            ViolationType::EarlyStart,
                            &entry.task_id,
                            format!(
                                "Task '{}' starts at {} before arrival {}",
                                task.id, entry.start, task.arrival
                            ),
                        ));
                    }
                    *executed.entry(task.id.as_str()).or_insert(0) += entry.duration();
                }
                None => violations.push(Violation::new(
                    ViolationType::UnknownTask,
                    &entry.task_id,
                    format!("Entry references unknown task '{}'", entry.task_id),
                )),
            }
        }

        for pair in self.entries.windows(2) {
            if pair[0].finish > pair[1].start {
                violations.push(Violation::new(
                    ViolationType::Overlap,
                    &pair[1].task_id,
                    format!(
                        "Entry for '{}' at {} starts before '{}' finishes at {}",
                        pair[1].task_id, pair[1].start, pair[0].task_id, pair[0].finish
                    ),
                ));
            }
        }

        for task in tasks {
            match executed.get(task.id.as_str()) {
                None => violations.push(Violation::missing_task(&task.id)),
                Some(&ran) if ran != task.service => violations.push(Violation::new(
                    ViolationType::ServiceMismatch,
                    &task.id,
                    format!(
                        "Task '{}' executes for {} but requires {}",
                        task.id, ran, task.service
                    ),
                )),
                Some(_) => {}
            }
        }

        violations
    }
}

impl From<Vec<TimelineEntry>> for Timeline {
    fn from(entries: Vec<TimelineEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineEntry;
    type IntoIter = std::slice::Iter<'a, TimelineEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
