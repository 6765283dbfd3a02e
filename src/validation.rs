//! Input validation for simulation runs.
//!
//! Checks task records and policy configuration before any simulation
//! work begins. Detects:
//! - Malformed tasks (empty or duplicate IDs, negative arrival,
//!   non-positive service, negative deadline)
//! - Missing policy configuration (round-robin quantum, task priorities)
//! - Unknown policy names
//!
//! All problems are collected, not just the first one.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::models::Task;
use crate::policies::Policy;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending task ID or policy name.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// A task record has a missing or out-of-range field.
    InvalidTask,
    /// The selected policy lacks configuration it requires.
    MissingPolicyConfig,
    /// A policy name does not match any supported policy.
    UnknownPolicy,
}

impl ValidationError {
    fn new(
        kind: ValidationErrorKind,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid task error.
    pub fn invalid_task(task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidTask, task_id, message)
    }

    /// Creates a missing policy configuration error.
    pub fn missing_config(entity_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::MissingPolicyConfig, entity_id, message)
    }

    /// Creates an unknown policy error.
    pub fn unknown_policy(name: impl Into<String>) -> Self {
        let name = name.into();
        let message = format!(
            "Unknown policy '{name}' (expected one of FCFS, SJF, SRTF, Priority, RoundRobin)"
        );
        Self::new(ValidationErrorKind::UnknownPolicy, name, message)
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidTask => "invalid task",
            Self::MissingPolicyConfig => "missing policy configuration",
            Self::UnknownPolicy => "unknown policy",
        };
        f.write_str(s)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates task records.
///
/// Checks:
/// 1. Every task has a non-empty ID
/// 2. No duplicate task IDs
/// 3. `arrival >= 0`
/// 4. `service > 0`
/// 5. `deadline >= 0` when present
/// 6. The latest arrival plus the total service fits in `i64`, so no
///    completion time can overflow
///
/// An empty task set is valid.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for (index, task) in tasks.iter().enumerate() {
        if task.id.trim().is_empty() {
            errors.push(ValidationError::invalid_task(
                format!("#{index}"),
                format!("Task at position {index} has an empty ID"),
            ));
        } else if !ids.insert(task.id.as_str()) {
            errors.push(ValidationError::invalid_task(
                &task.id,
                format!("Duplicate task ID: {}", task.id),
            ));
        }

        if task.arrival < 0 {
            errors.push(ValidationError::invalid_task(
                &task.id,
                format!("Task '{}' has negative arrival {}", task.id, task.arrival),
            ));
        }

        if task.service <= 0 {
            errors.push(ValidationError::invalid_task(
                &task.id,
                format!(
                    "Task '{}' has non-positive service {}",
                    task.id, task.service
                ),
            ));
        }

        if let Some(deadline) = task.deadline {
            if deadline < 0 {
                errors.push(ValidationError::invalid_task(
                    &task.id,
                    format!("Task '{}' has negative deadline {deadline}", task.id),
                ));
            }
        }
    }

    if let Some(task) = first_past_horizon(tasks) {
        errors.push(ValidationError::invalid_task(
            &task.id,
            format!(
                "Task '{}' pushes the time horizon past {}",
                task.id,
                i64::MAX
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Returns the task at which `max(arrival) + sum(service)` stops fitting in `i64`.
///
/// Negative fields count as zero; they are reported by their own checks.
fn first_past_horizon(tasks: &[Task]) -> Option<&Task> {
    let mut latest_arrival = 0i64;
    let mut total_service = 0i64;
    for task in tasks {
        latest_arrival = latest_arrival.max(task.arrival);
        total_service = match total_service.checked_add(task.service.max(0)) {
            Some(total) => total,
            None => return Some(task),
        };
        if latest_arrival.checked_add(total_service).is_none() {
            return Some(task);
        }
    }
    None
}

/// Validates the configuration a policy requires.
///
/// - Round-robin needs `quantum > 0`.
/// - Priority needs a priority on every task.
///
/// A quantum supplied for another policy is ignored.
pub fn validate_policy_config(
    tasks: &[Task],
    policy: Policy,
    quantum: Option<i64>,
) -> ValidationResult {
    let mut errors = Vec::new();

    if policy.requires_quantum() {
        match quantum {
            None => errors.push(ValidationError::missing_config(
                policy.name(),
                format!("{policy} requires a time quantum"),
            )),
            Some(q) if q <= 0 => errors.push(ValidationError::missing_config(
                policy.name(),
                format!("{policy} requires a positive time quantum, got {q}"),
            )),
            Some(_) => {}
        }
    }

    if policy.requires_priority() {
        for task in tasks.iter().filter(|t| t.priority.is_none()) {
            errors.push(ValidationError::missing_config(
                &task.id,
                format!("Task '{}' has no priority ({policy} policy)", task.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates tasks and policy configuration together.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(tasks: &[Task], policy: Policy, quantum: Option<i64>) -> ValidationResult {
    let mut errors = Vec::new();
    if let Err(e) = validate_tasks(tasks) {
        errors.extend(e);
    }
    if let Err(e) = validate_policy_config(tasks, policy, quantum) {
        errors.extend(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
