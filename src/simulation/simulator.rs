//! Simulation orchestrator.
//!
//! Validates the task set and policy configuration, runs the selected
//! policy, and computes metrics from the resulting timeline.
//!
//! # Algorithm
//! 1. Validate tasks and policy configuration; fail fast with every error.
//! 2. Build the policy strategy.
//! 3. Simulate to produce the timeline.
//! 4. Compute metrics from the timeline and the original tasks.
//!
//! A run is a pure function of its inputs: no state survives the call and
//! the caller's tasks are never modified.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use super::Metrics;
use crate::models::{Task, Timeline, Violation};
use crate::policies::Policy;
use crate::validation::{validate_input, ValidationError};

/// Run configuration: the task set, the policy and its parameters.
///
/// # Example
///
/// ```
/// use u_cpusched::models::Task;
/// use u_cpusched::policies::Policy;
/// use u_cpusched::simulation::SimulationRequest;
///
/// let tasks = vec![Task::new("P1", 0, 5), Task::new("P2", 1, 3)];
/// let outcome = SimulationRequest::new(tasks, Policy::RoundRobin)
///     .with_quantum(2)
///     .run()
///     .unwrap();
/// assert_eq!(outcome.timeline.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Tasks to simulate.
    pub tasks: Vec<Task>,
    /// Dispatch policy.
    pub policy: Policy,
    /// Round-robin time quantum.
    #[serde(default)]
    pub quantum: Option<i64>,
}

impl SimulationRequest {
    /// Creates a new request.
    pub fn new(tasks: Vec<Task>, policy: Policy) -> Self {
        Self {
            tasks,
            policy,
            quantum: None,
        }
    }

    /// Sets the time quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Runs the simulation.
    pub fn run(&self) -> Result<SimulationOutcome, SimulationError> {
        simulate(&self.tasks, self.policy, self.quantum)
    }
}

/// Result of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Policy that produced the timeline.
    pub policy: Policy,
    /// Quantum used (round-robin only).
    pub quantum: Option<i64>,
    /// Execution timeline.
    pub timeline: Timeline,
    /// Metrics derived from the timeline.
    pub metrics: Metrics,
}

/// Why a simulation produced no outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Input or configuration rejected before any simulation work.
    Validation(Vec<ValidationError>),
    /// A policy produced a timeline that breaks a timeline invariant.
    Inconsistent(Vec<Violation>),
}

impl SimulationError {
    /// Validation errors, if the run was rejected before simulating.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            Self::Inconsistent(_) => &[],
        }
    }
}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<ValidationError> for SimulationError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(vec![error])
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, messages): (&str, Vec<&str>) = match self {
            Self::Validation(errors) => (
                "invalid simulation input",
                errors.iter().map(|e| e.message.as_str()).collect(),
            ),
            Self::Inconsistent(violations) => (
                "inconsistent timeline",
                violations.iter().map(|v| v.message.as_str()).collect(),
            ),
        };
        write!(f, "{label}: {}", messages.join("; "))
    }
}

impl std::error::Error for SimulationError {}

/// Simulates `tasks` under `policy`.
///
/// `quantum` is required for round-robin and ignored otherwise.
/// An empty task set yields an empty timeline and zero averages.
///
/// # Example
///
/// ```
/// use u_cpusched::models::Task;
/// use u_cpusched::policies::Policy;
/// use u_cpusched::simulation::simulate;
///
/// let tasks = vec![Task::new("P1", 0, 5), Task::new("P2", 1, 3)];
/// let outcome = simulate(&tasks, Policy::Fcfs, None).unwrap();
/// assert!((outcome.metrics.average_waiting - 2.0).abs() < 1e-10);
/// ```
pub fn simulate(
    tasks: &[Task],
    policy: Policy,
    quantum: Option<i64>,
) -> Result<SimulationOutcome, SimulationError> {
    debug!(%policy, tasks = tasks.len(), ?quantum, "starting simulation");

    if let Err(errors) = validate_input(tasks, policy, quantum) {
        for e in &errors {
            warn!(kind = %e.kind, entity = %e.entity_id, "{}", e.message);
        }
        return Err(errors.into());
    }

    let quantum = if policy.requires_quantum() { quantum } else { None };
    let strategy = policy.strategy(quantum)?;
    let timeline = strategy.schedule(tasks);
    let metrics = Metrics::calculate(&timeline, tasks).map_err(SimulationError::Inconsistent)?;

    info!(
        %policy,
        entries = timeline.len(),
        makespan = metrics.makespan,
        average_waiting = metrics.average_waiting,
        average_turnaround = metrics.average_turnaround,
        "simulation complete"
    );

    Ok(SimulationOutcome {
        policy,
        quantum,
        timeline,
        metrics,
    })
}

/// Simulates with a policy given by name (e.g. "Round Robin").
///
/// Unknown names fail with an `UnknownPolicy` validation error.
pub fn simulate_named(
    tasks: &[Task],
    policy: &str,
    quantum: Option<i64>,
) -> Result<SimulationOutcome, SimulationError> {
    let policy = policy.parse::<Policy>().inspect_err(|e| {
        warn!(kind = %e.kind, entity = %e.entity_id, "{}", e.message);
    })?;
    simulate(tasks, policy, quantum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimelineEntry;
    use crate::validation::ValidationErrorKind;

    fn two_tasks() -> Vec<Task> {
        vec![Task::new("P1", 0, 5), Task::new("P2", 1, 3)]
    }

    fn entries(outcome: &SimulationOutcome) -> Vec<(&str, i64, i64)> {
        outcome
            .timeline
            .iter()
            .map(|e| (e.task_id.as_str(), e.start, e.finish))
            .collect()
    }

    #[test]
    fn test_fcfs_scenario() {
        let outcome = simulate(&two_tasks(), Policy::Fcfs, None).unwrap();
        assert_eq!(entries(&outcome), vec![("P1", 0, 5), ("P2", 5, 8)]);
        assert_eq!(outcome.metrics.waiting("P2"), Some(4));
        assert!((outcome.metrics.average_waiting - 2.0).abs() < 1e-10);
        assert!((outcome.metrics.average_turnaround - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_srtf_scenario() {
        let outcome = simulate(&two_tasks(), Policy::Srtf, None).unwrap();
        assert_eq!(
            entries(&outcome),
            vec![("P1", 0, 1), ("P2", 1, 4), ("P1", 4, 8)]
        );
        assert_eq!(outcome.metrics.waiting("P1"), Some(3));
        assert_eq!(outcome.metrics.waiting("P2"), Some(0));
    }

    #[test]
    fn test_round_robin_scenario() {
        let outcome = simulate(&two_tasks(), Policy::RoundRobin, Some(2)).unwrap();
        assert_eq!(
            entries(&outcome),
            vec![
                ("P1", 0, 2),
                ("P2", 2, 4),
                ("P1", 4, 6),
                ("P2", 6, 7),
                ("P1", 7, 8)
            ]
        );
        assert_eq!(outcome.quantum, Some(2));
    }

    #[test]
    fn test_priority_scenario() {
        let tasks = vec![
            Task::new("P1", 0, 4).with_priority(2),
            Task::new("P2", 0, 2).with_priority(1),
        ];
        let outcome = simulate(&tasks, Policy::Priority, None).unwrap();
        assert_eq!(entries(&outcome), vec![("P2", 0, 2), ("P1", 2, 6)]);
    }

    #[test]
    fn test_empty_task_set_every_policy() {
        for policy in Policy::ALL {
            let outcome = simulate(&[], policy, Some(1)).unwrap();
            assert!(outcome.timeline.is_empty());
            assert!((outcome.metrics.average_waiting - 0.0).abs() < 1e-10);
            assert!((outcome.metrics.average_turnaround - 0.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_round_robin_without_quantum() {
        let err = simulate(&two_tasks(), Policy::RoundRobin, None).unwrap_err();
        let errors = err.validation_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingPolicyConfig);
    }

    #[test]
    fn test_priority_without_priorities() {
        let err = simulate(&two_tasks(), Policy::Priority, None).unwrap_err();
        assert_eq!(err.validation_errors().len(), 2);
        assert!(err
            .validation_errors()
            .iter()
            .all(|e| e.kind == ValidationErrorKind::MissingPolicyConfig));
    }

    #[test]
    fn test_invalid_task_rejected_before_simulation() {
        let tasks = vec![Task::new("P1", 0, 0)];
        let err = simulate(&tasks, Policy::Fcfs, None).unwrap_err();
        assert_eq!(err.validation_errors()[0].kind, ValidationErrorKind::InvalidTask);
        assert!(err.to_string().starts_with("invalid simulation input"));
    }

    #[test]
    fn test_time_horizon_overflow_rejected() {
        let tasks = vec![Task::new("P1", i64::MAX - 2, 5).with_priority(1)];
        for policy in Policy::ALL {
            let err = simulate(&tasks, policy, Some(2)).unwrap_err();
            let errors = err.validation_errors();
            assert_eq!(errors.len(), 1, "{policy}");
            assert_eq!(errors[0].kind, ValidationErrorKind::InvalidTask);
        }
    }

    #[test]
    fn test_quantum_dropped_for_non_round_robin() {
        let outcome = simulate(&two_tasks(), Policy::Sjf, Some(3)).unwrap();
        assert_eq!(outcome.quantum, None);
    }

    #[test]
    fn test_simulate_named() {
        let outcome = simulate_named(&two_tasks(), "Round Robin", Some(2)).unwrap();
        assert_eq!(outcome.policy, Policy::RoundRobin);

        let err = simulate_named(&two_tasks(), "Lottery", None).unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::UnknownPolicy
        );
    }

    #[test]
    fn test_deterministic() {
        let tasks = vec![
            Task::new("P1", 0, 7),
            Task::new("P2", 2, 4),
            Task::new("P3", 4, 1),
            Task::new("P4", 5, 4),
        ];
        for policy in [Policy::Fcfs, Policy::Sjf, Policy::Srtf, Policy::RoundRobin] {
            let a = simulate(&tasks, policy, Some(3)).unwrap();
            let b = simulate(&tasks, policy, Some(3)).unwrap();
            assert_eq!(a, b);
            assert_eq!(
                serde_json::to_string(&a.timeline).unwrap(),
                serde_json::to_string(&b.timeline).unwrap()
            );
        }
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "tasks": [
                {"id": "P1", "arrival": 0, "service": 5},
                {"id": "P2", "arrival": 1, "service": 3}
            ],
            "policy": "RoundRobin",
            "quantum": 2
        }"#;
        let request: SimulationRequest = serde_json::from_str(json).unwrap();
        let outcome = request.run().unwrap();
        assert_eq!(outcome.timeline.entries()[1], TimelineEntry::new("P2", 2, 4));
    }

    #[test]
    fn test_outcome_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SimulationOutcome>();
        assert_send_sync::<SimulationRequest>();
    }
}
