//! Multi-policy comparison.
//!
//! Runs several policies over the same task set so their metrics can be
//! compared side by side.

use super::{simulate, SimulationError, SimulationOutcome};
use crate::models::Task;
use crate::policies::Policy;

/// Runs each policy on `tasks`, in the order given.
///
/// `quantum` is passed to every run (only round-robin uses it). The first
/// configuration error aborts the comparison.
pub fn compare_policies(
    tasks: &[Task],
    policies: &[Policy],
    quantum: Option<i64>,
) -> Result<Vec<(Policy, SimulationOutcome)>, SimulationError> {
    policies
        .iter()
        .map(|&policy| simulate(tasks, policy, quantum).map(|outcome| (policy, outcome)))
        .collect()
}

/// Policy with the lowest average waiting time.
///
/// The first listed policy wins ties. Returns `None` for no results.
pub fn best_by_waiting(results: &[(Policy, SimulationOutcome)]) -> Option<Policy> {
    results
        .iter()
        .min_by(|(_, a), (_, b)| {
            a.metrics
                .average_waiting
                .partial_cmp(&b.metrics.average_waiting)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(policy, _)| *policy)
}
