//! Simulation orchestration and metrics.
//!
//! Runs a dispatch policy over a task set and derives performance
//! metrics from the resulting timeline.
//!
//! # Flow
//!
//! Tasks + policy → validation → policy strategy → timeline → metrics.
//!
//! # Metrics
//!
//! `Metrics` computes waiting, turnaround and response time per task,
//! their averages, makespan, utilization, throughput and context switches.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1.2

mod compare;
mod metrics;
mod report;
mod simulator;

pub use compare::{best_by_waiting, compare_policies};
pub use metrics::{Metrics, TaskMetrics};
pub use simulator::{simulate, simulate_named, SimulationError, SimulationOutcome, SimulationRequest};
