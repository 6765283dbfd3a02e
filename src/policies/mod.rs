//! Dispatch policies for a single processor.
//!
//! Each policy consumes the full task set and produces a [`Timeline`].
//! Policies differ only in which ready task is dispatched next and in
//! whether a running task can be interrupted.
//!
//! | Policy | Preemptive | Selection key |
//! |--------|------------|---------------|
//! | FCFS | no | arrival |
//! | SJF | no | service |
//! | SRTF | yes | remaining service |
//! | Priority | no | priority (lower wins) |
//! | Round-robin | yes (quantum) | FIFO queue |
//!
//! Ties are broken by arrival time, then by position in the input.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::models::Task;
//! use u_cpusched::policies::{SchedulingPolicy, Srtf};
//!
//! let tasks = vec![Task::new("P1", 0, 5), Task::new("P2", 1, 3)];
//! let timeline = Srtf.schedule(&tasks);
//! assert_eq!(timeline.len(), 3);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod non_preemptive;
mod round_robin;
mod srtf;
mod working;

pub use non_preemptive::{Fcfs, PriorityFirst, Sjf};
pub use round_robin::RoundRobin;
pub use srtf::Srtf;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::models::{Task, Timeline};
use crate::validation::ValidationError;

/// A single-processor dispatch policy.
///
/// Implementations are pure: the same task slice always yields the same
/// timeline, and the input is never modified.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "FCFS", "SRTF").
    fn name(&self) -> &'static str;

    /// Whether a running task can be interrupted.
    fn is_preemptive(&self) -> bool;

    /// Simulates the task set and returns the execution timeline.
    fn schedule(&self, tasks: &[Task]) -> Timeline;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Closed set of supported policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    /// First-Come-First-Served.
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest-Job-First.
    #[serde(rename = "SJF")]
    Sjf,
    /// Shortest-Remaining-Time-First.
    #[serde(rename = "SRTF")]
    Srtf,
    /// Non-preemptive priority (lower value wins).
    Priority,
    /// Round-robin with a fixed quantum.
    RoundRobin,
}

impl Policy {
    /// All policies in canonical order.
    pub const ALL: [Policy; 5] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Srtf,
        Policy::Priority,
        Policy::RoundRobin,
    ];

    /// Canonical policy name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Srtf => "SRTF",
            Self::Priority => "Priority",
            Self::RoundRobin => "RoundRobin",
        }
    }

    /// Whether a running task can be interrupted.
    pub fn is_preemptive(self) -> bool {
        matches!(self, Self::Srtf | Self::RoundRobin)
    }

    /// Whether the policy needs a time quantum.
    pub fn requires_quantum(self) -> bool {
        matches!(self, Self::RoundRobin)
    }

    /// Whether the policy needs a priority on every task.
    pub fn requires_priority(self) -> bool {
        matches!(self, Self::Priority)
    }

    /// Builds the strategy for this policy.
    ///
    /// Fails when round-robin is selected without a positive quantum.
    pub fn strategy(self, quantum: Option<i64>) -> Result<Box<dyn SchedulingPolicy>, ValidationError> {
        let strategy: Box<dyn SchedulingPolicy> = match self {
            Self::Fcfs => Box::new(Fcfs),
            Self::Sjf => Box::new(Sjf),
            Self::Srtf => Box::new(Srtf),
            Self::Priority => Box::new(PriorityFirst),
            Self::RoundRobin => {
                let quantum = quantum.ok_or_else(|| {
                    ValidationError::missing_config(self.name(), "RoundRobin requires a time quantum")
                })?;
                Box::new(RoundRobin::new(quantum)?)
            }
        };
        Ok(strategy)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = ValidationError;

    /// Parses a policy name, ignoring case, spaces, `-` and `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "srtf" => Ok(Self::Srtf),
            "priority" => Ok(Self::Priority),
            "roundrobin" | "rr" => Ok(Self::RoundRobin),
            _ => Err(ValidationError::unknown_policy(s)),
        }
    }
}
