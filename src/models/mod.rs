//! Simulation domain models.
//!
//! Provides the input and output value types of a simulation run.
//! Both are plain data: tasks are supplied by the caller, timelines are
//! produced by a policy and never carry state beyond the run.
//!
//! # Domain Mappings
//!
//! | u-cpusched | Operating system | Print queue | Service desk |
//! |------------|------------------|-------------|--------------|
//! | Task | Process | Print job | Ticket |
//! | Timeline | Gantt chart | Printer log | Agent log |
//! | TimelineEntry | CPU burst | Page run | Work session |

mod task;
mod timeline;

pub use task::Task;
pub use timeline::{Timeline, TimelineEntry, Violation, ViolationType};
