//! Single-processor CPU scheduling simulator.
//!
//! Simulates how one processor executes a finite set of competing tasks
//! under a chosen dispatch policy, and derives waiting, turnaround and
//! related metrics from the resulting timeline.
//!
//! # Modules
//!
//! - **`models`**: Data types — `Task`, `Timeline`, `TimelineEntry`, `Violation`
//! - **`policies`**: Dispatch policies — FCFS, SJF, SRTF, Priority, Round-robin
//! - **`simulation`**: Orchestration (`simulate`), `Metrics`, comparison, reports
//! - **`validation`**: Input and policy configuration checks
//! - **`generator`**: Demo and random task sets from a caller-supplied RNG
//!
//! # Example
//!
//! ```
//! use u_cpusched::models::Task;
//! use u_cpusched::policies::Policy;
//! use u_cpusched::simulation::simulate;
//!
//! let tasks = vec![Task::new("P1", 0, 5), Task::new("P2", 1, 3)];
//! let outcome = simulate(&tasks, Policy::Srtf, None).unwrap();
//!
//! assert_eq!(outcome.timeline.len(), 3);
//! assert_eq!(outcome.metrics.waiting("P1"), Some(3));
//! ```
//!
//! # Scope
//!
//! Runs are pure and synchronous: no I/O, no randomness, no shared state.
//! Rendering, input acquisition and persistence belong to the caller.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod generator;
pub mod models;
pub mod policies;
pub mod simulation;
pub mod validation;
