//! Task set generation for demos and tests.
//!
//! These helpers sit outside the simulation core: they only materialize
//! `Task` values. Randomness always comes from a caller-supplied RNG, so a
//! seeded RNG gives a reproducible task set.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use u_cpusched::generator::{random_tasks, TaskGenConfig};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let tasks = random_tasks(&mut rng, &TaskGenConfig::default());
//! assert_eq!(tasks.len(), 5);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Parameters for random task generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGenConfig {
    /// Number of tasks.
    pub count: usize,
    /// Arrival times are drawn from `0..=max_arrival`.
    pub max_arrival: i64,
    /// Service times are drawn from `1..=max_service`.
    pub max_service: i64,
    /// Priorities are drawn from `1..=max_priority`; `None` leaves tasks
    /// without a priority.
    pub max_priority: Option<i32>,
}

impl Default for TaskGenConfig {
    fn default() -> Self {
        Self {
            count: 5,
            max_arrival: 10,
            max_service: 10,
            max_priority: Some(5),
        }
    }
}

impl TaskGenConfig {
    /// Creates a config for `count` tasks with default ranges.
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }
}

/// The four-task demo set: P1(0,5), P2(1,3), P3(2,8), P4(3,6).
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new("P1", 0, 5),
        Task::new("P2", 1, 3),
        Task::new("P3", 2, 8),
        Task::new("P4", 3, 6),
    ]
}

/// Generates random tasks named `P1..Pn`.
///
/// Out-of-range bounds are clamped so every generated task is valid.
pub fn random_tasks<R: Rng>(rng: &mut R, config: &TaskGenConfig) -> Vec<Task> {
    let max_arrival = config.max_arrival.max(0);
    let max_service = config.max_service.max(1);

    (1..=config.count)
        .map(|n| {
            let task = Task::new(
                format!("P{n}"),
                rng.random_range(0..=max_arrival),
                rng.random_range(1..=max_service),
            );
            match config.max_priority {
                Some(max) => task.with_priority(rng.random_range(1..=max.max(1))),
                None => task,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_tasks;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_tasks_valid() {
        let tasks = sample_tasks();
        assert_eq!(tasks.len(), 4);
        assert!(validate_tasks(&tasks).is_ok());
        assert_eq!(tasks.iter().map(|t| t.service).sum::<i64>(), 22);
    }

    #[test]
    fn test_random_tasks_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = TaskGenConfig {
            count: 50,
            max_arrival: 20,
            max_service: 6,
            max_priority: Some(3),
        };
        let tasks = random_tasks(&mut rng, &config);

        assert_eq!(tasks.len(), 50);
        assert!(validate_tasks(&tasks).is_ok());
        for task in &tasks {
            assert!((0..=20).contains(&task.arrival));
            assert!((1..=6).contains(&task.service));
            assert!(matches!(task.priority, Some(1..=3)));
        }
        assert_eq!(tasks[0].id, "P1");
        assert_eq!(tasks[49].id, "P50");
    }

    #[test]
    fn test_random_tasks_reproducible() {
        let config = TaskGenConfig::with_count(10);
        let a = random_tasks(&mut StdRng::seed_from_u64(1), &config);
        let b = random_tasks(&mut StdRng::seed_from_u64(1), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_tasks_clamps_bounds() {
        let config = TaskGenConfig {
            count: 3,
            max_arrival: -5,
            max_service: 0,
            max_priority: None,
        };
        let tasks = random_tasks(&mut StdRng::seed_from_u64(0), &config);
        for task in &tasks {
            assert_eq!(task.arrival, 0);
            assert_eq!(task.service, 1);
            assert_eq!(task.priority, None);
        }
    }
}
