//! Plain-text report of a simulation outcome.
//!
//! Rendering only; writing the report anywhere is up to the caller.

use std::fmt;

use super::SimulationOutcome;

impl SimulationOutcome {
    /// Renders the timeline, per-task metrics and averages as text.
    pub fn report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SimulationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quantum {
            Some(q) => writeln!(f, "Policy: {} (quantum {q})", self.policy)?,
            None => writeln!(f, "Policy: {}", self.policy)?,
        }

        writeln!(f)?;
        writeln!(f, "Timeline")?;
        writeln!(f, "{:<10} {:>8} {:>8}", "Task", "Start", "Finish")?;
        for e in &self.timeline {
            writeln!(f, "{:<10} {:>8} {:>8}", e.task_id, e.start, e.finish)?;
        }

        writeln!(f)?;
        writeln!(f, "Tasks")?;
        writeln!(
            f,
            "{:<10} {:>8} {:>8} {:>10} {:>10} {:>8} {:>8}",
            "Task", "Arrival", "Service", "Completion", "Turnaround", "Waiting", "Response"
        )?;
        for m in &self.metrics.per_task {
            writeln!(
                f,
                "{:<10} {:>8} {:>8} {:>10} {:>10} {:>8} {:>8}",
                m.task_id, m.arrival, m.service, m.completion, m.turnaround, m.waiting, m.response
            )?;
        }

        let m = &self.metrics;
        writeln!(f)?;
        writeln!(f, "Average waiting time:    {:.2}", m.average_waiting)?;
        writeln!(f, "Average turnaround time: {:.2}", m.average_turnaround)?;
        writeln!(f, "Average response time:   {:.2}", m.average_response)?;
        writeln!(f, "Makespan:                {}", m.makespan)?;
        writeln!(f, "CPU utilization:         {:.2}%", m.utilization * 100.0)?;
        writeln!(f, "Context switches:        {}", m.context_switches)?;
        if m.deadline_misses > 0 {
            writeln!(f, "Deadline misses:         {}", m.deadline_misses)?;
        }
        Ok(())
    }
}
