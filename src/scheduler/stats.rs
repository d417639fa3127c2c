use super::Ticks;

/// Aggregate output of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleResult {
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub total_run_time: Ticks,
}

/// Running waiting/turnaround totals for a run over `process_count` processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleStats {
    process_count: usize,
    total_waiting: Ticks,
    total_turnaround: Ticks,
}

impl ScheduleStats {
    pub fn new(process_count: usize) -> Self {
        Self {
            process_count,
            ..Default::default()
        }
    }

    pub fn add_waiting(&mut self, time: Ticks) {
        self.total_waiting += time;
    }

    pub fn add_turnaround(&mut self, time: Ticks) {
        self.total_turnaround += time;
    }

    pub fn finish(self, current_time: Ticks) -> ScheduleResult {
        let count = self.process_count as f64;
        ScheduleResult {
            average_waiting_time: self.total_waiting as f64 / count,
            average_turnaround_time: self.total_turnaround as f64 / count,
            total_run_time: current_time,
        }
    }
}
