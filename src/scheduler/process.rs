use super::Ticks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessControlBlock {
    remaining_burst_time: u32,
    priority: u32,
    arrival: u32,
    started: bool,
}

impl ProcessControlBlock {
    const DEFAULT_PRIORITY: u32 = 0;

    pub fn new(remaining_burst_time: u32, arrival: u32) -> Self {
        ProcessControlBlock::with_priority(
            remaining_burst_time,
            ProcessControlBlock::DEFAULT_PRIORITY,
            arrival,
        )
    }

    pub fn with_priority(remaining_burst_time: u32, priority: u32, arrival: u32) -> Self {
        Self {
            remaining_burst_time,
            priority,
            arrival,
            started: false,
        }
    }

    pub fn remaining_burst_time(&self) -> u32 {
        self.remaining_burst_time
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn arrival(&self) -> u32 {
        self.arrival
    }

    /// The arrival time on the simulated clock.
    pub fn arrival_ticks(&self) -> Ticks {
        self.arrival as Ticks
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn has_arrived(&self, now: Ticks) -> bool {
        self.arrival_ticks() <= now
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_burst_time == 0
    }

    pub(crate) fn mark_started(&mut self) {
        self.started = true;
    }

    pub(crate) fn consume_tick(&mut self) {
        debug_assert!(
            self.remaining_burst_time > 0,
            "Stepped a process with no remaining burst time"
        );
        self.remaining_burst_time -= 1;
    }
}
