mod display;
mod fcfs;
mod loader;
mod priority;
mod process;
mod queue;
mod round_robin;
mod runner;
mod sjf;
mod srtf;
mod stats;

use std::{error, fmt, str::FromStr};

pub use display::{Comparison, DisplayTerminal};
pub use fcfs::{first_come_first_serve, EarliestArrival};
pub use loader::{
    load_process_control_blocks, read_process_control_blocks, save_process_control_blocks,
    LoadError, ProcessRecord,
};
pub use priority::{priority, HighestPriority};
pub use process::ProcessControlBlock;
pub use queue::ReadyQueue;
pub use round_robin::round_robin;
pub use runner::NonPreemptiveRunner;
pub use sjf::{shortest_job_first, ShortestJob};
pub use srtf::{shortest_remaining_time_first, ShortestRemainingTime};
pub use stats::{ScheduleResult, ScheduleStats};

pub type Ticks = u64;

pub const DEFAULT_QUANTUM: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    EmptyQueue,
    InvalidQuantum,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQueue => write!(f, "the ready queue holds no processes"),
            Self::InvalidQuantum => write!(f, "the round robin quantum must be greater than zero"),
        }
    }
}

impl error::Error for ScheduleError {}

/// Picks the next process to run and takes it out of the ready queue.
pub trait SelectsNextProcess {
    const NAME: &'static str;

    /// Returns `None` only when the queue is empty.
    fn select(
        &self,
        ready_queue: &mut ReadyQueue,
        current_time: Ticks,
    ) -> Option<ProcessControlBlock>;
}

/// Runs `process` on the CPU for a single time unit.
pub fn virtual_cpu(process: &mut ProcessControlBlock) {
    process.consume_tick();
}

/// Scans the queue front to back, replacing the current best whenever
/// `replaces(best, candidate)` holds, then extracts the winner.
fn extract_best<F>(ready_queue: &mut ReadyQueue, replaces: F) -> Option<ProcessControlBlock>
where
    F: Fn(&ProcessControlBlock, &ProcessControlBlock) -> bool,
{
    let mut best = 0;
    for index in 1..ready_queue.len() {
        if let (Some(prime), Some(candidate)) = (ready_queue.at(best), ready_queue.at(index)) {
            if replaces(prime, candidate) {
                best = index;
            }
        }
    }
    ready_queue.extract(best)
}

/// The arrived / not-arrived split shared by the idle-aware policies.
///
/// When both have arrived `arrived_replaces` decides, when neither has
/// `idle_replaces` decides, and otherwise the arrived one wins.
fn gated_by_arrival(
    prime: &ProcessControlBlock,
    candidate: &ProcessControlBlock,
    current_time: Ticks,
    arrived_replaces: impl Fn(&ProcessControlBlock, &ProcessControlBlock) -> bool,
    idle_replaces: impl Fn(&ProcessControlBlock, &ProcessControlBlock) -> bool,
) -> bool {
    match (prime.has_arrived(current_time), candidate.has_arrived(current_time)) {
        (true, true) => arrived_replaces(prime, candidate),
        (false, false) => idle_replaces(prime, candidate),
        (prime_arrived, _) => !prime_arrived,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    FirstComeFirstServe,
    Priority,
    ShortestJobFirst,
    ShortestRemainingTimeFirst,
    RoundRobin,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::FirstComeFirstServe,
        Algorithm::Priority,
        Algorithm::ShortestJobFirst,
        Algorithm::ShortestRemainingTimeFirst,
        Algorithm::RoundRobin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstComeFirstServe => "FCFS",
            Self::Priority => "P",
            Self::ShortestJobFirst => "SJF",
            Self::ShortestRemainingTimeFirst => "SRT",
            Self::RoundRobin => "RR",
        }
    }

    pub fn needs_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }

    /// `quantum` is only read by round robin.
    pub fn run(
        &self,
        ready_queue: ReadyQueue,
        quantum: usize,
    ) -> Result<ScheduleResult, ScheduleError> {
        match self {
            Self::FirstComeFirstServe => first_come_first_serve(ready_queue),
            Self::Priority => priority(ready_queue),
            Self::ShortestJobFirst => shortest_job_first(ready_queue),
            Self::ShortestRemainingTimeFirst => shortest_remaining_time_first(ready_queue),
            Self::RoundRobin => round_robin(ready_queue, quantum),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scheduling algorithm \"{}\"", self.0)
    }
}

impl error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_owned()))
    }
}
