//! Discrete-event CPU scheduling simulator.
//!
//! Replays first-come-first-serve, priority, shortest-job-first, shortest
//! remaining time first and round robin against a single virtual CPU and
//! reports average waiting time, average turnaround time and total run time.

pub mod scheduler;

pub use scheduler::{
    load_process_control_blocks, Algorithm, ProcessControlBlock, ReadyQueue, ScheduleError,
    ScheduleResult, SelectsNextProcess,
};
