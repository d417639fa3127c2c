use log::{debug, info};
use std::num::NonZeroUsize;

use super::{
    virtual_cpu, ProcessControlBlock, ReadyQueue, ScheduleError, ScheduleResult, ScheduleStats,
    Ticks,
};

struct RoundRobinScheduler {
    // Not yet arrived, sorted by arrival
    incoming: ReadyQueue,
    rotation: ReadyQueue,
    quantum: NonZeroUsize,
    current_time: Ticks,
    stats: ScheduleStats,
}

impl RoundRobinScheduler {
    const NAME: &'static str = "Round Robin";

    fn with_processes(mut incoming: ReadyQueue, quantum: NonZeroUsize) -> Self {
        incoming.sort_by_arrival();
        let stats = ScheduleStats::new(incoming.len());
        Self {
            rotation: ReadyQueue::with_capacity(incoming.len()),
            incoming,
            quantum,
            current_time: 0,
            stats,
        }
    }

    fn is_done(&self) -> bool {
        self.rotation.is_empty() && self.incoming.is_empty()
    }

    /// Runs `process` for one quantum or until it finishes.
    ///
    /// Every process left in rotation waits through each unit of the slice,
    /// so waiting grows by the rotation size and turnaround by one more.
    fn run_slice(&mut self, process: &mut ProcessControlBlock) {
        let bystanders = self.rotation.len() as Ticks;
        let slice = self
            .quantum
            .get()
            .min(process.remaining_burst_time() as usize);
        debug!(
            "{}: t={} slice={} arrival={} remaining={} bystanders={}",
            Self::NAME,
            self.current_time,
            slice,
            process.arrival(),
            process.remaining_burst_time(),
            bystanders
        );

        for _ in 0..slice {
            virtual_cpu(process);
            self.current_time += 1;
            self.stats.add_waiting(bystanders);
            self.stats.add_turnaround(bystanders + 1);
        }
    }

    fn fast_forward(&mut self) {
        if let Some(next) = self.incoming.front() {
            if next.arrival_ticks() > self.current_time {
                debug!(
                    "{}: idle from t={} to t={}",
                    Self::NAME,
                    self.current_time,
                    next.arrival()
                );
                self.current_time = next.arrival_ticks();
            }
        }
    }

    /// Moves everything that has arrived by now into rotation. Each one has
    /// already waited since its arrival.
    fn admit_arrivals(&mut self) {
        while self
            .incoming
            .front()
            .is_some_and(|process| process.has_arrived(self.current_time))
        {
            if let Some(process) = self.incoming.extract_front() {
                let waited = self.current_time - process.arrival_ticks();
                self.stats.add_waiting(waited);
                self.stats.add_turnaround(waited);
                self.rotation.push_back(process);
            }
        }
    }

    fn run(mut self) -> ScheduleResult {
        while !self.is_done() {
            let ran = match self.rotation.extract_front() {
                Some(mut process) => {
                    self.run_slice(&mut process);
                    Some(process)
                }
                None => {
                    self.fast_forward();
                    None
                }
            };

            // New arrivals queue up ahead of the process that was just preempted
            self.admit_arrivals();

            if let Some(process) = ran.filter(|process| !process.is_finished()) {
                self.rotation.push_back(process);
            }
        }

        self.stats.finish(self.current_time)
    }
}

/// Quantum-based round robin. A zero quantum is rejected.
pub fn round_robin(
    ready_queue: ReadyQueue,
    quantum: usize,
) -> Result<ScheduleResult, ScheduleError> {
    let quantum = NonZeroUsize::new(quantum).ok_or(ScheduleError::InvalidQuantum)?;
    let process_count = ready_queue.len();
    if process_count == 0 {
        return Err(ScheduleError::EmptyQueue);
    }

    let result = RoundRobinScheduler::with_processes(ready_queue, quantum).run();
    info!(
        "{} (quantum {}) finished {} processes: avg waiting {:.2}, avg turnaround {:.2}, total {}",
        RoundRobinScheduler::NAME,
        quantum,
        process_count,
        result.average_waiting_time,
        result.average_turnaround_time,
        result.total_run_time
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_process_fits_in_quantum() {
        let queue = ReadyQueue::with_processes(vec![ProcessControlBlock::new(5, 0)]);
        let result = round_robin(queue, 5).unwrap();

        assert_eq!(result.average_waiting_time, 0.0);
        assert_eq!(result.average_turnaround_time, 5.0);
        assert_eq!(result.total_run_time, 5);
    }

    #[test]
    fn zero_quantum_is_rejected() {
        let queue = ReadyQueue::with_processes(vec![ProcessControlBlock::new(5, 0)]);
        assert_eq!(round_robin(queue, 0), Err(ScheduleError::InvalidQuantum));
    }

    #[test]
    fn empty_queue_is_rejected() {
        assert_eq!(
            round_robin(ReadyQueue::new(), 2),
            Err(ScheduleError::EmptyQueue)
        );
    }

    #[test]
    fn processes_alternate_every_quantum() {
        let queue = ReadyQueue::with_processes(vec![
            ProcessControlBlock::new(3, 0),
            ProcessControlBlock::new(3, 0),
        ]);
        let result = round_robin(queue, 1).unwrap();

        // A B A B A B: A finishes at 5, B at 6
        assert_eq!(result.total_run_time, 6);
        assert_eq!(result.average_turnaround_time, 5.5);
        assert_eq!(result.average_waiting_time, 2.5);
    }

    #[test]
    fn late_arrival_is_admitted_before_requeue() {
        let queue = ReadyQueue::with_processes(vec![
            ProcessControlBlock::new(4, 0),
            ProcessControlBlock::new(2, 1),
        ]);
        let result = round_robin(queue, 2).unwrap();

        // 0..2 first, 2..4 the late arrival (waits 1), 4..6 first again
        assert_eq!(result.total_run_time, 6);
        assert_eq!(result.average_waiting_time, 1.5);
        assert_eq!(result.average_turnaround_time, 4.5);
    }

    #[test]
    fn idle_cpu_fast_forwards_to_next_arrival() {
        let queue = ReadyQueue::with_processes(vec![
            ProcessControlBlock::new(2, 10),
            ProcessControlBlock::new(1, 3),
        ]);
        let result = round_robin(queue, 4).unwrap();

        assert_eq!(result.total_run_time, 12);
        assert_eq!(result.average_waiting_time, 0.0);
        assert_eq!(result.average_turnaround_time, 1.5);
    }

    #[test]
    fn unsorted_input_is_ordered_by_arrival() {
        let sorted = vec![
            ProcessControlBlock::new(6, 0),
            ProcessControlBlock::new(3, 2),
            ProcessControlBlock::new(4, 2),
            ProcessControlBlock::new(2, 9),
        ];
        let shuffled = vec![sorted[3], sorted[1], sorted[0], sorted[2]];

        assert_eq!(
            round_robin(ReadyQueue::with_processes(shuffled), 2),
            round_robin(ReadyQueue::with_processes(sorted), 2)
        );
    }
}
