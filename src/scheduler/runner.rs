use log::{debug, info};

use super::{
    virtual_cpu, ProcessControlBlock, ReadyQueue, ScheduleError, ScheduleResult, ScheduleStats,
    SelectsNextProcess, Ticks,
};

/// Drives a selection policy over a ready queue, running every chosen
/// process to completion before choosing again.
pub struct NonPreemptiveRunner<S> {
    selector: S,
    current_time: Ticks,
}

impl<S: SelectsNextProcess> NonPreemptiveRunner<S> {
    pub fn new(selector: S) -> Self {
        Self {
            selector,
            current_time: 0,
        }
    }

    fn run_process(&mut self, mut process: ProcessControlBlock, stats: &mut ScheduleStats) {
        if self.current_time < process.arrival_ticks() {
            // CPU idles until the process shows up
            self.current_time = process.arrival_ticks();
        } else {
            stats.add_waiting(self.current_time - process.arrival_ticks());
        }
        debug!(
            "{}: t={} dispatch arrival={} burst={} priority={}",
            S::NAME,
            self.current_time,
            process.arrival(),
            process.remaining_burst_time(),
            process.priority()
        );

        while !process.is_finished() {
            virtual_cpu(&mut process);
            self.current_time += 1;
        }
        stats.add_turnaround(self.current_time - process.arrival_ticks());
    }

    pub fn run(mut self, mut ready_queue: ReadyQueue) -> Result<ScheduleResult, ScheduleError> {
        let process_count = ready_queue.len();
        if process_count == 0 {
            return Err(ScheduleError::EmptyQueue);
        }

        let mut stats = ScheduleStats::new(process_count);
        while let Some(process) = self.selector.select(&mut ready_queue, self.current_time) {
            self.run_process(process, &mut stats);
        }

        let result = stats.finish(self.current_time);
        info!(
            "{} finished {} processes: avg waiting {:.2}, avg turnaround {:.2}, total {}",
            S::NAME,
            process_count,
            result.average_waiting_time,
            result.average_turnaround_time,
            result.total_run_time
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Always takes the front of the queue
    struct FrontOfQueue;

    impl SelectsNextProcess for FrontOfQueue {
        const NAME: &'static str = "Front";

        fn select(
            &self,
            ready_queue: &mut ReadyQueue,
            _current_time: Ticks,
        ) -> Option<ProcessControlBlock> {
            ready_queue.extract_front()
        }
    }

    #[test]
    fn runs_in_selector_order() {
        // Front-of-queue runs the late arrival first, so the early one waits
        let queue = ReadyQueue::with_processes(vec![
            ProcessControlBlock::new(2, 3),
            ProcessControlBlock::new(4, 0),
        ]);
        let result = NonPreemptiveRunner::new(FrontOfQueue).run(queue).unwrap();

        // first: jumps to 3, runs to 5; second: waits 5, runs to 9
        assert_eq!(result.total_run_time, 9);
        assert_eq!(result.average_waiting_time, 2.5);
        assert_eq!(result.average_turnaround_time, (2.0 + 9.0) / 2.0);
    }

    #[test]
    fn zero_burst_process_completes_at_dispatch() {
        let queue = ReadyQueue::with_processes(vec![ProcessControlBlock::new(0, 2)]);
        let result = NonPreemptiveRunner::new(FrontOfQueue).run(queue).unwrap();

        assert_eq!(result.total_run_time, 2);
        assert_eq!(result.average_turnaround_time, 0.0);
    }

    #[test]
    fn empty_queue_fails() {
        let result = NonPreemptiveRunner::new(FrontOfQueue).run(ReadyQueue::new());
        assert_eq!(result, Err(ScheduleError::EmptyQueue));
    }
}
