use super::{
    extract_best, NonPreemptiveRunner, ProcessControlBlock, ReadyQueue, ScheduleError,
    ScheduleResult, SelectsNextProcess, ShortestRemainingTime, Ticks,
};

/// Shortest burst among arrived processes, run to completion.
///
/// Uses the same ordering as [`ShortestRemainingTime`]; the difference is
/// only that the non-preemptive runner never asks again mid-burst.
pub struct ShortestJob;

impl SelectsNextProcess for ShortestJob {
    const NAME: &'static str = "Shortest Job First";

    fn select(
        &self,
        ready_queue: &mut ReadyQueue,
        current_time: Ticks,
    ) -> Option<ProcessControlBlock> {
        extract_best(ready_queue, |prime, candidate| {
            ShortestRemainingTime::replaces(prime, candidate, current_time)
        })
    }
}

pub fn shortest_job_first(ready_queue: ReadyQueue) -> Result<ScheduleResult, ScheduleError> {
    NonPreemptiveRunner::new(ShortestJob).run(ready_queue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_jobs_jump_ahead_once_the_cpu_frees_up() {
        let queue = ReadyQueue::with_processes(vec![
            ProcessControlBlock::new(6, 0),
            ProcessControlBlock::new(8, 1),
            ProcessControlBlock::new(2, 2),
        ]);
        let result = shortest_job_first(queue).unwrap();

        // 0..6 first, 6..8 the 2-unit job (waits 4), 8..16 the 8-unit job (waits 7)
        assert_eq!(result.total_run_time, 16);
        assert_eq!(result.average_waiting_time, 11.0 / 3.0);
        assert_eq!(result.average_turnaround_time, (6.0 + 6.0 + 15.0) / 3.0);
    }

    #[test]
    fn running_job_is_never_preempted() {
        let queue = ReadyQueue::with_processes(vec![
            ProcessControlBlock::new(10, 0),
            ProcessControlBlock::new(1, 1),
        ]);
        let result = shortest_job_first(queue).unwrap();

        assert_eq!(result.average_waiting_time, 9.0 / 2.0);
        assert_eq!(result.total_run_time, 11);
    }
}
