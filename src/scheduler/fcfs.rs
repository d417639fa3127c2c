use super::{
    extract_best, NonPreemptiveRunner, ProcessControlBlock, ReadyQueue, ScheduleError,
    ScheduleResult, SelectsNextProcess, Ticks,
};

/// Earliest arrival first; equal arrivals go in queue order.
pub struct EarliestArrival;

impl SelectsNextProcess for EarliestArrival {
    const NAME: &'static str = "First Come First Serve";

    fn select(
        &self,
        ready_queue: &mut ReadyQueue,
        _current_time: Ticks,
    ) -> Option<ProcessControlBlock> {
        extract_best(ready_queue, |prime, candidate| {
            prime.arrival() > candidate.arrival()
        })
    }
}

pub fn first_come_first_serve(ready_queue: ReadyQueue) -> Result<ScheduleResult, ScheduleError> {
    NonPreemptiveRunner::new(EarliestArrival).run(ready_queue)
}
