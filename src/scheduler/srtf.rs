use log::{debug, info, trace};

use super::{
    extract_best, gated_by_arrival, virtual_cpu, ProcessControlBlock, ReadyQueue, ScheduleError,
    ScheduleResult, ScheduleStats, SelectsNextProcess, Ticks,
};

/// Least remaining work among arrived processes, ties to the earlier arrival.
/// With nothing arrived, the earliest future arrival is taken, ties to the
/// smaller remaining burst.
pub struct ShortestRemainingTime;

impl ShortestRemainingTime {
    pub(crate) fn replaces(
        prime: &ProcessControlBlock,
        candidate: &ProcessControlBlock,
        current_time: Ticks,
    ) -> bool {
        gated_by_arrival(
            prime,
            candidate,
            current_time,
            |prime, candidate| {
                prime.remaining_burst_time() > candidate.remaining_burst_time()
                    || (prime.remaining_burst_time() == candidate.remaining_burst_time()
                        && prime.arrival() > candidate.arrival())
            },
            |prime, candidate| {
                prime.arrival() > candidate.arrival()
                    || (prime.arrival() == candidate.arrival()
                        && prime.remaining_burst_time() > candidate.remaining_burst_time())
            },
        )
    }
}

impl SelectsNextProcess for ShortestRemainingTime {
    const NAME: &'static str = "Shortest Remaining Time First";

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

/// Preemptive shortest-remaining-time scheduling, re-deciding every tick.
pub fn shortest_remaining_time_first(
    mut ready_queue: ReadyQueue,
) -> Result<ScheduleResult, ScheduleError> {
    let process_count = ready_queue.len();
    if process_count == 0 {
        return Err(ScheduleError::EmptyQueue);
    }

    let selector = ShortestRemainingTime;
    let mut stats = ScheduleStats::new(process_count);
    let mut current_time: Ticks = 0;

    while let Some(mut process) = selector.select(&mut ready_queue, current_time) {
        if !process.started() {
            if current_time < process.arrival_ticks() {
                current_time = process.arrival_ticks();
            } else {
                stats.add_waiting(current_time - process.arrival_ticks());
            }
            process.mark_started();
            debug!(
                "SRTF: t={} first dispatch arrival={} burst={}",
                current_time,
                process.arrival(),
                process.remaining_burst_time()
            );
        }

        if !process.is_finished() {
            virtual_cpu(&mut process);

            // Every preempted process sat out this tick
            let preempted = ready_queue.iter().filter(|other| other.started()).count();
            stats.add_waiting(preempted as Ticks);

            current_time += 1;
            trace!(
                "SRTF: t={} ran arrival={} remaining={}",
                current_time,
                process.arrival(),
                process.remaining_burst_time()
            );
        }

        if process.is_finished() {
            stats.add_turnaround(current_time - process.arrival_ticks());
        } else {
            ready_queue.push_back(process);
        }
    }

    let result = stats.finish(current_time);
    info!(
        "{} finished {} processes: avg waiting {:.2}, avg turnaround {:.2}, total {}",
        ShortestRemainingTime::NAME,
        process_count,
        result.average_waiting_time,
        result.average_turnaround_time,
        result.total_run_time
    );
    Ok(result)
}
