use super::{
    extract_best, gated_by_arrival, NonPreemptiveRunner, ProcessControlBlock, ReadyQueue,
    ScheduleError, ScheduleResult, SelectsNextProcess, Ticks,
};

/// Lowest priority number among arrived processes, ties to the earlier
/// arrival. With nothing arrived, the earliest future arrival is taken.
pub struct HighestPriority;

impl SelectsNextProcess for HighestPriority {
    const NAME: &'static str = "Priority";

    fn select(
        &self,
        ready_queue: &mut ReadyQueue,
        current_time: Ticks,
    ) -> Option<ProcessControlBlock> {
        extract_best(ready_queue, |prime, candidate| {
            gated_by_arrival(
                prime,
                candidate,
                current_time,
                |prime, candidate| {
                    prime.priority() > candidate.priority()
                        || (prime.priority() == candidate.priority()
                            && prime.arrival() > candidate.arrival())
                },
                |prime, candidate| prime.arrival() > candidate.arrival(),
            )
        })
    }
}

/// Non-preemptive priority scheduling.
pub fn priority(ready_queue: ReadyQueue) -> Result<ScheduleResult, ScheduleError> {
    NonPreemptiveRunner::new(HighestPriority).run(ready_queue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue() -> ReadyQueue {
        ReadyQueue::with_processes(vec![
            ProcessControlBlock::with_priority(5, 2, 0),
            ProcessControlBlock::with_priority(3, 1, 1),
            ProcessControlBlock::with_priority(4, 1, 2),
            ProcessControlBlock::with_priority(2, 0, 15),
        ])
    }

    #[test]
    fn reference_scenario() {
        let result = priority(queue()).unwrap();

        assert_eq!(result.average_waiting_time, 2.5);
        assert_eq!(result.average_turnaround_time, 6.0);
        assert_eq!(result.total_run_time, 17);
    }

    #[test]
    fn single_arrived_process_wins_outright() {
        let mut queue = queue();
        let chosen = HighestPriority.select(&mut queue, 0).unwrap();
        assert_eq!(chosen.priority(), 2);
    }

    #[test]
    fn ties_broken_by_arrival() {
        let mut queue = queue();
        queue.extract(0);
        let chosen = HighestPriority.select(&mut queue, 5).unwrap();
        assert_eq!(chosen.arrival(), 1);
    }

    #[test]
    fn not_yet_arrived_picks_earliest_arrival() {
        let mut queue = ReadyQueue::with_processes(vec![
            ProcessControlBlock::with_priority(1, 0, 20),
            ProcessControlBlock::with_priority(1, 9, 10),
        ]);
        let chosen = HighestPriority.select(&mut queue, 5).unwrap();
        assert_eq!(chosen.arrival(), 10);
    }

    #[test]
    fn arrived_beats_better_priority_in_the_future() {
        let mut queue = ReadyQueue::with_processes(vec![
            ProcessControlBlock::with_priority(1, 0, 8),
            ProcessControlBlock::with_priority(1, 7, 3),
        ]);
        let chosen = HighestPriority.select(&mut queue, 4).unwrap();
        assert_eq!(chosen.priority(), 7);
    }

    // Same priority and arrival; only the burst tells them apart
    fn tied_pair(arrival: u32) -> ReadyQueue {
        ReadyQueue::with_processes(vec![
            ProcessControlBlock::with_priority(3, 1, arrival),
            ProcessControlBlock::with_priority(9, 1, arrival),
        ])
    }

    #[test]
    fn full_tie_among_arrived_takes_queue_front() {
        let mut queue = tied_pair(2);
        let chosen = HighestPriority.select(&mut queue, 2).unwrap();

        assert_eq!(chosen.remaining_burst_time(), 3);
        assert_eq!(queue.at(0).unwrap().remaining_burst_time(), 9);
    }

    #[test]
    fn full_tie_while_idle_takes_queue_front() {
        let mut queue = tied_pair(6);
        let chosen = HighestPriority.select(&mut queue, 0).unwrap();

        assert_eq!(chosen.remaining_burst_time(), 3);
        assert_eq!(queue.at(0).unwrap().remaining_burst_time(), 9);
    }
}
