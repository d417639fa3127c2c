use super::ProcessControlBlock;
use std::collections::{vec_deque, VecDeque};

/// Pool of processes that have not finished yet.
///
/// Not kept in any particular order; policies scan it every time they choose.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadyQueue {
    processes: VecDeque<ProcessControlBlock>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        ReadyQueue::with_processes(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            processes: VecDeque::with_capacity(capacity),
        }
    }

    pub fn with_processes(processes: Vec<ProcessControlBlock>) -> Self {
        Self {
            processes: processes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn push_back(&mut self, process: ProcessControlBlock) {
        self.processes.push_back(process);
    }

    pub fn at(&self, index: usize) -> Option<&ProcessControlBlock> {
        self.processes.get(index)
    }

    pub fn front(&self) -> Option<&ProcessControlBlock> {
        self.processes.front()
    }

    /// Removes the process at `index`, keeping the order of the others.
    pub fn extract(&mut self, index: usize) -> Option<ProcessControlBlock> {
        self.processes.remove(index)
    }

    pub fn extract_front(&mut self) -> Option<ProcessControlBlock> {
        self.processes.pop_front()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, ProcessControlBlock> {
        self.processes.iter()
    }

    /// Stable sort by arrival; equal arrivals keep their queue order.
    pub fn sort_by_arrival(&mut self) {
        self.processes
            .make_contiguous()
            .sort_by_key(|process| process.arrival());
    }
}

impl FromIterator<ProcessControlBlock> for ReadyQueue {
    fn from_iter<I: IntoIterator<Item = ProcessControlBlock>>(iter: I) -> Self {
        Self {
            processes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(arrivals: &[u32]) -> ReadyQueue {
        arrivals
            .iter()
            .enumerate()
            .map(|(burst, &arrival)| ProcessControlBlock::new(burst as u32 + 1, arrival))
            .collect()
    }

    #[test]
    fn extract_keeps_remaining_order() {
        let mut queue = queue(&[0, 1, 2, 3]);
        let extracted = queue.extract(1).unwrap();
        assert_eq!(extracted.arrival(), 1);

        let arrivals: Vec<u32> = queue.iter().map(|p| p.arrival()).collect();
        assert_eq!(arrivals, vec![0, 2, 3]);
    }

    #[test]
    fn extract_out_of_range_is_none() {
        let mut queue = queue(&[0]);
        assert!(queue.extract(3).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn extract_front_drains_in_order() {
        let mut queue = queue(&[4, 2]);
        assert_eq!(queue.extract_front().unwrap().arrival(), 4);
        assert_eq!(queue.extract_front().unwrap().arrival(), 2);
        assert!(queue.extract_front().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn sort_by_arrival_is_stable() {
        let mut queue = queue(&[3, 1, 3, 0]);
        queue.sort_by_arrival();

        let order: Vec<(u32, u32)> = queue
            .iter()
            .map(|p| (p.arrival(), p.remaining_burst_time()))
            .collect();
        assert_eq!(order, vec![(0, 4), (1, 2), (3, 1), (3, 3)]);
    }
}
