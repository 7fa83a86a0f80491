/*
 * Shortest-Job-First Discipline
 *
 * Non-preemptive and offline by nature. When its current batch is
 * exhausted the discipline sorts everything queued at that moment by
 * total burst time (ties fall back to admission order) and then runs
 * each member of the batch to completion in that order. Processes that
 * arrive mid-batch wait at the tail until the next sort; a shorter job
 * arriving mid-execution never preempts the running one.
 */

use super::{requeue_at_tail, Discipline, Dispatch};
use crate::error::SimError;
use crate::process::{ProcId, ProcessTable};
use crate::queue::BoundedQueue;

pub struct Sjf {
    /// Members of the current sorted batch still at the head of the queue
    batch_remaining: usize,
}

impl Sjf {
    pub fn new() -> Self {
        Sjf { batch_remaining: 0 }
    }

    /// Sort the whole queue by total burst, admission order on ties.
    /// Members are cycled through the queue itself so a snapshot taken
    /// between dispatches always reflects the true service order.
    fn sort_batch(
        &mut self,
        queue: &mut BoundedQueue,
        table: &ProcessTable,
    ) -> Result<(), SimError> {
        let mut members = Vec::with_capacity(queue.len());
        while let Some(pid) = queue.dequeue() {
            members.push(pid);
        }
        members.sort_by_key(|&pid| (table.get(pid).burst_time, pid));
        for pid in members {
            requeue_at_tail(queue, table, pid)?;
        }
        self.batch_remaining = queue.len();
        log::debug!("SJF sorted a batch of {}", self.batch_remaining);
        Ok(())
    }
}

impl Discipline for Sjf {
    fn select(
        &mut self,
        queue: &mut BoundedQueue,
        table: &ProcessTable,
    ) -> Result<Option<Dispatch>, SimError> {
        if queue.is_empty() {
            return Ok(None);
        }
        if self.batch_remaining == 0 {
            self.sort_batch(queue, table)?;
        }
        let pid = queue.dequeue().ok_or(SimError::EmptyQueueAccess {
            queue: queue.id(),
        })?;
        self.batch_remaining -= 1;

        // Run to completion: the grant covers the whole remaining burst.
        let grant = table.get(pid).remaining;
        Ok(Some(Dispatch { pid, grant }))
    }

    fn requeue(
        &mut self,
        queue: &mut BoundedQueue,
        table: &ProcessTable,
        pid: ProcId,
    ) -> Result<(), SimError> {
        // A full grant leaves no residue, so this path is never taken in
        // a correct run. Handing the process back keeps it accounted for.
        requeue_at_tail(queue, table, pid)
    }

    fn name(&self) -> &'static str {
        "SJF"
    }
}

impl Default for Sjf {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessRecord;
    use crate::types::QueueId;

    fn run_one(sjf: &mut Sjf, queue: &mut BoundedQueue, table: &mut ProcessTable) -> (ProcId, u64) {
        let d = sjf.select(queue, table).unwrap().unwrap();
        let rec = table.get_mut(d.pid);
        rec.remaining -= d.grant;
        assert_eq!(rec.remaining, 0);
        (d.pid, d.grant)
    }

    #[test]
    fn test_batch_is_served_shortest_first() {
        let mut table = ProcessTable::new(vec![
            ProcessRecord::new("L", 0, 1, 9, 10, 1),
            ProcessRecord::new("S", 0, 1, 2, 10, 1),
            ProcessRecord::new("M", 0, 1, 5, 10, 1),
        ]);
        let mut queue = BoundedQueue::new(QueueId::Sjf, 4);
        queue.enqueue(ProcId(0));
        queue.enqueue(ProcId(1));
        queue.enqueue(ProcId(2));

        let mut sjf = Sjf::new();
        assert_eq!(run_one(&mut sjf, &mut queue, &mut table), (ProcId(1), 2));
        assert_eq!(run_one(&mut sjf, &mut queue, &mut table), (ProcId(2), 5));
        assert_eq!(run_one(&mut sjf, &mut queue, &mut table), (ProcId(0), 9));
    }

    #[test]
    fn test_equal_bursts_keep_admission_order() {
        let mut table = ProcessTable::new(vec![
            ProcessRecord::new("P1", 0, 1, 4, 10, 1),
            ProcessRecord::new("P2", 0, 1, 4, 10, 1),
        ]);
        let mut queue = BoundedQueue::new(QueueId::Sjf, 4);
        queue.enqueue(ProcId(0));
        queue.enqueue(ProcId(1));

        let mut sjf = Sjf::new();
        assert_eq!(run_one(&mut sjf, &mut queue, &mut table).0, ProcId(0));
        assert_eq!(run_one(&mut sjf, &mut queue, &mut table).0, ProcId(1));
    }

    #[test]
    fn test_mid_batch_arrival_waits_for_next_sort() {
        let mut table = ProcessTable::new(vec![
            ProcessRecord::new("A", 0, 1, 6, 10, 1),
            ProcessRecord::new("B", 0, 1, 8, 10, 1),
            ProcessRecord::new("C", 0, 1, 1, 10, 1),
        ]);
        let mut queue = BoundedQueue::new(QueueId::Sjf, 4);
        queue.enqueue(ProcId(0));
        queue.enqueue(ProcId(1));

        let mut sjf = Sjf::new();
        // First dispatch sorts the two-member batch: A before B.
        assert_eq!(run_one(&mut sjf, &mut queue, &mut table).0, ProcId(0));

        // C arrives mid-batch; B is still ahead of it despite C's
        // shorter burst.
        queue.enqueue(ProcId(2));
        assert_eq!(run_one(&mut sjf, &mut queue, &mut table).0, ProcId(1));
        assert_eq!(run_one(&mut sjf, &mut queue, &mut table).0, ProcId(2));
    }
}
