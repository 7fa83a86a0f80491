/*
 * Round-Robin Discipline
 *
 * Preemptive at quantum boundaries only. Each dispatch of the head
 * process consumes min(quantum, remaining burst); a process that still
 * has work afterwards goes back to the tail of the queue. Two instances
 * exist per run, one with the short quantum and one with the long.
 */

use super::{requeue_at_tail, Discipline, Dispatch};
use crate::error::SimError;
use crate::process::{ProcId, ProcessTable};
use crate::queue::BoundedQueue;
use crate::types::Quantum;

pub struct RoundRobin {
    quantum: Quantum,
}

impl RoundRobin {
    pub fn new(quantum: Quantum) -> Self {
        RoundRobin { quantum }
    }
}

impl Discipline for RoundRobin {
    fn select(
        &mut self,
        queue: &mut BoundedQueue,
        table: &ProcessTable,
    ) -> Result<Option<Dispatch>, SimError> {
        if queue.is_empty() {
            return Ok(None);
        }
        let pid = queue.dequeue().ok_or(SimError::EmptyQueueAccess {
            queue: queue.id(),
        })?;
        let grant = u64::from(self.quantum.get()).min(table.get(pid).remaining);
        Ok(Some(Dispatch { pid, grant }))
    }

    fn requeue(
        &mut self,
        queue: &mut BoundedQueue,
        table: &ProcessTable,
        pid: ProcId,
    ) -> Result<(), SimError> {
        requeue_at_tail(queue, table, pid)
    }

    fn name(&self) -> &'static str {
        "RoundRobin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessRecord;
    use crate::types::QueueId;

    #[test]
    fn test_burst_twenty_splits_into_8_8_4() {
        let mut table = ProcessTable::new(vec![ProcessRecord::new("B", 0, 2, 20, 10, 1)]);
        let mut queue = BoundedQueue::new(QueueId::RrShort, 2);
        queue.enqueue(ProcId(0));

        let mut rr = RoundRobin::new(Quantum::SHORT);
        let mut grants = Vec::new();
        loop {
            let d = rr.select(&mut queue, &table).unwrap().unwrap();
            grants.push(d.grant);
            let rec = table.get_mut(d.pid);
            rec.remaining -= d.grant;
            if rec.remaining == 0 {
                break;
            }
            rr.requeue(&mut queue, &table, d.pid).unwrap();
        }
        assert_eq!(grants, vec![8, 8, 4]);
    }

    #[test]
    fn test_head_rotation_interleaves_members() {
        let table = ProcessTable::new(vec![
            ProcessRecord::new("X", 0, 3, 40, 10, 1),
            ProcessRecord::new("Y", 0, 3, 40, 10, 1),
        ]);
        let mut queue = BoundedQueue::new(QueueId::RrLong, 4);
        queue.enqueue(ProcId(0));
        queue.enqueue(ProcId(1));

        let mut rr = RoundRobin::new(Quantum::LONG);
        let first = rr.select(&mut queue, &table).unwrap().unwrap();
        assert_eq!(first.pid, ProcId(0));
        assert_eq!(first.grant, 16);
        rr.requeue(&mut queue, &table, first.pid).unwrap();

        let second = rr.select(&mut queue, &table).unwrap().unwrap();
        assert_eq!(second.pid, ProcId(1));
    }
}
