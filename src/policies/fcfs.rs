/*
 * First-Come-First-Served Discipline
 *
 * Services the head of the queue for exactly one unit per dispatch and
 * cycles unfinished work to the tail. The single-unit grant lets the
 * tick loop admit new arrivals between slices of a long-running process
 * while admission order is still what decides who finishes first; burst
 * length never reorders anything.
 */

use super::{requeue_at_tail, Discipline, Dispatch};
use crate::error::SimError;
use crate::process::{ProcId, ProcessTable};
use crate::queue::BoundedQueue;

pub struct Fcfs;

impl Fcfs {
    pub fn new() -> Self {
        Fcfs
    }
}

impl Discipline for Fcfs {
    fn select(
        &mut self,
        queue: &mut BoundedQueue,
        _table: &ProcessTable,
    ) -> Result<Option<Dispatch>, SimError> {
        if queue.is_empty() {
            return Ok(None);
        }
        let pid = queue.dequeue().ok_or(SimError::EmptyQueueAccess {
            queue: queue.id(),
        })?;
        Ok(Some(Dispatch { pid, grant: 1 }))
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
        "FCFS"
    }
}

impl Default for Fcfs {
    fn default() -> Self {
        Self::new()
    }
}
