/*
 * Scheduling Disciplines Module
 *
 * Each queue runs one discipline, selected once by queue identity and
 * never swapped mid-run. A discipline decides which queued process is
 * serviced next and how many CPU units the dispatch may consume; the
 * engine performs the actual burst accounting and event emission.
 *
 * Available disciplines:
 * - Fcfs: admission order, one unit per dispatch
 * - Sjf: non-preemptive, sort-once batches by total burst
 * - RoundRobin: fixed quantum, unfinished work requeues at the tail
 */

mod fcfs;
mod round_robin;
mod sjf;

pub use fcfs::Fcfs;
pub use round_robin::RoundRobin;
pub use sjf::Sjf;

use crate::error::SimError;
use crate::process::{ProcId, ProcessTable};
use crate::queue::BoundedQueue;
use crate::types::{QueueId, Quantum};

/// A single dispatch chosen by a discipline
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Process removed from the queue for servicing
    pub pid: ProcId,

    /// CPU units granted to this dispatch. Never zero, never more than
    /// the process's remaining burst.
    pub grant: u64,
}

/// Scheduling policy of one queue
///
/// The engine calls select() when the queue's CPU slot is free and the
/// queue is non-empty. The chosen process leaves the queue for the
/// duration of the slice; if the slice does not finish it, the engine
/// hands it back through requeue(). Disciplines own every ordering
/// decision, the engine owns time and burst accounting.
pub trait Discipline {
    /// Remove and return the next process to service with its grant.
    /// Ok(None) when the queue has nothing to offer.
    fn select(
        &mut self,
        queue: &mut BoundedQueue,
        table: &ProcessTable,
    ) -> Result<Option<Dispatch>, SimError>;

    /// Return an unfinished process to the queue after its slice ran
    fn requeue(
        &mut self,
        queue: &mut BoundedQueue,
        table: &ProcessTable,
        pid: ProcId,
    ) -> Result<(), SimError>;

    /// Get the policy name for logging
    fn name(&self) -> &'static str;
}

/// Build the discipline bound to a queue identity
pub fn discipline_for(queue: QueueId) -> Box<dyn Discipline> {
    match queue {
        QueueId::Fcfs => Box::new(Fcfs::new()),
        QueueId::Sjf => Box::new(Sjf::new()),
        QueueId::RrShort => Box::new(RoundRobin::new(Quantum::SHORT)),
        QueueId::RrLong => Box::new(RoundRobin::new(Quantum::LONG)),
    }
}

/// Tail requeue shared by the disciplines that cycle unfinished work
fn requeue_at_tail(
    queue: &mut BoundedQueue,
    table: &ProcessTable,
    pid: ProcId,
) -> Result<(), SimError> {
    if queue.enqueue(pid) {
        Ok(())
    } else {
        Err(SimError::QueueOverflow {
            queue: queue.id(),
            process: table.name(pid).to_string(),
        })
    }
}
