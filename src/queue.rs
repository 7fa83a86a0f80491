/*
 * Bounded FIFO Queue
 *
 * Storage primitive behind all four scheduling queues. Capacity is fixed
 * at construction; enqueue reports fullness to the caller instead of
 * dropping, and the caller decides how to surface it.
 */

use std::collections::VecDeque;

use crate::process::ProcId;
use crate::types::QueueId;

/// Fixed-capacity FIFO of process identifiers
pub struct BoundedQueue {
    id: QueueId,
    items: VecDeque<ProcId>,
    capacity: usize,
}

impl BoundedQueue {
    pub fn new(id: QueueId, capacity: usize) -> Self {
        BoundedQueue {
            id,
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn id(&self) -> QueueId {
        self.id
    }

    /// Append to the tail. Returns false when the queue is full; the
    /// process is NOT admitted in that case and the caller must treat
    /// the run as unrecoverable.
    pub fn enqueue(&mut self, pid: ProcId) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push_back(pid);
        true
    }

    /// Remove and return the head, or None when empty
    pub fn dequeue(&mut self) -> Option<ProcId> {
        self.items.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Current members head-to-tail, without removing them
    pub fn snapshot(&self) -> impl Iterator<Item = ProcId> + '_ {
        self.items.iter().copied()
    }
}
