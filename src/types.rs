/*
 * Core Type Definitions
 *
 * This module defines the identifiers shared by the classifier, the
 * scheduling disciplines and the dispatch engine. They are lightweight,
 * Copy-able and carry the display names used in the trace and in the
 * queue reports.
 */

use std::fmt;

/// CPU service slot identifier
///
/// The simulator models two service slots. They are evaluated once per
/// tick inside the same control flow; there is no real parallelism.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CpuId {
    /// Serves the FCFS queue exclusively
    Cpu1,
    /// Serves the SJF and both round-robin queues
    Cpu2,
}

impl CpuId {
    /// Get the display name used in trace lines
    pub fn name(self) -> &'static str {
        match self {
            CpuId::Cpu1 => "CPU-1",
            CpuId::Cpu2 => "CPU-2",
        }
    }
}

impl fmt::Display for CpuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Queue identifier
///
/// Each queue is bound to one discipline and one CPU at configuration
/// time. The binding never changes during a run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum QueueId {
    /// Priority 0, first-come-first-served, CPU-1
    Fcfs,
    /// Priority 1, shortest-job-first, CPU-2
    Sjf,
    /// Priority 2, round-robin with the short quantum, CPU-2
    RrShort,
    /// Priority 3, round-robin with the long quantum, CPU-2
    RrLong,
}

impl QueueId {
    /// All queues, in priority order
    pub const ALL: [QueueId; 4] = [
        QueueId::Fcfs,
        QueueId::Sjf,
        QueueId::RrShort,
        QueueId::RrLong,
    ];

    /// CPU-2 service order. A non-empty earlier queue always wins the
    /// next dispatch over the later ones.
    pub const CPU2_ORDER: [QueueId; 3] = [QueueId::Sjf, QueueId::RrShort, QueueId::RrLong];

    /// Dense index for queue-keyed arrays
    pub fn index(self) -> usize {
        match self {
            QueueId::Fcfs => 0,
            QueueId::Sjf => 1,
            QueueId::RrShort => 2,
            QueueId::RrLong => 3,
        }
    }

    /// The CPU slot that services this queue
    pub fn serviced_by(self) -> CpuId {
        match self {
            QueueId::Fcfs => CpuId::Cpu1,
            _ => CpuId::Cpu2,
        }
    }

    /// Label used in queue reports
    pub fn label(self) -> &'static str {
        match self {
            QueueId::Fcfs => "que1(priority-0) (FCFS)",
            QueueId::Sjf => "que2(priority-1) (SJF)",
            QueueId::RrShort => "que3(priority-2) (RR-q8)",
            QueueId::RrLong => "que4(priority-3) (RR-q16)",
        }
    }
}

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Time quantum granted to a process per round-robin dispatch
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Quantum(pub u32);

impl Quantum {
    /// Quantum of the priority-2 round-robin queue
    pub const SHORT: Quantum = Quantum(8);

    /// Quantum of the priority-3 round-robin queue
    pub const LONG: Quantum = Quantum(16);

    /// Get the value in time units
    pub fn get(self) -> u32 {
        self.0
    }
}
