/*
 * Simulation Error Definitions
 *
 * Every error that can abort a run is collected in SimError. All of them
 * are detected at the point of occurrence and carry enough context to
 * name the offending process or queue; none are silently swallowed.
 * There is nothing transient in a deterministic simulation, so no error
 * is retried.
 */

use std::fmt;
use std::io;

use crate::types::QueueId;

/// Errors that abort a simulation run
#[derive(Debug)]
pub enum SimError {
    /// Enqueue attempted on a full queue. A dropped process could never
    /// complete, so the run cannot terminate and must be aborted here.
    QueueOverflow { queue: QueueId, process: String },

    /// Dequeue on an empty queue. The dispatch path checks emptiness
    /// before selecting, so this is an invariant violation.
    EmptyQueueAccess { queue: QueueId },

    /// Priority outside the four serviced classes. Rejected at
    /// classification time instead of silently discarding the process.
    UnclassifiablePriority { process: String, priority: u8 },

    /// All queues drained and no arrivals left while work is unfinished.
    /// Means a process was never admitted to a serviced queue.
    Stalled { tick: u64 },

    /// Malformed input record
    Parse { line: usize, reason: String },

    /// Underlying I/O failure on the process source or a trace sink
    Io(io::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::QueueOverflow { queue, process } => {
                write!(f, "queue {} is full, cannot admit process {}", queue, process)
            }
            SimError::EmptyQueueAccess { queue } => {
                write!(f, "dequeue on empty queue {}", queue)
            }
            SimError::UnclassifiablePriority { process, priority } => {
                write!(f, "process {} has unclassifiable priority {}", process, priority)
            }
            SimError::Stalled { tick } => {
                write!(f, "simulation stalled at tick {} with unfinished processes", tick)
            }
            SimError::Parse { line, reason } => {
                write!(f, "input line {}: {}", line, reason)
            }
            SimError::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SimError {
    fn from(err: io::Error) -> Self {
        SimError::Io(err)
    }
}
