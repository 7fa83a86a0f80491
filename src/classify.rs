/*
 * Process Classifier
 *
 * Routes every arriving process to exactly one queue based on its
 * priority class. Priority 0 additionally checks the memory threshold;
 * a priority-0 process above the threshold is still routed by priority
 * alone because only one FCFS queue exists, but the anomaly is logged.
 */

use crate::error::SimError;
use crate::process::ProcessRecord;
use crate::types::QueueId;

/// Priority-based queue router
pub struct Classifier {
    /// Memory ceiling for priority-0 processes, total_ram / 4
    ram_threshold: u64,
}

impl Classifier {
    pub fn new(ram_threshold: u64) -> Self {
        Classifier { ram_threshold }
    }

    /// Map a process to its queue, or reject it
    ///
    /// Priority 0 goes to the FCFS queue on CPU-1; priorities 1 to 3 go
    /// to the CPU-2 queues. Anything else is unclassifiable and aborts
    /// the run before the process could be lost silently.
    pub fn classify(&self, record: &ProcessRecord) -> Result<QueueId, SimError> {
        match record.priority {
            0 => {
                if record.ram > self.ram_threshold {
                    log::warn!(
                        "process {} requests {} memory units, above the priority-0 threshold {}",
                        record.name,
                        record.ram,
                        self.ram_threshold
                    );
                }
                Ok(QueueId::Fcfs)
            }
            1 => Ok(QueueId::Sjf),
            2 => Ok(QueueId::RrShort),
            3 => Ok(QueueId::RrLong),
            priority => Err(SimError::UnclassifiablePriority {
                process: record.name.clone(),
                priority,
            }),
        }
    }
}
