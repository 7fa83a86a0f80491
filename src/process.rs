/*
 * Process Abstraction
 *
 * A ProcessRecord is the unit of work moving through the simulator:
 * immutable identity read from the input file plus the mutable
 * remaining-burst state the disciplines consume.
 *
 * Lifecycle:
 *
 *   Created -> Queued (at arrival_time) -> Completed (remaining hits 0)
 *
 * A record enters exactly one queue, exactly once, and is never
 * re-classified. Between dispatches it sits in its queue; while being
 * serviced it is outside every queue. Completion is permanent.
 */

/// Dense process identifier
///
/// Indexes the ProcessTable directly. Assignment order equals input file
/// order, so the raw value doubles as the arrival tie-breaker used by
/// the SJF discipline.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcId(pub usize);

/// Process lifecycle state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProcState {
    /// Loaded but not yet arrived
    Created,
    /// Admitted to its queue, cycling between queued and serviced
    Queued,
    /// Remaining burst reached zero, permanently retired
    Completed,
}

/// A single process as described by one input record
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    /// Short identifier, unique per run, used only for reporting
    pub name: String,

    /// Simulated-time unit at which the process becomes eligible
    pub arrival_time: u64,

    /// Priority class, selects the queue and with it the discipline
    pub priority: u8,

    /// Total CPU units required
    pub burst_time: u64,

    /// CPU units still required. Strictly decreasing while serviced,
    /// exactly zero at completion, never negative.
    pub remaining: u64,

    /// Memory units requested. Read only by the classifier.
    pub ram: u64,

    /// Carried from the input record, not consumed by scheduling logic
    pub cpu_rate: u64,

    /// Current lifecycle state
    pub state: ProcState,

    /// Tick at which the process completed (None until then)
    pub completed_at: Option<u64>,
}

impl ProcessRecord {
    /// Create a record in the Created state with the full burst remaining
    pub fn new(
        name: &str,
        arrival_time: u64,
        priority: u8,
        burst_time: u64,
        ram: u64,
        cpu_rate: u64,
    ) -> Self {
        ProcessRecord {
            name: String::from(name),
            arrival_time,
            priority,
            burst_time,
            remaining: burst_time,
            ram,
            cpu_rate,
            state: ProcState::Created,
            completed_at: None,
        }
    }
}

/// All processes of a run, owned by the dispatch engine
///
/// Queues store ProcIds rather than records, so a process is never
/// duplicated no matter how many times round-robin requeues it.
pub struct ProcessTable {
    records: Vec<ProcessRecord>,
}

impl ProcessTable {
    pub fn new(records: Vec<ProcessRecord>) -> Self {
        ProcessTable { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, pid: ProcId) -> &ProcessRecord {
        &self.records[pid.0]
    }

    pub fn get_mut(&mut self, pid: ProcId) -> &mut ProcessRecord {
        &mut self.records[pid.0]
    }

    pub fn name(&self, pid: ProcId) -> &str {
        &self.records[pid.0].name
    }

    /// Iterate over (id, record) pairs in admission order
    pub fn iter(&self) -> impl Iterator<Item = (ProcId, &ProcessRecord)> {
        self.records.iter().enumerate().map(|(i, r)| (ProcId(i), r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_starts_with_full_burst() {
        let rec = ProcessRecord::new("P1", 3, 2, 17, 64, 1);
        assert_eq!(rec.remaining, rec.burst_time);
        assert_eq!(rec.state, ProcState::Created);
        assert!(rec.completed_at.is_none());
    }

    #[test]
    fn test_table_ids_follow_admission_order() {
        let table = ProcessTable::new(vec![
            ProcessRecord::new("A", 0, 0, 5, 10, 1),
            ProcessRecord::new("B", 0, 1, 5, 10, 1),
        ]);
        let ids: Vec<ProcId> = table.iter().map(|(pid, _)| pid).collect();
        assert_eq!(ids, vec![ProcId(0), ProcId(1)]);
        assert_eq!(table.name(ProcId(1)), "B");
    }
}
