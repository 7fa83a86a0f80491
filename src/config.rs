/*
 * Simulation Configuration
 *
 * Run-wide knobs with the historical defaults. The quanta of the two
 * round-robin queues are part of the queue identities themselves and
 * are not configurable here.
 */

/// Run-wide configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Capacity of each of the four queues. Callers must size this at
    /// least as large as the process count; the engine aborts on the
    /// first enqueue that would not fit.
    pub queue_capacity: usize,

    /// Total memory units, basis of the priority-0 classification
    /// threshold
    pub total_ram: u64,

    /// Ticks between two periodic queue reports
    pub snapshot_every: u64,
}

impl SimConfig {
    pub const DEFAULT_QUEUE_CAPACITY: usize = 100;
    pub const DEFAULT_TOTAL_RAM: u64 = 2048;
    pub const DEFAULT_SNAPSHOT_EVERY: u64 = 10;

    /// Memory ceiling for priority-0 processes
    pub fn ram_threshold(&self) -> u64 {
        self.total_ram / 4
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            queue_capacity: Self::DEFAULT_QUEUE_CAPACITY,
            total_ram: Self::DEFAULT_TOTAL_RAM,
            snapshot_every: Self::DEFAULT_SNAPSHOT_EVERY,
        }
    }
}
