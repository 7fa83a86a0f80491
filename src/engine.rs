/*
 * Dispatch Engine - Mechanism Layer
 *
 * The engine owns the whole simulation state: the process table, the
 * four bounded queues with their disciplines, the two CPU service
 * slots, simulated time and the completed counter. Nothing else may
 * mutate any of it while a tick is in progress; with no randomness and
 * no wall-clock dependency, the same input always produces the same
 * trace.
 *
 * Per tick:
 * 1. Admit every process whose arrival time equals the current tick,
 *    classifying each into exactly one queue.
 * 2. CPU-1 performs one FCFS step.
 * 3. CPU-2 dispatches from the first non-empty queue in sub-priority
 *    order SJF, RR-q8, RR-q16. SJF slices run to completion; the
 *    round-robin queues consume a full quantum per dispatch. Quanta are
 *    never interrupted mid-slice, only re-evaluated at the next
 *    dispatch boundary.
 * 4. Trace events are emitted as they happen, CPU-1 before CPU-2.
 * 5. The tick counter advances.
 *
 * The run is Done once the completed counter reaches the process count.
 * That counter is the sole termination signal, which is why admission
 * failures are fatal: a process outside every serviced queue would keep
 * the loop spinning forever.
 */

use crate::classify::Classifier;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::policies::{discipline_for, Discipline, Dispatch};
use crate::process::{ProcId, ProcState, ProcessRecord, ProcessTable};
use crate::queue::BoundedQueue;
use crate::trace::{TraceEvent, TraceSink};
use crate::types::QueueId;

/// Final figures of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimSummary {
    /// Processes retired, equals the table size on success
    pub completed: usize,

    /// Ticks the run took
    pub ticks: u64,
}

/// Two-CPU, four-queue dispatch engine
pub struct DispatchEngine {
    table: ProcessTable,
    queues: [BoundedQueue; 4],
    disciplines: [Box<dyn Discipline>; 4],
    classifier: Classifier,
    clock: u64,
    completed: usize,
    admitted: usize,
}

impl DispatchEngine {
    /// Build an engine over a fixed process set
    pub fn new(records: Vec<ProcessRecord>, config: &SimConfig) -> Self {
        let capacity = config.queue_capacity;
        let queues = QueueId::ALL.map(|id| BoundedQueue::new(id, capacity));
        let disciplines = QueueId::ALL.map(discipline_for);

        log::info!(
            "engine ready: {} processes, queue capacity {}, ram threshold {}",
            records.len(),
            capacity,
            config.ram_threshold()
        );
        for (queue, discipline) in QueueId::ALL.iter().zip(disciplines.iter()) {
            log::debug!("{} runs {} on {}", queue, discipline.name(), queue.serviced_by());
        }

        DispatchEngine {
            table: ProcessTable::new(records),
            queues,
            disciplines,
            classifier: Classifier::new(config.ram_threshold()),
            clock: 0,
            completed: 0,
            admitted: 0,
        }
    }

    /// Current simulated time
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// True once every process has completed
    pub fn is_done(&self) -> bool {
        self.completed == self.table.len()
    }

    /// Read access to the process table, for reporting
    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    /// Per-queue member names, head to tail. Pure read.
    pub fn queue_report(&self) -> Vec<(QueueId, Vec<&str>)> {
        self.queues
            .iter()
            .map(|q| {
                let names = q.snapshot().map(|pid| self.table.name(pid)).collect();
                (q.id(), names)
            })
            .collect()
    }

    /// Execute one tick and return its index
    pub fn step(&mut self, sink: &mut dyn TraceSink) -> Result<u64, SimError> {
        let tick = self.clock;
        if self.is_done() {
            return Ok(tick);
        }

        self.admit_arrivals()?;

        // Work is left but nothing is queued and nothing will arrive:
        // the loop could never make progress again.
        if self.admitted == self.table.len()
            && !self.is_done()
            && self.queues.iter().all(BoundedQueue::is_empty)
        {
            return Err(SimError::Stalled { tick });
        }

        self.service_cpu1(sink)?;
        self.service_cpu2(sink)?;

        self.clock += 1;
        Ok(tick)
    }

    /// Drive the run to completion
    pub fn run(&mut self, sink: &mut dyn TraceSink) -> Result<SimSummary, SimError> {
        while !self.is_done() {
            self.step(sink)?;
        }
        sink.flush()?;
        log::info!("run complete: {} processes in {} ticks", self.completed, self.clock);
        Ok(SimSummary {
            completed: self.completed,
            ticks: self.clock,
        })
    }

    /// Classify and enqueue every process arriving at the current tick
    fn admit_arrivals(&mut self) -> Result<(), SimError> {
        let arriving: Vec<ProcId> = self
            .table
            .iter()
            .filter(|(_, r)| r.state == ProcState::Created && r.arrival_time == self.clock)
            .map(|(pid, _)| pid)
            .collect();

        for pid in arriving {
            let record = self.table.get(pid);
            let queue_id = self.classifier.classify(record)?;
            if !self.queues[queue_id.index()].enqueue(pid) {
                return Err(SimError::QueueOverflow {
                    queue: queue_id,
                    process: record.name.clone(),
                });
            }
            log::debug!("{} enters {} at tick {}", record.name, queue_id, self.clock);
            self.table.get_mut(pid).state = ProcState::Queued;
            self.admitted += 1;
        }
        Ok(())
    }

    fn service_cpu1(&mut self, sink: &mut dyn TraceSink) -> Result<(), SimError> {
        if !self.queues[QueueId::Fcfs.index()].is_empty() {
            self.service(QueueId::Fcfs, sink)?;
        }
        Ok(())
    }

    /// One CPU-2 dispatch from the first non-empty queue. The order is
    /// strict and re-evaluated every tick, so a non-empty higher tier
    /// always wins the next dispatch boundary.
    fn service_cpu2(&mut self, sink: &mut dyn TraceSink) -> Result<(), SimError> {
        for queue_id in QueueId::CPU2_ORDER {
            if !self.queues[queue_id.index()].is_empty() {
                return self.service(queue_id, sink);
            }
        }
        Ok(())
    }

    /// Run one dispatch on a queue: select, account the burst, emit
    /// events, retire or requeue
    fn service(&mut self, queue_id: QueueId, sink: &mut dyn TraceSink) -> Result<(), SimError> {
        let i = queue_id.index();
        let selected = self.disciplines[i].select(&mut self.queues[i], &self.table)?;
        let Some(Dispatch { pid, grant }) = selected else {
            return Ok(());
        };

        let name = self.table.name(pid).to_string();
        sink.emit(&TraceEvent::Assigned {
            name: name.clone(),
            cpu: queue_id.serviced_by(),
        })?;

        let completing = {
            let record = self.table.get_mut(pid);
            debug_assert!(grant >= 1 && grant <= record.remaining);
            record.remaining -= grant;
            record.remaining == 0
        };

        sink.emit(&TraceEvent::Ran {
            name: name.clone(),
            units: grant,
            completing,
        })?;

        if completing {
            let tick = self.clock;
            let record = self.table.get_mut(pid);
            record.state = ProcState::Completed;
            record.completed_at = Some(tick);
            self.completed += 1;
            sink.emit(&TraceEvent::Completed { name: name.clone() })?;
            log::debug!(
                "{} completed at tick {} ({}/{})",
                name,
                tick,
                self.completed,
                self.table.len()
            );
        } else {
            self.disciplines[i].requeue(&mut self.queues[i], &self.table, pid)?;
        }
        Ok(())
    }
}
