/*
 * Trace Events and Sinks
 *
 * The engine reports everything that happens during a dispatch as typed
 * events. Sinks turn them into ordered text lines; the emission order is
 * part of the engine contract and must not be reordered by a sink.
 */

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::SimError;
use crate::types::CpuId;

/// One observable scheduling action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A process was dispatched to a CPU slot
    Assigned { name: String, cpu: CpuId },

    /// A process consumed CPU units during a dispatch
    Ran {
        name: String,
        units: u64,
        /// True when this slice exhausted the remaining burst
        completing: bool,
    },

    /// A process finished and was permanently retired
    Completed { name: String },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Assigned { name, cpu } => write!(f, "{} assigned to {}", name, cpu),
            TraceEvent::Ran {
                name,
                units,
                completing,
            } => {
                write!(f, "{} runs for {} units", name, units)?;
                if *completing {
                    write!(f, ", completing its execution")?;
                }
                Ok(())
            }
            TraceEvent::Completed { name } => write!(f, "{} completed and terminated", name),
        }
    }
}

/// Receiver for the ordered event stream of a run
pub trait TraceSink {
    fn emit(&mut self, event: &TraceEvent) -> Result<(), SimError>;

    /// Append a raw report line behind the event stream
    fn write_line(&mut self, line: &str) -> Result<(), SimError>;

    fn flush(&mut self) -> Result<(), SimError> {
        Ok(())
    }
}

/// Buffered file sink, one line per event
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    pub fn create(path: &Path) -> Result<Self, SimError> {
        let file = File::create(path)?;
        Ok(FileSink {
            writer: BufWriter::new(file),
        })
    }
}

impl TraceSink for FileSink {
    fn emit(&mut self, event: &TraceEvent) -> Result<(), SimError> {
        writeln!(self.writer, "{}", event)?;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<(), SimError> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SimError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Console sink for interactive runs
pub struct ConsoleSink;

impl TraceSink for ConsoleSink {
    fn emit(&mut self, event: &TraceEvent) -> Result<(), SimError> {
        println!("{}", event);
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<(), SimError> {
        println!("{}", line);
        Ok(())
    }
}

/// In-memory sink for replay comparison in tests
#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

#[cfg(test)]
impl MemorySink {
    pub fn new() -> Self {
        MemorySink { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

#[cfg(test)]
impl TraceSink for MemorySink {
    fn emit(&mut self, event: &TraceEvent) -> Result<(), SimError> {
        self.lines.push(event.to_string());
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<(), SimError> {
        self.lines.push(String::from(line));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_line_formats() {
        let assigned = TraceEvent::Assigned {
            name: "A".into(),
            cpu: CpuId::Cpu1,
        };
        assert_eq!(assigned.to_string(), "A assigned to CPU-1");

        let ran = TraceEvent::Ran {
            name: "B".into(),
            units: 8,
            completing: false,
        };
        assert_eq!(ran.to_string(), "B runs for 8 units");

        let last = TraceEvent::Ran {
            name: "B".into(),
            units: 4,
            completing: true,
        };
        assert_eq!(last.to_string(), "B runs for 4 units, completing its execution");

        let done = TraceEvent::Completed { name: "B".into() };
        assert_eq!(done.to_string(), "B completed and terminated");
    }

    #[test]
    fn test_memory_sink_preserves_order() {
        let mut sink = MemorySink::new();
        sink.emit(&TraceEvent::Assigned {
            name: "A".into(),
            cpu: CpuId::Cpu2,
        })
        .unwrap();
        sink.emit(&TraceEvent::Completed { name: "A".into() }).unwrap();
        assert_eq!(
            sink.lines(),
            &["A assigned to CPU-2".to_string(), "A completed and terminated".to_string()]
        );
    }
}
