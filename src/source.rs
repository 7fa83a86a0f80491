/*
 * Process Source
 *
 * Reads process records from a text file. One record per line:
 *
 *   name,arrival_time,priority,burst_time,ram,cpu_rate
 *
 * Blank lines are skipped. Anything else that does not parse is a
 * malformed record and is reported with its line number; malformed
 * records never reach the engine.
 */

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::SimError;
use crate::process::ProcessRecord;

/// Read all process records from a file, in file order
pub fn read_process_file(path: &Path) -> Result<Vec<ProcessRecord>, SimError> {
    let file = File::open(path)?;
    parse_records(BufReader::new(file))
}

/// Parse records from any buffered reader
pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<ProcessRecord>, SimError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        records.push(parse_record(line, idx + 1)?);
    }
    Ok(records)
}

fn parse_record(line: &str, lineno: usize) -> Result<ProcessRecord, SimError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 6 {
        return Err(SimError::Parse {
            line: lineno,
            reason: format!("expected 6 fields, found {}", fields.len()),
        });
    }

    let name = fields[0];
    if name.is_empty() {
        return Err(SimError::Parse {
            line: lineno,
            reason: String::from("empty process name"),
        });
    }

    let arrival_time = parse_field(fields[1], "arrival_time", lineno)?;
    let priority = parse_field(fields[2], "priority", lineno)?;
    let burst_time = parse_field(fields[3], "burst_time", lineno)?;
    let ram = parse_field(fields[4], "ram", lineno)?;
    let cpu_rate = parse_field(fields[5], "cpu_rate", lineno)?;

    // A zero burst could never complete and would hang the run.
    if burst_time == 0 {
        return Err(SimError::Parse {
            line: lineno,
            reason: format!("process {} has zero burst time", name),
        });
    }

    let priority = u8::try_from(priority).map_err(|_| SimError::Parse {
        line: lineno,
        reason: format!("priority {} out of range", priority),
    })?;

    Ok(ProcessRecord::new(
        name,
        arrival_time,
        priority,
        burst_time,
        ram,
        cpu_rate,
    ))
}

fn parse_field(value: &str, field: &str, lineno: usize) -> Result<u64, SimError> {
    value.parse().map_err(|_| SimError::Parse {
        line: lineno,
        reason: format!("invalid {}: {:?}", field, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parses_records_in_file_order() {
        let input = "A,0,0,5,100,1\nB,0,2,20,100,1\n\nC,5,2,10,100,1\n";
        let records = parse_records(Cursor::new(input)).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "A");
        assert_eq!(records[1].burst_time, 20);
        assert_eq!(records[2].arrival_time, 5);
        assert_eq!(records[0].cpu_rate, 1);
    }

    #[test]
    fn test_rejects_wrong_field_count() {
        let err = parse_records(Cursor::new("A,0,0,5,100\n")).unwrap_err();
        match err {
            SimError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("expected Parse, got {}", other),
        }
    }

    #[test]
    fn test_rejects_non_numeric_field() {
        assert!(parse_records(Cursor::new("A,zero,0,5,100,1\n")).is_err());
    }

    #[test]
    fn test_rejects_zero_burst() {
        let err = parse_records(Cursor::new("ok,0,1,3,10,1\nbad,0,1,0,10,1\n")).unwrap_err();
        match err {
            SimError::Parse { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("zero burst"));
            }
            other => panic!("expected Parse, got {}", other),
        }
    }
}
