/*
 * quadsched - two-CPU, four-queue process scheduling simulator
 *
 * Reads process records from an input file, dispatches them through
 * four priority queues onto two CPU service slots and writes the event
 * trace to an output file. Queue contents are echoed to the console at
 * a fixed tick interval while the run is in progress.
 */

mod classify;
mod config;
mod engine;
mod error;
mod policies;
mod process;
mod queue;
mod source;
mod trace;
mod types;

use std::io::Write;
use std::path::Path;

use clap::{App, Arg};
use env_logger::Builder;

use crate::config::SimConfig;
use crate::engine::DispatchEngine;
use crate::error::SimError;
use crate::trace::{ConsoleSink, FileSink, TraceSink};

fn main() {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{} - {}", record.level(), record.args()))
        .init();

    let matches = App::new("quadsched")
        .version("0.1.0")
        .about("Two-CPU, four-queue process scheduling simulator")
        .arg(
            Arg::with_name("inputfile")
                .help("Process records, one name,arrival,priority,burst,ram,cpu_rate per line")
                .index(1)
                .default_value("input.txt"),
        )
        .arg(
            Arg::with_name("outputfile")
                .long("outputfile")
                .takes_value(true)
                .default_value("output.txt")
                .help("Trace output file"),
        )
        .arg(
            Arg::with_name("ram")
                .long("ram")
                .takes_value(true)
                .validator(valid_number)
                .help("Total memory units (classification threshold is a quarter of this)"),
        )
        .arg(
            Arg::with_name("capacity")
                .long("capacity")
                .takes_value(true)
                .validator(valid_number)
                .help("Queue capacity floor (raised to the process count when smaller)"),
        )
        .arg(
            Arg::with_name("snapshot-every")
                .long("snapshot-every")
                .takes_value(true)
                .validator(valid_number)
                .help("Ticks between console queue reports"),
        )
        .arg(
            Arg::with_name("stdout")
                .long("stdout")
                .takes_value(false)
                .help("Write the trace to the console instead of the output file"),
        )
        .get_matches();

    let inputfile = matches.value_of("inputfile").unwrap_or("input.txt").to_string();
    let outputfile = matches.value_of("outputfile").unwrap_or("output.txt").to_string();
    let to_stdout = matches.is_present("stdout");

    let mut config = SimConfig::default();
    if let Some(ram) = numeric_arg(&matches, "ram") {
        config.total_ram = ram;
    }
    if let Some(capacity) = numeric_arg(&matches, "capacity") {
        config.queue_capacity = capacity as usize;
    }
    if let Some(every) = numeric_arg(&matches, "snapshot-every") {
        config.snapshot_every = every.max(1);
    }

    if let Err(err) = run_simulation(&inputfile, &outputfile, to_stdout, config) {
        log::error!("{}", err);
        eprintln!("quadsched: {}", err);
        std::process::exit(1);
    }
}

fn valid_number(value: &str) -> Result<(), String> {
    value
        .parse::<u64>()
        .map(|_| ())
        .map_err(|_| format!("not a number: {}", value))
}

fn numeric_arg(matches: &clap::ArgMatches, name: &str) -> Option<u64> {
    // Validated by clap already, so the parse cannot fail here.
    matches.value_of(name).and_then(|v| v.parse().ok())
}

fn run_simulation(
    inputfile: &str,
    outputfile: &str,
    to_stdout: bool,
    mut config: SimConfig,
) -> Result<(), SimError> {
    let records = source::read_process_file(Path::new(inputfile))?;
    log::info!("loaded {} processes from {}", records.len(), inputfile);

    // A well-formed input must never overflow a queue.
    config.queue_capacity = config.queue_capacity.max(records.len());

    let mut engine = DispatchEngine::new(records, &config);
    let mut sink: Box<dyn TraceSink> = if to_stdout {
        Box::new(ConsoleSink)
    } else {
        Box::new(FileSink::create(Path::new(outputfile))?)
    };

    if to_stdout {
        // Periodic reports would interleave with the trace on the
        // console, so stdout mode runs straight through.
        engine.run(sink.as_mut())?;
    } else {
        while !engine.is_done() {
            let tick = engine.step(sink.as_mut())?;
            if tick % config.snapshot_every == 0 {
                print_queue_report(tick, &engine);
            }
        }
    }

    // Final per-queue report behind the trace, mirroring the console
    // format.
    for (queue_id, names) in engine.queue_report() {
        sink.write_line(&format!(
            "{} {} -> {}",
            queue_id.serviced_by(),
            queue_id.label(),
            names.join(" ")
        ))?;
    }
    sink.flush()?;

    if to_stdout {
        log::info!("simulation finished after {} ticks", engine.clock());
    } else {
        log::info!(
            "simulation finished after {} ticks, trace written to {}",
            engine.clock(),
            outputfile
        );
    }
    Ok(())
}

fn print_queue_report(tick: u64, engine: &DispatchEngine) {
    println!("Time: {}", tick);
    for (queue_id, names) in engine.queue_report() {
        println!(
            "{} {} -> {}",
            queue_id.serviced_by(),
            queue_id.label(),
            names.join(" ")
        );
    }
    println!();
}
