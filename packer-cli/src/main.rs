//! Packer CLI - decide which regions can fit all of their required presents

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod output;

use chrono::Utc;
use clap::Parser;
use cli::Args;
use config::Config;
use error::{ArcExecutorError, CliError};
use executor::{Executor, WorkItem};
use input::InputFile;
use output::OutputFormatter;
use region_packer::Puzzle;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    let formatter = OutputFormatter::new(config.quiet, config.show_grid);

    let input = InputFile::new(config.input_path.clone()).read()?;

    let parse_start = Utc::now();
    let puzzle = Puzzle::parse(&input)?;
    let parse_duration = Utc::now() - parse_start;

    let region_count = puzzle.regions().len();
    formatter.print_header(puzzle.shapes().len(), region_count, parse_duration);

    // Filters beyond the input are reported but not fatal
    for &index in config.region_filter.iter().filter(|&&i| i >= region_count) {
        eprintln!(
            "Warning: region {} requested but the input has only {} regions",
            index + 1,
            region_count
        );
    }

    let (shapes, regions) = puzzle.into_parts();
    let executor = Executor::new(&shapes, regions, &config).map_err(ArcExecutorError::from)?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No regions to solve.");
        return Ok(());
    }

    run_executor(executor, work_items, &formatter)
}

/// Run the executor and print results in region order
fn run_executor(
    executor: Executor,
    work_items: Vec<WorkItem>,
    formatter: &OutputFormatter,
) -> Result<(), CliError> {
    let region_count = executor.region_count();
    let expected: Vec<usize> = work_items.iter().map(|w| w.index).collect();

    let (tx, rx) = std::sync::mpsc::channel();

    // Run executor in background thread
    let executor_handle = std::thread::spawn(move || executor.execute(work_items, tx));

    let mut results = Vec::with_capacity(expected.len());
    let mut aggregator = aggregator::ResultAggregator::new(expected);

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready, region_count);
            results.push(ready);
        }
    }

    // Drain any remaining buffered results (shouldn't happen if all results arrived)
    for ready in aggregator.drain() {
        formatter.print_result(&ready, region_count);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        eprintln!("Warning: Not all expected results were received");
    }

    let outcome = executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))?;

    // Failed regions still count towards the summary before the run errors out
    formatter.print_summary(&results);

    outcome.map_err(CliError::Executor)
}
