//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Scheduling mode for region solving
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; solve regions one after another in input order
    Sequential,
    /// Solve independent regions concurrently on the thread pool (default)
    #[default]
    Region,
}

/// Present packing checker
#[derive(Parser, Debug)]
#[command(
    name = "packer",
    about = "Check which regions can fit all of their required presents",
    version
)]
pub struct Args {
    /// Puzzle input file
    pub input: PathBuf,

    /// Regions to solve, 1-based (solves all regions if omitted)
    #[arg(short, long, value_delimiter = ',', value_parser = clap::value_parser!(u32).range(1..))]
    pub region: Vec<u32>,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential or region
    #[arg(long, value_enum, default_value = "region")]
    pub parallelize_by: ParallelizeBy,

    /// Maximum placement attempts per region before giving up
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// Time limit per region, e.g. "500ms" or "2s" (falls back to PACKER_TIMEOUT)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Print the witness grid of every packed region
    #[arg(long)]
    pub show_grid: bool,

    /// Report each region as it starts
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode - only output the answer
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
