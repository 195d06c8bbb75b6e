//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use itertools::Itertools;
use region_packer::SearchBudget;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// Environment variable consulted when `--timeout` is not given
pub const TIMEOUT_ENV: &str = "PACKER_TIMEOUT";

/// Resolved runtime configuration
pub struct Config {
    /// Input file path
    pub input_path: PathBuf,
    /// 0-based region indices to solve (empty = all regions)
    pub region_filter: Vec<usize>,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Step limit per region
    pub max_steps: Option<u64>,
    /// Time limit per region
    pub timeout: Option<Duration>,
    /// Print witness grids
    pub show_grid: bool,
    /// Per-region progress on stderr
    pub verbose: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args, resolving paths, threads and limits
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let input_path = expand_tilde(&args.input);

        let thread_count = args.threads.unwrap_or_else(num_cpus);
        if thread_count == 0 {
            return Err(CliError::Config(
                "Thread count must be at least 1".to_string(),
            ));
        }

        let timeout = resolve_timeout(args.timeout, std::env::var(TIMEOUT_ENV).ok())?;

        let region_filter = args
            .region
            .iter()
            .map(|&r| r as usize - 1)
            .sorted_unstable()
            .dedup()
            .collect();

        Ok(Config {
            input_path,
            region_filter,
            thread_count,
            parallelize_by: args.parallelize_by,
            max_steps: args.max_steps,
            timeout,
            show_grid: args.show_grid,
            verbose: args.verbose,
            quiet: args.quiet,
        })
    }

    /// Search budget for one region, tied to the run's cancellation flag
    pub fn search_budget(&self, cancel: Arc<AtomicBool>) -> SearchBudget {
        let mut budget = SearchBudget::unlimited().with_cancel_flag(cancel);
        if let Some(steps) = self.max_steps {
            budget = budget.with_max_steps(steps);
        }
        if let Some(timeout) = self.timeout {
            budget = budget.with_timeout(timeout);
        }
        budget
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && let Some(home) = dirs::home_dir()
    {
        if path_str == "~" {
            return home;
        }
        if let Some(rest) = path_str.strip_prefix("~/") {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Resolve the time limit: CLI flag first, then the environment value
fn resolve_timeout(
    provided: Option<Duration>,
    env_value: Option<String>,
) -> Result<Option<Duration>, CliError> {
    match (provided, env_value) {
        (Some(timeout), _) => Ok(Some(timeout)),
        (None, Some(raw)) if !raw.trim().is_empty() => humantime::parse_duration(raw.trim())
            .map(Some)
            .map_err(|e| CliError::Config(format!("Invalid {}: {}", TIMEOUT_ENV, e))),
        (None, _) => Ok(None),
    }
}
