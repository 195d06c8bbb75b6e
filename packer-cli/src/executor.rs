//! Parallel executor for solving regions

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use chrono::{TimeDelta, Utc};
use rayon::prelude::*;
use region_packer::{
    OrientationTable, PackError, PackOutcome, Packer, Region, SearchBudget, ShapeSet, SolveStats,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

/// Result from a single region solve
#[derive(Debug)]
pub struct RegionResult {
    /// 0-based position of the region in the input
    pub index: usize,
    pub width: usize,
    pub height: usize,
    /// Number of shape instances the region requires
    pub pieces: usize,
    pub outcome: Result<PackOutcome, PackError>,
    pub stats: SolveStats,
    pub solve_duration: TimeDelta,
}

/// Work item representing a region to solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    pub index: usize,
}

/// Parallel executor for solving regions
pub struct Executor {
    regions: Vec<Region>,
    table: OrientationTable,
    budget: SearchBudget,
    cancel: Arc<AtomicBool>,
    parallelize_by: ParallelizeBy,
    region_filter: Vec<usize>,
    verbose: bool,
    thread_pool: rayon::ThreadPool,
}

impl Executor {
    /// Create a new executor for the given shapes and regions
    pub fn new(
        shapes: &ShapeSet,
        regions: Vec<Region>,
        config: &Config,
    ) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        let cancel = Arc::new(AtomicBool::new(false));

        Ok(Self {
            regions,
            table: OrientationTable::new(shapes),
            budget: config.search_budget(Arc::clone(&cancel)),
            cancel,
            parallelize_by: config.parallelize_by,
            region_filter: config.region_filter.clone(),
            verbose: config.verbose,
            thread_pool,
        })
    }

    /// Total number of regions in the puzzle
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Collect work items in input order, honouring the region filter
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        (0..self.regions.len())
            .filter(|index| self.region_filter.is_empty() || self.region_filter.contains(index))
            .map(|index| WorkItem { index })
            .collect()
    }

    /// Execute work items and send results to channel
    ///
    /// Every result is sent, including failed ones; failures are also
    /// returned, combined across workers.
    pub fn execute(
        &self,
        work_items: Vec<WorkItem>,
        tx: Sender<RegionResult>,
    ) -> Result<(), ArcExecutorError> {
        match self.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = self.run_region(work, &tx) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Region => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items on the thread pool, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<RegionResult>,
    ) -> Result<(), ArcExecutorError> {
        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| self.run_region(work, tx).err())
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                    (None, e2) => e2,
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }

    /// Solve one region and send its result
    fn run_region(&self, work: WorkItem, tx: &Sender<RegionResult>) -> Result<(), ArcExecutorError> {
        let region = &self.regions[work.index];

        if self.verbose {
            eprintln!(
                "Starting region {}/{}: {} with {} shapes...",
                work.index + 1,
                self.regions.len(),
                region,
                region.piece_count()
            );
        }

        let packer = Packer::new(&self.table).with_budget(self.budget.clone());
        let solve_start = Utc::now();
        let report = packer.solve(region);
        let solve_duration = Utc::now() - solve_start;

        let (outcome, stats) = match report {
            Ok(report) => (Ok(report.outcome), report.stats),
            Err(e) => (Err(e), SolveStats::default()),
        };

        let failure = outcome.as_ref().err().map(|source| ExecutorError::Region {
            region: work.index + 1,
            source: source.clone(),
        });

        let result = RegionResult {
            index: work.index,
            width: region.width(),
            height: region.height(),
            pieces: region.piece_count(),
            outcome,
            stats,
            solve_duration,
        };

        tx.send(result).map_err(|_| {
            // Nobody is listening any more; stop the remaining searches
            self.cancel.store(true, Ordering::Relaxed);
            ArcExecutorError::from(ExecutorError::ChannelSend)
        })?;

        failure.map_or(Ok(()), |e| Err(e.into()))
    }
}
