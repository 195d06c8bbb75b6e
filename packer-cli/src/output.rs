//! Output formatting for region results

use crate::executor::RegionResult;
use chrono::TimeDelta;
use itertools::Itertools;
use region_packer::{PackOutcome, Packing};

/// Output formatter for region results
pub struct OutputFormatter {
    quiet: bool,
    show_grid: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool, show_grid: bool) -> Self {
        Self {
            quiet,
            show_grid,
            start_time: std::time::Instant::now(),
        }
    }

    /// Print what was parsed from the input
    pub fn print_header(&self, shape_count: usize, region_count: usize, parse_duration: TimeDelta) {
        if self.quiet {
            return;
        }
        println!(
            "Parsed {} shapes and {} regions (parse: {})",
            shape_count,
            region_count,
            format_duration(parse_duration)
        );
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &RegionResult, region_count: usize) {
        // Quiet runs report failures once, through the executor error
        if self.quiet {
            return;
        }

        let prefix = format!(
            "Region {}/{} ({}x{}, {} shapes)",
            result.index + 1,
            region_count,
            result.width,
            result.height,
            result.pieces
        );

        match &result.outcome {
            Ok(outcome) => {
                println!(
                    "{}: {} (solve: {}, {} placements tried)",
                    prefix,
                    format_outcome(outcome),
                    format_duration(result.solve_duration),
                    result.stats.placements_tried
                );
                if self.show_grid
                    && let Some(packing) = outcome.packing()
                {
                    print!("{}", format_packing(packing));
                }
            }
            Err(e) => eprintln!("{}: Error - {}", prefix, e),
        }
    }

    /// Print a summary after all results
    /// Shows both total solve time (sum of durations) and actual elapsed wall-clock time
    pub fn print_summary(&self, results: &[RegionResult]) {
        let (report, warning) = self.render_summary(results, self.start_time.elapsed());
        print!("{}", report);
        if let Some(warning) = warning {
            eprintln!("Warning: {}", warning);
        }
    }

    /// Summary text for stdout plus the budget warning destined for stderr
    ///
    /// Quiet mode reduces stdout to the answer; the warning is returned in
    /// both modes.
    fn render_summary(
        &self,
        results: &[RegionResult],
        elapsed_time: std::time::Duration,
    ) -> (String, Option<String>) {
        let summary = Summary::from_results(results);
        let warning = summary.budget_warning();

        if self.quiet {
            return (format!("{}\n", summary.packed), warning);
        }

        let mut lines = vec![
            String::new(),
            "--- Summary ---".to_string(),
            format!(
                "Regions: {} packed, {} unsolvable, {} undetermined, {} failed",
                summary.packed, summary.unsolvable, summary.undetermined, summary.failed
            ),
            format!("Placements tried: {}", summary.placements_tried),
            format!("Total solve time: {}", format_duration(summary.solve_time)),
            format!(
                "Elapsed wall-clock time: {}",
                format_std_duration(elapsed_time)
            ),
        ];
        if !elapsed_time.is_zero() {
            let total_solve_secs =
                summary.solve_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            let speedup = total_solve_secs / elapsed_time.as_secs_f64();
            lines.push(format!("Speedup factor: {:.2}x", speedup));
        }
        lines.push(format!(
            "Answer: {} of {} regions can fit all required presents",
            summary.packed,
            results.len()
        ));

        (lines.iter().map(|line| format!("{}\n", line)).join(""), warning)
    }
}

/// Verdict counts over a run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub packed: usize,
    pub unsolvable: usize,
    pub undetermined: usize,
    pub failed: usize,
    pub placements_tried: u64,
    pub solve_time: TimeDelta,
}

impl Summary {
    /// Warning shown whenever a search budget ran out
    pub fn budget_warning(&self) -> Option<String> {
        (self.undetermined > 0).then(|| {
            format!(
                "{} region(s) hit the search budget; the answer is a lower bound",
                self.undetermined
            )
        })
    }

    pub fn from_results(results: &[RegionResult]) -> Self {
        results.iter().fold(Summary::default(), |mut summary, result| {
            match &result.outcome {
                Ok(PackOutcome::Packed(_)) => summary.packed += 1,
                Ok(PackOutcome::Unsolvable) => summary.unsolvable += 1,
                Ok(PackOutcome::Undetermined(_)) => summary.undetermined += 1,
                Err(_) => summary.failed += 1,
            }
            summary.placements_tried += result.stats.placements_tried;
            summary.solve_time += result.solve_duration;
            summary
        })
    }
}

fn format_outcome(outcome: &PackOutcome) -> String {
    match outcome {
        PackOutcome::Packed(_) => "YES".to_string(),
        PackOutcome::Unsolvable => "NO".to_string(),
        PackOutcome::Undetermined(reason) => format!("UNDETERMINED ({})", reason),
    }
}

/// Witness grid followed by a legend of the shapes it uses
fn format_packing(packing: &Packing) -> String {
    let legend = packing
        .placements()
        .iter()
        .map(|p| p.shape)
        .unique()
        .sorted()
        .map(|id| {
            let symbol = char::from_digit((id.0 % 36) as u32, 36).unwrap_or('?');
            format!("  {} = Shape {}", symbol, id)
        })
        .join("\n");
    format!("{}{}\n", packing.render(), legend)
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use region_packer::{
        BudgetExhausted, OrientationTable, PackError, Packer, Puzzle, ShapeId, SolveStats,
    };

    fn result(index: usize, outcome: Result<PackOutcome, PackError>, tried: u64) -> RegionResult {
        RegionResult {
            index,
            width: 3,
            height: 2,
            pieces: 2,
            outcome,
            stats: SolveStats {
                placements_tried: tried,
                ..SolveStats::default()
            },
            solve_duration: TimeDelta::milliseconds(2),
        }
    }

    fn packing_outcome() -> PackOutcome {
        PackOutcome::Packed(packing("0:\n#\n\n1x1: 1\n"))
    }

    fn packing(input: &str) -> Packing {
        let puzzle = Puzzle::parse(input).unwrap();
        let table = OrientationTable::new(puzzle.shapes());
        let report = Packer::new(&table).solve(&puzzle.regions()[0]).unwrap();
        match report.outcome {
            PackOutcome::Packed(packing) => packing,
            other => panic!("expected a packing, got {:?}", other),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::microseconds(250)), "250µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-40)), "-40µs");
    }

    #[test]
    fn test_format_std_duration() {
        assert_eq!(format_std_duration(Duration::from_micros(999)), "999µs");
        assert_eq!(format_std_duration(Duration::from_millis(12)), "12.00ms");
        assert_eq!(format_std_duration(Duration::from_secs(3)), "3.00s");
    }

    #[test]
    fn test_format_outcome() {
        assert_eq!(format_outcome(&PackOutcome::Unsolvable), "NO");
        assert_eq!(
            format_outcome(&PackOutcome::Undetermined(BudgetExhausted::Steps(5))),
            "UNDETERMINED (step limit of 5 reached)"
        );
    }

    #[test]
    fn test_format_packing_with_legend() {
        let packing = packing("0:\n#.\n##\n\n3x2: 2\n");
        assert_eq!(format_packing(&packing), "000\n000\n  0 = Shape 0\n");
    }

    #[test]
    fn test_legend_lists_each_shape_once() {
        let packing = packing("0:\n#\n\n1:\n##\n\n3x1: 1 1\n");
        let formatted = format_packing(&packing);

        assert!(formatted.ends_with("  0 = Shape 0\n  1 = Shape 1\n"));
        assert_eq!(formatted.lines().count(), 3);
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            result(0, Ok(PackOutcome::Unsolvable), 7),
            result(1, Ok(PackOutcome::Undetermined(BudgetExhausted::Cancelled)), 3),
            result(2, Err(PackError::UnknownShape(ShapeId(4))), 0),
            result(3, Ok(PackOutcome::Unsolvable), 0),
        ];

        let summary = Summary::from_results(&results);
        assert_eq!(
            summary,
            Summary {
                packed: 0,
                unsolvable: 2,
                undetermined: 1,
                failed: 1,
                placements_tried: 10,
                solve_time: TimeDelta::milliseconds(8),
            }
        );
    }

    #[test]
    fn test_quiet_summary_keeps_budget_warning() {
        let formatter = OutputFormatter::new(true, false);
        let results = vec![
            result(0, Ok(packing_outcome()), 4),
            result(1, Ok(PackOutcome::Undetermined(BudgetExhausted::Steps(3))), 3),
        ];

        let (report, warning) = formatter.render_summary(&results, Duration::from_millis(5));

        assert_eq!(report, "1\n");
        assert_eq!(
            warning.as_deref(),
            Some("1 region(s) hit the search budget; the answer is a lower bound")
        );
    }

    #[test]
    fn test_full_summary() {
        let formatter = OutputFormatter::new(false, false);
        let results = vec![
            result(0, Ok(packing_outcome()), 4),
            result(1, Ok(PackOutcome::Unsolvable), 9),
        ];

        let (report, warning) = formatter.render_summary(&results, Duration::ZERO);

        assert_eq!(warning, None);
        assert!(report.starts_with("\n--- Summary ---\n"));
        assert!(report.contains("Regions: 1 packed, 1 unsolvable, 0 undetermined, 0 failed\n"));
        assert!(report.contains("Placements tried: 13\n"));
        assert!(!report.contains("Speedup factor"));
        assert!(report.ends_with("Answer: 1 of 2 regions can fit all required presents\n"));
    }
}
