//! Backtracking packer
//!
//! The search places shape instances strictly in the region's order. For
//! each instance it walks anchors in row-major order and, per anchor, the
//! shape's orientations in generation order. A legal placement is made, the
//! next instance is attempted, and the placement is undone if that fails.

use crate::budget::{BudgetExhausted, Limiter, SearchBudget};
use crate::error::PackError;
use crate::grid::{Anchor, Grid};
use crate::region::Region;
use crate::shape::{Orientation, ShapeId, ShapeSet};

/// Orientations of every shape, computed once and shared read-only
///
/// The table is `Sync`, so one instance can back packers on many threads.
#[derive(Debug, Clone, Default)]
pub struct OrientationTable {
    orientations: Vec<Option<Vec<Orientation>>>,
}

impl OrientationTable {
    pub fn new(shapes: &ShapeSet) -> Self {
        let mut orientations = vec![None; shapes.id_bound()];
        for shape in shapes.iter() {
            orientations[shape.id().0] = Some(shape.orientations());
        }
        Self { orientations }
    }

    /// Orientations of `id` in generation order
    pub fn get(&self, id: ShapeId) -> Option<&[Orientation]> {
        self.orientations.get(id.0)?.as_deref()
    }

    /// Cell count of `id`
    pub fn area(&self, id: ShapeId) -> Option<usize> {
        self.get(id)?.first().map(Orientation::len)
    }
}

/// Counters describing the work a solve performed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Placement attempts (anchor × orientation), legal or not
    pub placements_tried: u64,
    /// Legal placements made
    pub placements_made: u64,
    /// Placements undone after a dead end
    pub backtracks: u64,
}

/// One placed shape instance in a witness packing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Position of the instance in the region's shape sequence
    pub piece: usize,
    pub shape: ShapeId,
    /// Index into the shape's orientation list
    pub orientation: usize,
    pub anchor: Anchor,
}

/// A complete packing found by the search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packing {
    grid: Grid,
    placements: Vec<Placement>,
}

impl Packing {
    /// Witness grid; each occupied cell holds its piece index
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Placements in piece order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Shape of the piece covering `(row, col)`
    pub fn shape_at(&self, row: usize, col: usize) -> Option<ShapeId> {
        let piece = self.grid.occupant(row, col)?;
        self.placements.get(piece).map(|p| p.shape)
    }

    /// Render the witness with one base-36 digit per shape ID
    pub fn render(&self) -> String {
        self.grid.render(|piece| {
            let shape = self.placements[piece].shape.0;
            char::from_digit((shape % 36) as u32, 36).unwrap_or('?')
        })
    }
}

/// Terminal state of one solve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackOutcome {
    /// Every instance was placed
    Packed(Packing),
    /// The search space was exhausted without a packing
    Unsolvable,
    /// The budget ran out before a verdict was reached
    Undetermined(BudgetExhausted),
}

impl PackOutcome {
    pub fn is_packed(&self) -> bool {
        matches!(self, PackOutcome::Packed(_))
    }

    /// `Some(verdict)` when the search reached one, `None` when undetermined
    pub fn verdict(&self) -> Option<bool> {
        match self {
            PackOutcome::Packed(_) => Some(true),
            PackOutcome::Unsolvable => Some(false),
            PackOutcome::Undetermined(_) => None,
        }
    }

    pub fn packing(&self) -> Option<&Packing> {
        match self {
            PackOutcome::Packed(packing) => Some(packing),
            _ => None,
        }
    }
}

/// Outcome of a solve together with its work counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    pub outcome: PackOutcome,
    pub stats: SolveStats,
}

/// Decides whether a region's shape instances fit into its grid
///
/// # Example
///
/// ```
/// use region_packer::{OrientationTable, Packer, Puzzle};
///
/// let puzzle = Puzzle::parse("0:\n#.\n##\n\n3x2: 2\n").unwrap();
/// let table = OrientationTable::new(puzzle.shapes());
/// let packer = Packer::new(&table);
///
/// let report = packer.solve(&puzzle.regions()[0]).unwrap();
/// assert!(report.outcome.is_packed());
/// ```
#[derive(Debug, Clone)]
pub struct Packer<'t> {
    table: &'t OrientationTable,
    budget: SearchBudget,
}

impl<'t> Packer<'t> {
    /// Create a packer with an unlimited budget
    pub fn new(table: &'t OrientationTable) -> Self {
        Self {
            table,
            budget: SearchBudget::unlimited(),
        }
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn budget(&self) -> &SearchBudget {
        &self.budget
    }

    /// Solve one region
    ///
    /// Regions whose required cells exceed the grid area are rejected before
    /// any placement is attempted.
    ///
    /// # Returns
    /// * `Ok(SolveReport)` - the outcome and work counters
    /// * `Err(PackError::UnknownShape)` - the region needs a shape missing from the table
    pub fn solve(&self, region: &Region) -> Result<SolveReport, PackError> {
        let runs = region
            .runs()
            .iter()
            .map(|&(id, count)| {
                self.table
                    .get(id)
                    .map(|orientations| (id, orientations, count))
                    .ok_or(PackError::UnknownShape(id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let required = runs.iter().fold(0usize, |total, (_, orientations, count)| {
            total.saturating_add(orientations[0].len().saturating_mul(*count))
        });
        if required > region.area() {
            return Ok(SolveReport {
                outcome: PackOutcome::Unsolvable,
                stats: SolveStats::default(),
            });
        }

        // Every instance covers at least one cell, so this is bounded by the area
        let pieces: Vec<_> = runs
            .into_iter()
            .flat_map(|(id, orientations, count)| std::iter::repeat_n((id, orientations), count))
            .collect();

        let mut search = Search {
            grid: Grid::new(region.width(), region.height()),
            placements: Vec::with_capacity(pieces.len()),
            pieces,
            stats: SolveStats::default(),
            limiter: self.budget.start(),
        };

        let outcome = match search.place_from(0) {
            Ok(true) => PackOutcome::Packed(Packing {
                grid: search.grid,
                placements: search.placements,
            }),
            Ok(false) => PackOutcome::Unsolvable,
            Err(reason) => PackOutcome::Undetermined(reason),
        };

        Ok(SolveReport {
            outcome,
            stats: search.stats,
        })
    }
}

/// Yes/no packing check with an unlimited budget
pub fn can_pack(shapes: &ShapeSet, region: &Region) -> Result<bool, PackError> {
    let table = OrientationTable::new(shapes);
    let report = Packer::new(&table).solve(region)?;
    Ok(report.outcome.is_packed())
}

/// Mutable state of one depth-first search
struct Search<'a> {
    grid: Grid,
    pieces: Vec<(ShapeId, &'a [Orientation])>,
    placements: Vec<Placement>,
    stats: SolveStats,
    limiter: Limiter<'a>,
}

impl Search<'_> {
    /// Place piece `index` and everything after it
    ///
    /// `Ok(true)` leaves the full packing on the grid. `Ok(false)` and
    /// `Err(_)` leave the grid exactly as it was on entry.
    fn place_from(&mut self, index: usize) -> Result<bool, BudgetExhausted> {
        let Some(&(shape, orientations)) = self.pieces.get(index) else {
            return Ok(true);
        };

        for row in 0..self.grid.height() {
            for col in 0..self.grid.width() {
                let anchor = Anchor::new(row, col);
                for (orientation_index, orientation) in orientations.iter().enumerate() {
                    self.limiter.check(self.stats.placements_tried)?;
                    self.stats.placements_tried += 1;

                    if !self.grid.can_place(orientation, anchor) {
                        continue;
                    }

                    self.grid.place(orientation, anchor, index);
                    self.placements.push(Placement {
                        piece: index,
                        shape,
                        orientation: orientation_index,
                        anchor,
                    });
                    self.stats.placements_made += 1;

                    let result = self.place_from(index + 1);
                    if let Ok(true) = result {
                        return result;
                    }

                    self.placements.pop();
                    self.grid.remove(orientation, anchor);
                    self.stats.backtracks += 1;
                    result?;
                }
            }
        }

        Ok(false)
    }
}
