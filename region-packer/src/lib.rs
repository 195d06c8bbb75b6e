//! Region Packer Library
//!
//! Decides whether a multiset of polyomino shapes can be packed, without
//! overlap and without leaving the grid, into a rectangular region.
//!
//! # Overview
//!
//! This library provides:
//! - Shapes and an orientation generator (rotations × reflections, deduplicated)
//! - A parser for the shape-block / region-line puzzle input
//! - A deterministic backtracking packer with an optional step, time and
//!   cancellation budget
//!
//! # Quick Example
//!
//! ```
//! use region_packer::{OrientationTable, Packer, PackOutcome, Puzzle};
//!
//! let input = "\
//! 0:
//! #.
//! ###
//!
//! 3x2: 2
//! 3x3: 3
//! ";
//!
//! let puzzle = Puzzle::parse(input).unwrap();
//! let table = OrientationTable::new(puzzle.shapes());
//! let packer = Packer::new(&table);
//!
//! let verdicts: Vec<bool> = puzzle
//!     .regions()
//!     .iter()
//!     .map(|region| packer.solve(region).unwrap().outcome.is_packed())
//!     .collect();
//! assert_eq!(verdicts, vec![true, false]);
//! ```
//!
//! # Key Concepts
//!
//! ## Orientation Table
//!
//! [`OrientationTable`] holds the orientations of every shape. It is built
//! once per puzzle and only read afterwards, so it can be shared by packers
//! solving different regions on different threads.
//!
//! ## Outcomes
//!
//! [`Packer::solve`] returns a [`SolveReport`] whose [`PackOutcome`] is one of:
//! - **Packed**: a witness [`Packing`] with its grid and placements
//! - **Unsolvable**: the search space was exhausted
//! - **Undetermined**: the [`SearchBudget`] ran out first; this is never
//!   reported as unsolvable

mod budget;
mod error;
mod grid;
mod packer;
mod parser;
mod region;
mod shape;

// Re-export public API
pub use budget::{BudgetExhausted, SearchBudget};
pub use error::{PackError, ParseError};
pub use grid::{Anchor, Grid};
pub use packer::{
    OrientationTable, PackOutcome, Packer, Packing, Placement, SolveReport, SolveStats, can_pack,
};
pub use parser::Puzzle;
pub use region::Region;
pub use shape::{Cell, Orientation, Shape, ShapeId, ShapeSet, generate_orientations};
