//! Occupancy grid mutated by the packer

use crate::shape::Orientation;
use itertools::Itertools;

/// Grid coordinate where an orientation's local `(0, 0)` is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Anchor {
    pub row: usize,
    pub col: usize,
}

impl Anchor {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A `width x height` grid where every occupied cell records the index of
/// the piece covering it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<usize>>,
}

impl Grid {
    /// Create an empty grid
    ///
    /// Panics if `width * height` overflows; [`Region`](crate::Region)
    /// dimensions never do.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Piece covering `(row, col)`, or `None` if empty or out of bounds
    pub fn occupant(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells[row * self.width + col]
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.occupant(row, col).is_some()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Flat indices covered by `orientation` at `anchor`, or `None` if any
    /// cell falls outside the grid
    fn footprint<'o>(
        &self,
        orientation: &'o Orientation,
        anchor: Anchor,
    ) -> Option<impl Iterator<Item = usize> + use<'o>> {
        // Orientations are normalized, so the bounding box is tight
        if anchor.row + orientation.height() > self.height
            || anchor.col + orientation.width() > self.width
        {
            return None;
        }
        let width = self.width;
        Some(orientation.cells().iter().map(move |cell| {
            (anchor.row + cell.row as usize) * width + anchor.col + cell.col as usize
        }))
    }

    /// Whether every cell of `orientation` at `anchor` is in bounds and free
    pub fn can_place(&self, orientation: &Orientation, anchor: Anchor) -> bool {
        self.footprint(orientation, anchor)
            .is_some_and(|mut cells| cells.all(|i| self.cells[i].is_none()))
    }

    /// Mark the cells of `orientation` at `anchor` as covered by `piece`
    ///
    /// Callers check [`Grid::can_place`] first.
    pub fn place(&mut self, orientation: &Orientation, anchor: Anchor, piece: usize) {
        let Some(cells) = self.footprint(orientation, anchor) else {
            return;
        };
        for i in cells {
            debug_assert!(self.cells[i].is_none(), "placing over an occupied cell");
            self.cells[i] = Some(piece);
        }
    }

    /// Clear the cells of `orientation` at `anchor`
    pub fn remove(&mut self, orientation: &Orientation, anchor: Anchor) {
        let Some(cells) = self.footprint(orientation, anchor) else {
            return;
        };
        for i in cells {
            self.cells[i] = None;
        }
    }

    /// Render the grid row by row, `.` for empty cells and `label(piece)`
    /// for occupied ones
    pub fn render(&self, label: impl Fn(usize) -> char) -> String {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', &label))
                    .collect::<String>()
            })
            .map(|row| row + "\n")
            .join("")
    }
}
