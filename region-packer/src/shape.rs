//! Polyomino shapes and the orientation generator

use crate::error::PackError;
use itertools::Itertools;
use std::collections::HashSet;
use std::fmt;

/// Identifier of a shape, as declared by its `<id>:` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub usize);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cell offset relative to a shape's local origin
///
/// Ordering is by row, then column, which is the canonical order of
/// cells inside an [`Orientation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Horizontal mirror: `(row, col) -> (row, -col)`
    fn mirrored(self) -> Self {
        Self::new(self.row, -self.col)
    }

    /// Quarter turn counterclockwise: `(row, col) -> (-col, row)`
    fn rotated(self) -> Self {
        Self::new(-self.col, self.row)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// A rotation/reflection of a shape, shifted so that its minimum row and
/// minimum column are both zero, with cells sorted by `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Orientation {
    cells: Vec<Cell>,
    height: usize,
    width: usize,
}

impl Orientation {
    fn normalized(mut cells: Vec<Cell>) -> Self {
        let min_row = cells.iter().map(|c| c.row).min().unwrap_or(0);
        let min_col = cells.iter().map(|c| c.col).min().unwrap_or(0);
        for cell in &mut cells {
            cell.row -= min_row;
            cell.col -= min_col;
        }
        cells.sort_unstable();

        let height = cells.iter().map(|c| c.row as usize + 1).max().unwrap_or(0);
        let width = cells.iter().map(|c| c.col as usize + 1).max().unwrap_or(0);
        Self {
            cells,
            height,
            width,
        }
    }

    /// Cells of this orientation, sorted by `(row, col)`
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Height of the bounding box
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of the bounding box
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canonical key of the form `r0,c0;r1,c1;...`
    pub fn key(&self) -> String {
        self.cells
            .iter()
            .map(|c| format!("{},{}", c.row, c.col))
            .join(";")
    }
}

/// Generate every geometrically distinct orientation of a cell set
///
/// Enumerates rotations 0..4 (outer) and mirror off/on (inner), mirroring
/// before rotating. The first occurrence of each canonical key is kept, so
/// the result order is fully deterministic and the identity orientation
/// always comes first.
///
/// An empty cell list yields an empty result; [`Shape::new`] rejects empty
/// shapes before they can get here.
pub fn generate_orientations(cells: &[Cell]) -> Vec<Orientation> {
    if cells.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut orientations = Vec::with_capacity(8);

    for rotation in 0..4 {
        for mirror in [false, true] {
            let transformed = cells
                .iter()
                .map(|&cell| {
                    let cell = if mirror { cell.mirrored() } else { cell };
                    (0..rotation).fold(cell, |c, _| c.rotated())
                })
                .collect();
            let orientation = Orientation::normalized(transformed);
            if seen.insert(orientation.key()) {
                orientations.push(orientation);
            }
        }
    }

    orientations
}

/// Whether a character in a shape row marks an occupied cell
pub(crate) fn is_occupied(ch: char) -> bool {
    ch != '.' && !ch.is_whitespace()
}

/// A polyomino footprint with its identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    id: ShapeId,
    cells: Vec<Cell>,
}

impl Shape {
    /// Build a shape from its cell offsets
    ///
    /// # Returns
    /// * `Err(PackError::EmptyShape)` - no cells were given
    /// * `Err(PackError::DuplicateCell)` - a cell appears twice
    pub fn new(id: ShapeId, cells: impl IntoIterator<Item = Cell>) -> Result<Self, PackError> {
        let cells: Vec<Cell> = cells.into_iter().collect();
        if cells.is_empty() {
            return Err(PackError::EmptyShape(id));
        }
        if let Some(dup) = cells.iter().duplicates().next() {
            return Err(PackError::DuplicateCell {
                shape: id,
                row: dup.row,
                col: dup.col,
            });
        }
        Ok(Self { id, cells })
    }

    /// Build a shape from picture rows such as `"##."`
    ///
    /// `.` and whitespace are empty cells, any other character is occupied.
    pub fn from_rows<S: AsRef<str>>(id: ShapeId, rows: &[S]) -> Result<Self, PackError> {
        let cells = rows.iter().enumerate().flat_map(|(row, line)| {
            line.as_ref()
                .chars()
                .enumerate()
                .filter(|&(_, ch)| is_occupied(ch))
                .map(move |(col, _)| Cell::new(row as i32, col as i32))
                .collect::<Vec<_>>()
        });
        Self::new(id, cells)
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Cells in declaration order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells, equal for every orientation
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// All distinct orientations of this shape
    pub fn orientations(&self) -> Vec<Orientation> {
        generate_orientations(&self.cells)
    }
}

/// Shape dictionary stored densely by [`ShapeId`]
///
/// IDs are small contiguous integers in practice; undeclared IDs are holes.
/// IDs above [`ShapeSet::MAX_ID`] are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeSet {
    shapes: Vec<Option<Shape>>,
}

impl ShapeSet {
    /// Largest shape ID the set accepts
    pub const MAX_ID: usize = u16::MAX as usize;

    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from shapes, rejecting duplicate IDs
    pub fn from_shapes(shapes: impl IntoIterator<Item = Shape>) -> Result<Self, PackError> {
        shapes.into_iter().try_fold(Self::new(), |mut set, shape| {
            set.insert(shape)?;
            Ok(set)
        })
    }

    /// Add a shape
    ///
    /// Returns `Err(PackError::DuplicateShape)` if the ID is already taken and
    /// `Err(PackError::ShapeIdTooLarge)` if it exceeds [`ShapeSet::MAX_ID`].
    pub fn insert(&mut self, shape: Shape) -> Result<(), PackError> {
        let index = shape.id.0;
        if index > Self::MAX_ID {
            return Err(PackError::ShapeIdTooLarge(shape.id));
        }
        if index >= self.shapes.len() {
            self.shapes.resize(index + 1, None);
        }
        let slot = &mut self.shapes[index];
        if slot.is_some() {
            return Err(PackError::DuplicateShape(shape.id));
        }
        *slot = Some(shape);
        Ok(())
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)?.as_ref()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    /// Declared shapes in ascending ID order
    pub fn iter(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.shapes.iter().flatten()
    }

    /// Number of declared shapes
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.iter().all(Option::is_none)
    }

    /// One past the largest ID slot
    pub fn id_bound(&self) -> usize {
        self.shapes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[(i32, i32)]) -> Vec<Cell> {
        raw.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn test_from_rows_reads_occupied_cells() {
        let shape = Shape::from_rows(ShapeId(0), &["###", "##.", "##."]).unwrap();

        assert_eq!(shape.area(), 7);
        for expected in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (2, 0), (2, 1)] {
            assert!(shape.cells().contains(&Cell::from(expected)));
        }
    }

    #[test]
    fn test_from_rows_any_marker_counts() {
        let shape = Shape::from_rows(ShapeId(3), &["a b", "  X"]).unwrap();
        assert_eq!(shape.cells(), cells(&[(0, 0), (0, 2), (1, 2)]).as_slice());
    }

    #[test]
    fn test_empty_shape_rejected() {
        assert_eq!(
            Shape::new(ShapeId(1), Vec::new()),
            Err(PackError::EmptyShape(ShapeId(1)))
        );
        assert_eq!(
            Shape::from_rows(ShapeId(2), &["...", ".."]),
            Err(PackError::EmptyShape(ShapeId(2)))
        );
    }

    #[test]
    fn test_duplicate_cell_rejected() {
        let result = Shape::new(ShapeId(0), cells(&[(0, 0), (0, 1), (0, 0)]));
        assert_eq!(
            result,
            Err(PackError::DuplicateCell {
                shape: ShapeId(0),
                row: 0,
                col: 0
            })
        );
    }

    #[test]
    fn test_l_tromino_orientations() {
        let orientations = generate_orientations(&cells(&[(0, 0), (1, 0), (1, 1)]));

        // The mirror image of an L-tromino is one of its rotations
        assert_eq!(orientations.len(), 4);
        assert!(orientations.iter().all(|o| o.len() == 3));
        assert_eq!(orientations[0].key(), "0,0;1,0;1,1");
    }

    #[test]
    fn test_symmetric_shapes_collapse() {
        let monomino = generate_orientations(&cells(&[(0, 0)]));
        assert_eq!(monomino.len(), 1);

        let square = generate_orientations(&cells(&[(0, 0), (0, 1), (1, 0), (1, 1)]));
        assert_eq!(square.len(), 1);

        let bar = generate_orientations(&cells(&[(0, 0), (0, 1), (0, 2)]));
        assert_eq!(bar.len(), 2);
        assert_eq!(bar[1].key(), "0,0;1,0;2,0");

        let tee = generate_orientations(&cells(&[(0, 0), (0, 1), (0, 2), (1, 1)]));
        assert_eq!(tee.len(), 4);
    }

    #[test]
    fn test_asymmetric_shape_has_eight_orientations() {
        let shape = Shape::from_rows(ShapeId(0), &["###", "##.", "##."]).unwrap();
        assert_eq!(shape.orientations().len(), 8);
    }

    #[test]
    fn test_orientation_normalizes_negative_offsets() {
        let orientations = generate_orientations(&cells(&[(-3, 5), (-2, 5), (-2, 6)]));
        let first = &orientations[0];

        assert_eq!(first.cells(), cells(&[(0, 0), (1, 0), (1, 1)]).as_slice());
        assert_eq!((first.height(), first.width()), (2, 2));
    }

    #[test]
    fn test_empty_cells_yield_no_orientations() {
        assert!(generate_orientations(&[]).is_empty());
    }

    #[test]
    fn test_shape_set_dense_lookup() {
        let mut set = ShapeSet::new();
        set.insert(Shape::new(ShapeId(2), cells(&[(0, 0)])).unwrap())
            .unwrap();
        set.insert(Shape::new(ShapeId(0), cells(&[(0, 0), (0, 1)])).unwrap())
            .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.id_bound(), 3);
        assert!(set.contains(ShapeId(0)));
        assert!(!set.contains(ShapeId(1)));
        assert!(!set.contains(ShapeId(7)));
        assert_eq!(
            set.iter().map(Shape::id).collect::<Vec<_>>(),
            vec![ShapeId(0), ShapeId(2)]
        );
    }

    #[test]
    fn test_shape_set_rejects_duplicate_id() {
        let shape = Shape::new(ShapeId(1), cells(&[(0, 0)])).unwrap();
        let result = ShapeSet::from_shapes([shape.clone(), shape]);
        assert_eq!(result, Err(PackError::DuplicateShape(ShapeId(1))));
    }

    #[test]
    fn test_shape_set_rejects_huge_id() {
        let mut set = ShapeSet::new();
        for id in [ShapeSet::MAX_ID + 1, 1_000_000_000, usize::MAX] {
            let shape = Shape::new(ShapeId(id), cells(&[(0, 0)])).unwrap();
            assert_eq!(set.insert(shape), Err(PackError::ShapeIdTooLarge(ShapeId(id))));
        }
        assert_eq!(set.id_bound(), 0);

        let shape = Shape::new(ShapeId(ShapeSet::MAX_ID), cells(&[(0, 0)])).unwrap();
        assert_eq!(set.insert(shape), Ok(()));
        assert_eq!(set.id_bound(), ShapeSet::MAX_ID + 1);
    }
}
