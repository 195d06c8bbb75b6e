//! Rectangular regions and the shape instances they must hold

use crate::error::PackError;
use crate::shape::{ShapeId, ShapeSet};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;

/// A `width x height` grid plus the ordered list of shape instances to place
///
/// The instance order is the order the packer attempts them in; it has no
/// geometric meaning. Consecutive copies of a shape are kept as one run, so a
/// region can ask for far more copies than it could ever hold without
/// materializing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    width: usize,
    height: usize,
    runs: Vec<(ShapeId, usize)>,
    piece_count: usize,
}

impl Region {
    /// Largest number of cells a region may have
    pub const MAX_AREA: usize = 1 << 24;

    /// Create a region from an explicit instance sequence
    ///
    /// Returns `Err(PackError::InvalidDimensions)` if either side is zero or
    /// the area exceeds [`Region::MAX_AREA`].
    pub fn new(
        width: usize,
        height: usize,
        shape_ids: impl IntoIterator<Item = ShapeId>,
    ) -> Result<Self, PackError> {
        let runs = shape_ids
            .into_iter()
            .dedup_with_count()
            .map(|(count, id)| (id, count))
            .collect();
        Self::from_runs(width, height, runs)
    }

    /// Create a region from positional counts
    ///
    /// `counts[k]` copies of shape `k` are added in ascending ID order, each
    /// shape's copies grouped together.
    pub fn from_counts(width: usize, height: usize, counts: &[usize]) -> Result<Self, PackError> {
        let runs = counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(id, &count)| (ShapeId(id), count))
            .collect();
        Self::from_runs(width, height, runs)
    }

    fn from_runs(
        width: usize,
        height: usize,
        runs: Vec<(ShapeId, usize)>,
    ) -> Result<Self, PackError> {
        let area = width.checked_mul(height).unwrap_or(usize::MAX);
        if width == 0 || height == 0 || area > Self::MAX_AREA {
            return Err(PackError::InvalidDimensions { width, height });
        }
        let piece_count = runs
            .iter()
            .try_fold(0usize, |total, &(_, count)| total.checked_add(count))
            .ok_or(PackError::TooManyPieces)?;
        Ok(Self {
            width,
            height,
            runs,
            piece_count,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of grid cells
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Shape instances in placement order
    pub fn shape_ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.runs
            .iter()
            .flat_map(|&(id, count)| std::iter::repeat_n(id, count))
    }

    /// Runs of consecutive identical instances as `(shape, copies)`
    pub fn runs(&self) -> &[(ShapeId, usize)] {
        &self.runs
    }

    /// Number of shape instances to place
    pub fn piece_count(&self) -> usize {
        self.piece_count
    }

    /// Copies required of each shape, in ascending ID order
    pub fn counts(&self) -> BTreeMap<ShapeId, usize> {
        let mut counts = BTreeMap::new();
        for &(id, count) in &self.runs {
            *counts.entry(id).or_default() += count;
        }
        counts
    }

    /// Total cells covered by all required instances, saturating at `usize::MAX`
    ///
    /// Returns `Err(PackError::UnknownShape)` for the first ID missing from `shapes`.
    pub fn required_cells(&self, shapes: &ShapeSet) -> Result<usize, PackError> {
        self.runs.iter().try_fold(0usize, |total, &(id, count)| {
            let shape = shapes.get(id).ok_or(PackError::UnknownShape(id))?;
            Ok(total.saturating_add(shape.area().saturating_mul(count)))
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
