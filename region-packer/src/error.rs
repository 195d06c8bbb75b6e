//! Error types for the packer library

use crate::shape::ShapeId;
use thiserror::Error;

/// Error type for programmatic misuse of shapes, regions and the packer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// A shape was built from an empty cell list
    #[error("shape {0} has no occupied cells")]
    EmptyShape(ShapeId),
    /// A shape lists the same cell twice
    #[error("shape {shape} lists cell ({row}, {col}) more than once")]
    DuplicateCell { shape: ShapeId, row: i32, col: i32 },
    /// A shape ID was inserted into a shape set twice
    #[error("shape {0} is already defined")]
    DuplicateShape(ShapeId),
    /// Region width or height is zero, or the area is too large to allocate
    #[error("invalid region dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The total number of shape instances does not fit in a `usize`
    #[error("region requires more shape instances than can be counted")]
    TooManyPieces,
    /// A shape ID above [`ShapeSet::MAX_ID`](crate::ShapeSet::MAX_ID)
    #[error("shape ID {0} is too large")]
    ShapeIdTooLarge(ShapeId),
    /// A region requires a shape that is not in the shape set
    #[error("shape {0} is not defined")]
    UnknownShape(ShapeId),
}

/// Error type for malformed puzzle input
///
/// Every variant carries the 1-based line number the problem was found on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A line ending in `:` that is not a valid `<id>:` shape header
    #[error("line {line}: invalid shape header {text:?}, expected `<id>:`")]
    InvalidHeader { line: usize, text: String },
    /// A line that looks like a region but is missing the `x` or `:` separator
    #[error("line {line}: invalid region {text:?}, expected `<width>x<height>: <counts...>`")]
    InvalidRegion { line: usize, text: String },
    /// A number that does not parse as a non-negative integer
    #[error("line {line}: {text:?} is not a valid number")]
    InvalidNumber { line: usize, text: String },
    /// A line that is neither a header, a shape row nor a region
    #[error("line {line}: unexpected content {text:?}")]
    UnexpectedLine { line: usize, text: String },
    /// A region requires copies of a shape that was never declared
    #[error("line {line}: region needs {count} of shape {shape}, which is never declared")]
    UndeclaredShape {
        line: usize,
        shape: ShapeId,
        count: usize,
    },
    /// A declared shape or region violates a model invariant
    #[error("line {line}: {source}")]
    InvalidArgument {
        line: usize,
        #[source]
        source: PackError,
    },
}

impl ParseError {
    /// Line the error was reported on
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidHeader { line, .. }
            | ParseError::InvalidRegion { line, .. }
            | ParseError::InvalidNumber { line, .. }
            | ParseError::UnexpectedLine { line, .. }
            | ParseError::UndeclaredShape { line, .. }
            | ParseError::InvalidArgument { line, .. } => *line,
        }
    }
}
