//! Puzzle input parsing
//!
//! The input is a list of shape blocks followed by region lines:
//!
//! ```text
//! 0:
//! ###
//! ##.
//! ##.
//!
//! 4x4: 0 0 0 0 2 0
//! 12x5: 1 0 1 0 2 2
//! ```
//!
//! A shape block is an `<id>:` header followed by picture rows up to the
//! next blank line. A region line lists its size and, positionally, how many
//! copies of each shape it needs.

use crate::error::ParseError;
use crate::region::Region;
use crate::shape::{Shape, ShapeId, ShapeSet};
use itertools::Itertools;
use regex::{Captures, Regex};
use std::cell::OnceCell;
use std::str::FromStr;

/// Parsed puzzle: the shape dictionary and every region to pack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    shapes: ShapeSet,
    regions: Vec<Region>,
}

impl Puzzle {
    /// Parse a complete puzzle input
    ///
    /// Every region is checked against the shape dictionary here, so the
    /// packer never meets an undeclared shape.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        PuzzleParser::new().parse(input)
    }

    pub fn shapes(&self) -> &ShapeSet {
        &self.shapes
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn into_parts(self) -> (ShapeSet, Vec<Region>) {
        (self.shapes, self.regions)
    }
}

impl FromStr for Puzzle {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromStr for Region {
    type Err = ParseError;

    /// Parse a single `<width>x<height>: <counts...>` line
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PuzzleParser::new().parse_region_line(1, s.trim())
    }
}

/// Line parser with lazily compiled patterns
#[derive(Clone, Debug)]
pub(crate) struct PuzzleParser {
    header_regex: OnceCell<Regex>,
    region_regex: OnceCell<Regex>,
}

impl PuzzleParser {
    pub fn new() -> Self {
        Self {
            header_regex: OnceCell::new(),
            region_regex: OnceCell::new(),
        }
    }

    /// Get or compile the `<id>:` header pattern
    fn header_regex(&self) -> &Regex {
        self.header_regex
            .get_or_init(|| Regex::new(r"^(\d+)\s*:$").unwrap())
    }

    /// Get or compile the `<width>x<height>: <counts>` pattern
    fn region_regex(&self) -> &Regex {
        self.region_regex
            .get_or_init(|| Regex::new(r"^(\d+)x(\d+)\s*:(.*)$").unwrap())
    }

    pub fn parse(&self, input: &str) -> Result<Puzzle, ParseError> {
        let mut shapes = ShapeSet::new();
        let mut regions = Vec::new();
        let mut lines = input.lines().enumerate().map(|(i, l)| (i + 1, l)).peekable();

        while let Some((line_no, raw)) = lines.next() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = self.region_regex().captures(line) {
                regions.push((line_no, self.region_from_captures(line_no, &caps)?));
            } else if let Some(caps) = self.header_regex().captures(line) {
                let id = ShapeId(parse_number(line_no, &caps[1])?);
                let rows: Vec<&str> = lines
                    .peeking_take_while(|(_, row)| !row.trim().is_empty())
                    .map(|(_, row)| row)
                    .collect();
                Shape::from_rows(id, &rows)
                    .and_then(|shape| shapes.insert(shape))
                    .map_err(|source| ParseError::InvalidArgument {
                        line: line_no,
                        source,
                    })?;
            } else {
                return Err(classify_bad_line(line_no, line));
            }
        }

        for (line, region) in &regions {
            let missing = region
                .counts()
                .into_iter()
                .find(|&(id, count)| count > 0 && !shapes.contains(id));
            if let Some((shape, count)) = missing {
                return Err(ParseError::UndeclaredShape {
                    line: *line,
                    shape,
                    count,
                });
            }
        }

        Ok(Puzzle {
            shapes,
            regions: regions.into_iter().map(|(_, region)| region).collect(),
        })
    }

    /// Parse one region line on its own, without shape validation
    pub fn parse_region_line(&self, line_no: usize, line: &str) -> Result<Region, ParseError> {
        match self.region_regex().captures(line) {
            Some(caps) => self.region_from_captures(line_no, &caps),
            None => Err(ParseError::InvalidRegion {
                line: line_no,
                text: line.to_string(),
            }),
        }
    }

    fn region_from_captures(&self, line: usize, caps: &Captures<'_>) -> Result<Region, ParseError> {
        let width = parse_number(line, &caps[1])?;
        let height = parse_number(line, &caps[2])?;
        let counts = caps[3]
            .split_whitespace()
            .map(|token| parse_number(line, token))
            .collect::<Result<Vec<_>, _>>()?;

        Region::from_counts(width, height, &counts)
            .map_err(|source| ParseError::InvalidArgument { line, source })
    }
}

impl Default for PuzzleParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_number(line: usize, text: &str) -> Result<usize, ParseError> {
    text.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        text: text.to_string(),
    })
}

/// Pick the most helpful error for a line that matched no pattern
fn classify_bad_line(line: usize, text: &str) -> ParseError {
    let text_owned = text.to_string();
    if text.ends_with(':') {
        ParseError::InvalidHeader {
            line,
            text: text_owned,
        }
    } else if text.contains(':') || text.starts_with(|c: char| c.is_ascii_digit()) {
        ParseError::InvalidRegion {
            line,
            text: text_owned,
        }
    } else {
        ParseError::UnexpectedLine {
            line,
            text: text_owned,
        }
    }
}
