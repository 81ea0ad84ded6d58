//! Three-line level format consumed by the world.
//!
//! ```text
//! 3 2
//! 0 0 1 0 1 0
//! 0 5
//! ```
//!
//! The first line holds `columns rows`, the second one cell code per cell in
//! row-major order, and the third the raw `start end` linear indices. The
//! indices are passed through untouched; resolving them is the grid's job.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CellKind;

const DIMENSIONS_LINE: usize = 1;
const CELLS_LINE: usize = 2;
const ENDPOINTS_LINE: usize = 3;

/// Validated structural description of a level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedGridDescription")]
pub struct GridDescription {
    columns: u32,
    rows: u32,
    cells: Vec<CellKind>,
    start_index: i64,
    end_index: i64,
}

impl GridDescription {
    /// Assembles a description from already-decoded parts.
    ///
    /// Fails when a dimension is zero, does not fit the coordinate space, or
    /// when `cells` does not hold exactly `columns * rows` entries.
    pub fn new(
        columns: u32,
        rows: u32,
        cells: Vec<CellKind>,
        start_index: i64,
        end_index: i64,
    ) -> Result<Self, MalformedInput> {
        let expected = cell_count(i64::from(columns), i64::from(rows))?;
        if cells.len() != expected {
            return Err(MalformedInput::TokenCount {
                line: CELLS_LINE,
                expected,
                found: cells.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            cells,
            start_index,
            end_index,
        })
    }

    /// Parses the first three lines of a level file. Further lines are ignored.
    pub fn from_text(text: &str) -> Result<Self, MalformedInput> {
        let mut lines = text.lines();
        let dimensions = lines.next().ok_or(MalformedInput::MissingLine {
            line: DIMENSIONS_LINE,
        })?;
        let cells = lines
            .next()
            .ok_or(MalformedInput::MissingLine { line: CELLS_LINE })?;
        let endpoints = lines.next().ok_or(MalformedInput::MissingLine {
            line: ENDPOINTS_LINE,
        })?;
        parse_grid_description(dimensions, cells, endpoints)
    }

    /// Number of cell columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Cell kinds in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Total number of cells, `columns * rows`.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Raw start index as written in the level; may be out of range.
    #[must_use]
    pub const fn start_index(&self) -> i64 {
        self.start_index
    }

    /// Raw end index as written in the level; may be out of range.
    #[must_use]
    pub const fn end_index(&self) -> i64 {
        self.end_index
    }
}

/// Wire shape of [`GridDescription`] before its invariants are checked.
#[derive(Deserialize)]
struct UncheckedGridDescription {
    columns: u32,
    rows: u32,
    cells: Vec<CellKind>,
    start_index: i64,
    end_index: i64,
}

impl TryFrom<UncheckedGridDescription> for GridDescription {
    type Error = MalformedInput;

    fn try_from(unchecked: UncheckedGridDescription) -> Result<Self, Self::Error> {
        Self::new(
            unchecked.columns,
            unchecked.rows,
            unchecked.cells,
            unchecked.start_index,
            unchecked.end_index,
        )
    }
}

impl FromStr for GridDescription {
    type Err = MalformedInput;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_text(text)
    }
}

/// Reasons level text fails to decode. Line numbers are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MalformedInput {
    /// The text ended before the given line.
    #[error("level description is missing line {line}")]
    MissingLine {
        /// Line that could not be read.
        line: usize,
    },
    /// A line held the wrong number of whitespace-separated tokens.
    #[error("line {line} holds {found} tokens; expected {expected}")]
    TokenCount {
        /// Offending line.
        line: usize,
        /// Number of tokens the line must hold.
        expected: usize,
        /// Number of tokens actually present.
        found: usize,
    },
    /// A token that must be an integer could not be parsed as one.
    #[error("line {line}: `{token}` is not an integer")]
    InvalidInteger {
        /// Offending line.
        line: usize,
        /// Token as written.
        token: String,
    },
    /// A grid dimension was zero or negative.
    #[error("line {line}: grid dimension {value} must be positive")]
    NonPositiveDimension {
        /// Offending line.
        line: usize,
        /// Dimension as parsed.
        value: i64,
    },
    /// The grid does not fit the coordinate space.
    #[error("a {columns}x{rows} grid is too large")]
    GridTooLarge {
        /// Requested column count.
        columns: i64,
        /// Requested row count.
        rows: i64,
    },
    /// A cell token was not one of `0`, `1` or `2`.
    #[error("line {line}: cell {index} has unknown code `{token}`")]
    UnknownCellCode {
        /// Offending line.
        line: usize,
        /// Zero-based linear index of the cell.
        index: usize,
        /// Token as written.
        token: String,
    },
}

/// Parses the three level lines into a [`GridDescription`].
///
/// Nothing is produced unless every line decodes.
pub fn parse_grid_description(
    dimensions: &str,
    cells: &str,
    endpoints: &str,
) -> Result<GridDescription, MalformedInput> {
    let [columns, rows] = parse_integer_pair(dimensions, DIMENSIONS_LINE)?;
    let expected = cell_count(columns, rows)?;

    let tokens: Vec<&str> = cells.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(MalformedInput::TokenCount {
            line: CELLS_LINE,
            expected,
            found: tokens.len(),
        });
    }
    let kinds = tokens
        .iter()
        .enumerate()
        .map(|(index, token)| {
            CellKind::from_code(token).ok_or_else(|| MalformedInput::UnknownCellCode {
                line: CELLS_LINE,
                index,
                token: (*token).to_owned(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let [start_index, end_index] = parse_integer_pair(endpoints, ENDPOINTS_LINE)?;

    let too_large = || MalformedInput::GridTooLarge { columns, rows };
    GridDescription::new(
        u32::try_from(columns).map_err(|_| too_large())?,
        u32::try_from(rows).map_err(|_| too_large())?,
        kinds,
        start_index,
        end_index,
    )
}

fn parse_integer_pair(line: &str, line_number: usize) -> Result<[i64; 2], MalformedInput> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [first, second] = tokens.as_slice() else {
        return Err(MalformedInput::TokenCount {
            line: line_number,
            expected: 2,
            found: tokens.len(),
        });
    };

    let parse = |token: &str| {
        token
            .parse::<i64>()
            .map_err(|_| MalformedInput::InvalidInteger {
                line: line_number,
                token: token.to_owned(),
            })
    };
    Ok([parse(first)?, parse(second)?])
}

/// Cell count of a `columns x rows` grid addressable with `i32` coordinates.
fn cell_count(columns: i64, rows: i64) -> Result<usize, MalformedInput> {
    if columns <= 0 || rows <= 0 {
        let value = if columns <= 0 { columns } else { rows };
        return Err(MalformedInput::NonPositiveDimension {
            line: DIMENSIONS_LINE,
            value,
        });
    }

    let too_large = MalformedInput::GridTooLarge { columns, rows };
    if columns > i64::from(i32::MAX) || rows > i64::from(i32::MAX) {
        return Err(too_large);
    }
    columns
        .checked_mul(rows)
        .and_then(|count| usize::try_from(count).ok())
        .ok_or(too_large)
}
