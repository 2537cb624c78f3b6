//! Well identifiers on the plate grid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{COLS, ROWS};
use crate::error::PlateError;

/// Letter used for a zero-based row index (0 -> 'A').
pub fn row_label(row: usize) -> char {
    char::from(b'A' + (row % 26) as u8)
}

/// Identifier of a single well, stored as zero-based (row, column).
///
/// The canonical string form is the row letter followed by the 1-based column
/// number, e.g. `A1` or `H12`. Ordering is row-major, so sorted collections of
/// wells read `A1, A2, .., A12, B1, ..`. The default well is `A1`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct WellId {
    row: u8,
    col: u8,
}

impl WellId {
    /// Create a well id from zero-based coordinates.
    pub fn new(row: usize, col: usize) -> Result<Self, PlateError> {
        if row >= ROWS || col >= COLS {
            return Err(PlateError::OutOfBounds { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Parse a canonical well id string.
    pub fn parse(s: &str) -> Result<Self, PlateError> {
        s.parse()
    }

    /// Zero-based row index.
    pub fn row(&self) -> usize {
        usize::from(self.row)
    }

    /// Zero-based column index.
    pub fn col(&self) -> usize {
        usize::from(self.col)
    }

    /// Zero-based (row, column) pair.
    pub fn coords(&self) -> (usize, usize) {
        (self.row(), self.col())
    }

    /// Position of this well in row-major order.
    pub fn row_major_index(&self) -> usize {
        self.row() * COLS + self.col()
    }

    /// Position of this well in column-major order.
    pub fn column_major_index(&self) -> usize {
        self.col() * ROWS + self.row()
    }
}

impl fmt::Display for WellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", row_label(self.row()), self.col() + 1)
    }
}

impl FromStr for WellId {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlateError::invalid_well(s);

        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        let digits = chars.as_str();

        if !letter.is_ascii_uppercase()
            || digits.is_empty()
            || digits.len() > 2
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let row = usize::from(letter as u8 - b'A');
        let col: usize = digits.parse().map_err(|_| invalid())?;
        if row >= ROWS || col == 0 || col > COLS {
            return Err(invalid());
        }

        Self::new(row, col - 1)
    }
}

impl TryFrom<String> for WellId {
    type Error = PlateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WellId> for String {
    fn from(id: WellId) -> Self {
        id.to_string()
    }
}
