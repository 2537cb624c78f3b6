//! Plate geometry: coordinate mapping and well traversal orders.
//!
//! Everything here is pure and stateless. Bulk operations consult these
//! functions to decide which wells to visit and in what order.

use serde::{Deserialize, Serialize};

use crate::constants::{COLS, ROWS};
use crate::error::PlateError;
use crate::model::WellId;

/// Traversal order used by bulk fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FillOrder {
    /// A1..A12, B1..B12, ...
    #[default]
    #[serde(rename = "rows")]
    Rows,
    /// A1..H1, A2..H2, ...
    #[serde(rename = "cols")]
    Columns,
}

impl FillOrder {
    /// Get the display name for this order.
    pub fn name(&self) -> &'static str {
        match self {
            FillOrder::Rows => "Rows",
            FillOrder::Columns => "Columns",
        }
    }

    /// All wells in this order.
    pub fn wells(&self) -> Vec<WellId> {
        match self {
            FillOrder::Rows => row_major_order(),
            FillOrder::Columns => column_major_order(),
        }
    }
}

/// Direction for moving keyboard focus between wells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Well id for zero-based coordinates.
pub fn well_id(row: usize, col: usize) -> Result<WellId, PlateError> {
    WellId::new(row, col)
}

/// Zero-based coordinates of a well id string.
pub fn coords(well: &str) -> Result<(usize, usize), PlateError> {
    WellId::parse(well).map(|id| id.coords())
}

/// All wells, row 0 first, left to right.
pub fn row_major_order() -> Vec<WellId> {
    (0..ROWS)
        .flat_map(|row| (0..COLS).map(move |col| (row, col)))
        .filter_map(|(row, col)| WellId::new(row, col).ok())
        .collect()
}

/// All wells, column 0 first, top to bottom.
pub fn column_major_order() -> Vec<WellId> {
    (0..COLS)
        .flat_map(|col| (0..ROWS).map(move |row| (row, col)))
        .filter_map(|(row, col)| WellId::new(row, col).ok())
        .collect()
}

/// Cyclic rotation of `order` so that `start` comes first.
///
/// Returns `order` unchanged when `start` is not part of it.
pub fn rotate_from(order: &[WellId], start: WellId) -> Vec<WellId> {
    let mut rotated = order.to_vec();
    if let Some(i) = order.iter().position(|&w| w == start) {
        rotated.rotate_left(i);
    }
    rotated
}

/// Every well in the axis-aligned rectangle spanned by `a` and `b`, row-major.
pub fn rectangle(a: WellId, b: WellId) -> Vec<WellId> {
    let (min_row, max_row) = (a.row().min(b.row()), a.row().max(b.row()));
    let (min_col, max_col) = (a.col().min(b.col()), a.col().max(b.col()));

    (min_row..=max_row)
        .flat_map(|row| (min_col..=max_col).map(move |col| (row, col)))
        .filter_map(|(row, col)| WellId::new(row, col).ok())
        .collect()
}

/// The wells of one row, left to right.
pub fn row_wells(row: usize) -> Result<Vec<WellId>, PlateError> {
    if row >= ROWS {
        return Err(PlateError::InvalidRow(row));
    }
    Ok((0..COLS)
        .filter_map(|col| WellId::new(row, col).ok())
        .collect())
}

/// The wells of one column, top to bottom.
pub fn column_wells(col: usize) -> Result<Vec<WellId>, PlateError> {
    if col >= COLS {
        return Err(PlateError::InvalidColumn(col));
    }
    Ok((0..ROWS)
        .filter_map(|row| WellId::new(row, col).ok())
        .collect())
}

/// Neighbouring well in `direction`, clamped at the plate edges.
pub fn step(well: WellId, direction: Direction) -> WellId {
    let (row, col) = well.coords();
    let (row, col) = match direction {
        Direction::Up => (row.saturating_sub(1), col),
        Direction::Down => ((row + 1).min(ROWS - 1), col),
        Direction::Left => (row, col.saturating_sub(1)),
        Direction::Right => (row, (col + 1).min(COLS - 1)),
    };
    WellId::new(row, col).unwrap_or(well)
}
