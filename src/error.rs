//! Error types for plate session operations.

use thiserror::Error;

/// Errors raised when a command references something that does not exist.
///
/// A command that returns one of these leaves the session untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlateError {
    /// Well identifier is not a canonical `<row letter><column number>` string
    #[error("Invalid well identifier: '{0}'")]
    InvalidWellId(String),

    /// Coordinate pair lies outside the plate
    #[error("Well coordinate out of bounds: row {row}, column {col}")]
    OutOfBounds {
        /// Zero-based row index
        row: usize,
        /// Zero-based column index
        col: usize,
    },

    /// Row index outside the plate
    #[error("Row {0} is outside the plate")]
    InvalidRow(usize),

    /// Column index outside the plate
    #[error("Column {0} is outside the plate")]
    InvalidColumn(usize),

    /// Sample id is not in the registry
    #[error("Unknown sample: '{0}'")]
    UnknownSample(String),

    /// Two registry entries share an id
    #[error("Duplicate sample id in registry: '{0}'")]
    DuplicateSample(String),
}

impl PlateError {
    /// Create an invalid well id error.
    pub fn invalid_well(id: impl Into<String>) -> Self {
        Self::InvalidWellId(id.into())
    }

    /// Create an unknown sample error.
    pub fn unknown_sample(id: impl Into<String>) -> Self {
        Self::UnknownSample(id.into())
    }

    /// Whether this error means an identifier did not resolve to a real well or sample.
    pub fn is_invalid_identifier(&self) -> bool {
        match self {
            PlateError::InvalidWellId(_)
            | PlateError::OutOfBounds { .. }
            | PlateError::InvalidRow(_)
            | PlateError::InvalidColumn(_)
            | PlateError::UnknownSample(_) => true,
            PlateError::DuplicateSample(_) => false,
        }
    }
}
