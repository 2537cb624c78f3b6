//! Global constants for the plate editor

/// Number of plate rows (A..H)
pub const ROWS: usize = 8;

/// Number of plate columns (1..12)
pub const COLS: usize = 12;

/// Total number of addressable wells on the plate
pub const WELL_COUNT: usize = ROWS * COLS;

/// Number of samples generated for a default roster
pub const DEFAULT_SAMPLE_COUNT: usize = 120;

/// Storage key for the persisted session record
pub const STORAGE_KEY: &str = "plate-app:v1";
