//! Plate Editor - 96-well plate sample placement
//!
//! The editing core behind a plate layout tool: a sample roster, two
//! independent selections (samples and wells), the well to sample assignment
//! map, and the bulk fill algorithms that lay a full selection across the plate.
//!
//! All state lives in a [`PlateSession`]. Rendering and input wiring live
//! outside this crate and talk to the session through plain identifiers or
//! [`PlateMessage`] values.

pub mod assignment;
pub mod config;
pub mod constants;
pub mod error;
pub mod fill;
pub mod geometry;
pub mod message;
pub mod model;
pub mod persist;
pub mod selection;
pub mod session;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use assignment::AssignmentMap;
pub use config::{ConfigError, EditorConfig, EditorPreferences, LogLevel};
pub use error::PlateError;
pub use geometry::{Direction, FillOrder};
pub use message::PlateMessage;
pub use model::{Sample, SampleId, SampleRegistry, WellId};
pub use persist::{PersistError, PersistedState};
pub use selection::{DragGesture, SelectMode, SelectionState};
pub use session::PlateSession;
pub use snapshot::SessionSnapshot;
