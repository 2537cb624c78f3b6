//! Data models for the plate editor.

mod sample;
mod well;

pub use sample::{Sample, SampleId, SampleRegistry};
pub use well::{WellId, row_label};
