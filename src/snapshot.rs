//! Immutable view of a plate session for the presentation layer.

use crate::assignment::AssignmentMap;
use crate::geometry::FillOrder;
use crate::model::{SampleId, WellId};

/// Snapshot of everything a view needs to render the editor.
///
/// Taken after a command has fully settled, so it never shows a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Selected samples in registry order
    pub selected_samples: Vec<SampleId>,
    /// Selected wells in row-major order
    pub selected_wells: Vec<WellId>,
    /// Current well to sample assignments
    pub assignments: AssignmentMap,
    /// Number of empty wells
    pub unassigned_count: usize,
    /// Whether a full-plate fill is currently allowed
    pub can_fill: bool,
    /// Ordinal used as the fixed end of the next range selection
    pub anchor: Option<usize>,
    /// Well where full-plate fills start
    pub start_well: WellId,
    /// Order used by fills and multi-sample drops
    pub fill_order: FillOrder,
    /// Whether a rectangle gesture over the wells is in progress
    pub well_drag_active: bool,
    /// Sample currently being dragged, if any
    pub dragged_sample: Option<SampleId>,
}

impl SessionSnapshot {
    /// Occupant of a well in this snapshot.
    pub fn occupant_of(&self, well: WellId) -> Option<&SampleId> {
        self.assignments.occupant_of(well)
    }

    /// Whether a sample is selected in this snapshot.
    pub fn is_sample_selected(&self, id: &str) -> bool {
        self.selected_samples.iter().any(|s| s.as_str() == id)
    }
}
