//! Input intents for the plate session.
//!
//! The presentation layer turns raw UI events into these messages once, at its
//! boundary, and hands them to [`crate::PlateSession::update`]. Identifiers are
//! carried as plain strings and validated by the session.

use crate::geometry::FillOrder;
use crate::selection::SelectMode;

/// Messages that can be sent to update a plate session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlateMessage {
    // Sample list
    /// Sample clicked with the given modifier intent
    SelectSample { id: String, mode: SelectMode },
    /// Select the first N samples of the roster
    SelectFirstN(usize),
    /// Select up to `count` samples starting at `start`
    SelectFromOrdinal { start: usize, count: usize },
    /// "Select 96" button
    SelectPlateBatch,
    /// "Clear selection" button
    ClearSampleSelection,

    // Sample drag and drop
    /// Drag of a sample tab started
    BeginSampleDrag(String),
    /// Drag of a sample tab ended, over a well or nowhere
    EndSampleDrag { drop: Option<String> },
    /// Drag of a sample tab was cancelled
    CancelSampleDrag,

    // Plate pointer input
    /// Pointer pressed on a well
    WellPointerDown { well: String, multi: bool },
    /// Rectangle gesture started at a well
    BeginWellDrag(String),
    /// Pointer entered a well during a rectangle gesture
    ExtendWellDrag(String),
    /// Pointer released
    EndWellDrag,
    /// Gesture abandoned
    CancelWellDrag,
    /// Well clicked
    ClickWell { well: String, multi: bool },
    /// Well selection toggled without touching samples
    ToggleWell { well: String, multi: bool },
    /// Click outside the plate
    ClearWellSelection,

    // Assignment
    /// Put a sample in a well
    Place { well: String, sample: String },
    /// Empty one well
    ClearWell(String),
    /// Empty several wells
    ClearWells(Vec<String>),
    /// Empty every selected well
    ClearSelectedWells,
    /// Empty the whole plate
    ClearPlate,
    /// Put a sample in every well of a row
    FillRow { row: usize, sample: String },
    /// Put a sample in every well of a column
    FillColumn { col: usize, sample: String },
    /// Empty a row
    ClearRow(usize),
    /// Empty a column
    ClearColumn(usize),

    // Keyboard on a focused well
    /// Enter/Space: place the first selected sample
    PlaceFirstSelected(String),
    /// R / Shift+R: fill or clear the well's row
    FillRowAt { well: String, clear: bool },
    /// C / Shift+C: fill or clear the well's column
    FillColumnAt { well: String, clear: bool },

    // Fill controls
    /// Start-well dropdown changed
    SetStartWell(String),
    /// Fill order changed without filling
    SetFillOrder(FillOrder),
    /// "Fill by Rows" / "Fill by Columns"
    FillWithSelection(FillOrder),
}
