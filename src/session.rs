//! Plate session: the single owner of selection and assignment state.
//!
//! Every command takes plain identifiers, validates them against the plate and
//! the sample registry, and either applies completely or returns an error with
//! the session untouched. Guarded commands whose precondition is not met are
//! no-ops that report `false` instead of failing.

use std::collections::HashSet;

use crate::assignment::AssignmentMap;
use crate::config::EditorConfig;
use crate::constants::WELL_COUNT;
use crate::error::PlateError;
use crate::fill::{can_fill, fill_forward, fill_plate};
use crate::geometry::FillOrder;
use crate::message::PlateMessage;
use crate::model::{SampleId, SampleRegistry, WellId, row_label};
use crate::persist::PersistedState;
use crate::selection::{SelectMode, SelectionState};
use crate::snapshot::SessionSnapshot;

/// State of one plate editing session.
#[derive(Debug, Clone)]
pub struct PlateSession {
    registry: SampleRegistry,
    selection: SelectionState,
    assignments: AssignmentMap,
    start_well: WellId,
    fill_order: FillOrder,
    dragged_sample: Option<SampleId>,
}

impl PlateSession {
    /// Start an empty session over a fixed sample roster.
    pub fn new(registry: SampleRegistry) -> Self {
        Self {
            registry,
            selection: SelectionState::new(),
            assignments: AssignmentMap::new(),
            start_well: WellId::default(),
            fill_order: FillOrder::default(),
            dragged_sample: None,
        }
    }

    /// Start a session with a generated roster and the configured preferences.
    pub fn from_config(config: &EditorConfig) -> Self {
        let prefs = &config.preferences;
        let mut session = Self::new(SampleRegistry::generated(prefs.sample_count));
        session.start_well = prefs.start_well;
        session.fill_order = prefs.fill_order;
        log::info!(
            "Plate session started: {} samples, fill by {} from {}",
            prefs.sample_count,
            prefs.fill_order.name(),
            prefs.start_well
        );
        session
    }

    fn resolve_sample(&self, id: &str) -> Result<SampleId, PlateError> {
        self.registry
            .get(id)
            .map(|sample| sample.id.clone())
            .ok_or_else(|| PlateError::unknown_sample(id))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn registry(&self) -> &SampleRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn assignments(&self) -> &AssignmentMap {
        &self.assignments
    }

    /// Selected sample ids in registry order.
    pub fn selected_sample_ids(&self) -> Vec<SampleId> {
        self.selection.samples_in_order(&self.registry)
    }

    /// Selected wells in row-major order.
    pub fn selected_well_ids(&self) -> Vec<WellId> {
        self.selection.wells().iter().copied().collect()
    }

    /// Occupant of a well.
    pub fn occupant_of(&self, well: &str) -> Result<Option<&SampleId>, PlateError> {
        Ok(self.assignments.occupant_of(WellId::parse(well)?))
    }

    /// Number of empty wells.
    pub fn unassigned_count(&self) -> usize {
        self.assignments.unassigned_count()
    }

    /// Whether exactly one plate's worth of samples is selected.
    pub fn can_fill(&self) -> bool {
        can_fill(self.selection.sample_count())
    }

    pub fn start_well(&self) -> WellId {
        self.start_well
    }

    pub fn fill_order(&self) -> FillOrder {
        self.fill_order
    }

    /// Wells whose occupant is currently selected.
    pub fn wells_for_selected_samples(&self) -> Vec<WellId> {
        self.assignments
            .iter()
            .filter(|(_, sample)| self.selection.is_sample_selected(sample.as_str()))
            .map(|(well, _)| well)
            .collect()
    }

    /// Wells holding a given sample.
    pub fn wells_holding(&self, sample: &str) -> Result<Vec<WellId>, PlateError> {
        let sample = self.resolve_sample(sample)?;
        Ok(self.assignments.wells_holding(sample.as_str()))
    }

    /// Samples placed in at least one well.
    pub fn placed_samples(&self) -> HashSet<SampleId> {
        self.assignments.placed_samples()
    }

    pub fn is_well_dragging(&self) -> bool {
        self.selection.is_dragging()
    }

    pub fn is_sample_dragging(&self) -> bool {
        self.dragged_sample.is_some()
    }

    pub fn dragged_sample(&self) -> Option<&SampleId> {
        self.dragged_sample.as_ref()
    }

    /// Immutable view of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            selected_samples: self.selected_sample_ids(),
            selected_wells: self.selected_well_ids(),
            assignments: self.assignments.clone(),
            unassigned_count: self.unassigned_count(),
            can_fill: self.can_fill(),
            anchor: self.selection.anchor(),
            start_well: self.start_well,
            fill_order: self.fill_order,
            well_drag_active: self.selection.is_dragging(),
            dragged_sample: self.dragged_sample.clone(),
        }
    }

    // ========================================================================
    // Sample selection
    // ========================================================================

    /// Click on a sample with multi-select and range-select modifier flags.
    pub fn toggle_sample_select(
        &mut self,
        id: &str,
        multi: bool,
        range: bool,
    ) -> Result<(), PlateError> {
        self.select_sample(id, SelectMode::from_modifiers(multi, range))
    }

    /// Click on a sample with an explicit selection intent.
    pub fn select_sample(&mut self, id: &str, mode: SelectMode) -> Result<(), PlateError> {
        self.selection
            .toggle_sample_select(&self.registry, id, mode)
            .inspect_err(|e| log::warn!("Sample selection rejected: {}", e))
    }

    /// Select exactly the first `n` samples.
    pub fn select_first_n(&mut self, n: usize) {
        self.selection.select_first_n(&self.registry, n);
    }

    /// Select up to `n` samples starting at `start`, without wrapping.
    pub fn select_n_from_ordinal(&mut self, start: usize, n: usize) {
        self.selection.select_n_from_ordinal(&self.registry, start, n);
    }

    /// Select a plate's worth of samples.
    ///
    /// Continues from the selected sample when exactly one is selected, otherwise
    /// starts at the top of the roster.
    pub fn select_plate_batch(&mut self) {
        let start = match self.selection.sample_count() {
            1 => self
                .selection
                .first_sample(&self.registry)
                .and_then(|id| self.registry.get(id.as_str()).map(|s| s.ordinal)),
            _ => None,
        };
        match start {
            Some(ordinal) => self.select_n_from_ordinal(ordinal, WELL_COUNT),
            None => self.select_first_n(WELL_COUNT),
        }
    }

    /// Empty the sample selection. The range anchor is kept.
    pub fn clear_sample_selection(&mut self) {
        self.selection.clear_samples();
    }

    // ========================================================================
    // Sample drag and drop
    // ========================================================================

    /// A sample tab started moving. Dragging an unselected sample selects it alone.
    pub fn begin_sample_drag(&mut self, id: &str) -> Result<(), PlateError> {
        let sample = self.resolve_sample(id)?;
        if !self.selection.is_sample_selected(sample.as_str()) {
            let ordinal = self.registry.ordinal_of(sample.as_str())?;
            self.selection.replace_samples([sample.clone()]);
            self.selection.set_anchor(Some(ordinal));
        }
        log::debug!("✋ Sample drag started: {}", sample);
        self.dragged_sample = Some(sample);
        Ok(())
    }

    /// A sample tab was released, over `drop` or over nothing.
    ///
    /// With several samples selected they are laid out from the drop well in the
    /// current fill order; otherwise the dragged sample goes into the drop well.
    /// Returns the number of wells written.
    pub fn end_sample_drag(&mut self, drop: Option<&str>) -> Result<usize, PlateError> {
        let drop = drop.map(WellId::parse).transpose()?;
        let Some(sample) = self.dragged_sample.take() else {
            return Ok(0);
        };
        let Some(well) = drop else {
            log::debug!("✋ Sample drag of {} ended outside the plate", sample);
            return Ok(0);
        };

        if self.selection.sample_count() > 1 {
            let samples = self.selected_sample_ids();
            let placed = fill_forward(&mut self.assignments, &samples, self.fill_order, well);
            log::info!(
                "🧪 Dropped {} samples from {} by {}",
                placed,
                well,
                self.fill_order.name()
            );
            Ok(placed)
        } else {
            log::info!("🧪 Placed {} in {}", sample, well);
            self.assignments.place(well, sample);
            Ok(1)
        }
    }

    /// A sample drag was abandoned.
    pub fn cancel_sample_drag(&mut self) {
        if let Some(sample) = self.dragged_sample.take() {
            log::debug!("✋ Sample drag of {} cancelled", sample);
        }
    }

    // ========================================================================
    // Well selection
    // ========================================================================

    /// Pointer pressed on a well. Starts a rectangle gesture unless multi-selecting.
    pub fn well_pointer_down(&mut self, well: &str, multi: bool) -> Result<bool, PlateError> {
        let well = WellId::parse(well)?;
        Ok(!multi && self.selection.begin_well_drag(well))
    }

    /// Start a rectangle gesture. No-op if one is already active.
    pub fn begin_well_drag(&mut self, well: &str) -> Result<bool, PlateError> {
        let well = WellId::parse(well)?;
        Ok(self.selection.begin_well_drag(well))
    }

    /// Move the free corner of the active rectangle gesture.
    pub fn extend_well_drag(&mut self, well: &str) -> Result<bool, PlateError> {
        let well = WellId::parse(well)?;
        Ok(self.selection.extend_well_drag(well))
    }

    /// Finish the rectangle gesture. Returns true when the sample selection was
    /// replaced by the occupants of the selected wells.
    pub fn end_well_drag(&mut self) -> bool {
        self.selection
            .end_well_drag(&self.assignments, &self.registry)
    }

    /// Abandon the rectangle gesture without side effects.
    pub fn cancel_well_drag(&mut self) {
        self.selection.cancel_well_drag();
    }

    pub fn toggle_well_select(&mut self, well: &str, multi: bool) -> Result<(), PlateError> {
        let well = WellId::parse(well)?;
        self.selection.toggle_well_select(well, multi);
        Ok(())
    }

    pub fn clear_well_selection(&mut self) {
        self.selection.clear_wells();
    }

    /// Click on a well.
    ///
    /// Updates the well selection, then selects the well's occupant. Clicking an
    /// empty well while exactly one sample is selected places that sample.
    pub fn click_well(&mut self, well: &str, multi: bool) -> Result<(), PlateError> {
        let well = WellId::parse(well)?;
        self.selection.toggle_well_select(well, multi);

        if let Some(occupant) = self.assignments.occupant_of(well).cloned() {
            let ordinal = self.registry.get(occupant.as_str()).map(|s| s.ordinal);
            if multi {
                if self.selection.toggle_sample(occupant) {
                    self.selection.set_anchor(ordinal);
                }
            } else {
                self.selection.replace_samples([occupant]);
                self.selection.set_anchor(ordinal);
            }
        } else if self.selection.sample_count() == 1 {
            if let Some(sample) = self.selection.first_sample(&self.registry) {
                log::info!("🧪 Placed {} in {}", sample, well);
                self.assignments.place(well, sample);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Assignment
    // ========================================================================

    /// Put a sample into a well, returning the previous occupant.
    pub fn place(&mut self, well: &str, sample: &str) -> Result<Option<SampleId>, PlateError> {
        let well = WellId::parse(well)?;
        let sample = self.resolve_sample(sample)?;
        log::debug!("🧪 Placed {} in {}", sample, well);
        Ok(self.assignments.place(well, sample))
    }

    /// Empty a well, returning what was in it.
    pub fn clear(&mut self, well: &str) -> Result<Option<SampleId>, PlateError> {
        let well = WellId::parse(well)?;
        let removed = self.assignments.clear(well);
        if removed.is_some() {
            log::debug!("🗑️ Cleared {}", well);
        }
        Ok(removed)
    }

    /// Empty several wells. Nothing is cleared if any id is invalid.
    pub fn clear_many<S: AsRef<str>>(&mut self, wells: &[S]) -> Result<usize, PlateError> {
        let wells = wells
            .iter()
            .map(|w| WellId::parse(w.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.assignments.clear_many(wells))
    }

    /// Empty the whole plate.
    pub fn clear_all(&mut self) -> usize {
        let cleared = self.assignments.clear_all();
        log::info!("🗑️ Cleared plate ({} wells)", cleared);
        cleared
    }

    /// Empty every selected well and drop the well selection.
    pub fn clear_selected_wells(&mut self) -> usize {
        let wells = self.selected_well_ids();
        self.selection.clear_wells();
        let cleared = self.assignments.clear_many(wells);
        log::debug!("🗑️ Cleared {} selected wells", cleared);
        cleared
    }

    pub fn fill_row(&mut self, row: usize, sample: &str) -> Result<(), PlateError> {
        let sample = self.resolve_sample(sample)?;
        self.assignments.fill_row(row, &sample)
    }

    pub fn fill_column(&mut self, col: usize, sample: &str) -> Result<(), PlateError> {
        let sample = self.resolve_sample(sample)?;
        self.assignments.fill_column(col, &sample)
    }

    pub fn clear_row(&mut self, row: usize) -> Result<usize, PlateError> {
        self.assignments.clear_row(row)
    }

    pub fn clear_column(&mut self, col: usize) -> Result<usize, PlateError> {
        self.assignments.clear_column(col)
    }

    // ========================================================================
    // Keyboard placement
    // ========================================================================

    /// Place the first selected sample into `well`. False when nothing is selected.
    pub fn place_first_selected(&mut self, well: &str) -> Result<bool, PlateError> {
        let well = WellId::parse(well)?;
        let Some(sample) = self.selection.first_sample(&self.registry) else {
            return Ok(false);
        };
        log::info!("🧪 Placed {} in {}", sample, well);
        self.assignments.place(well, sample);
        Ok(true)
    }

    /// Fill the row containing `well` with the first selected sample, or clear it.
    pub fn fill_row_at(&mut self, well: &str, clear: bool) -> Result<bool, PlateError> {
        let row = WellId::parse(well)?.row();
        if clear {
            self.assignments.clear_row(row)?;
            log::info!("🗑️ Cleared row {}", row_label(row));
            return Ok(true);
        }
        let Some(sample) = self.selection.first_sample(&self.registry) else {
            return Ok(false);
        };
        self.assignments.fill_row(row, &sample)?;
        log::info!("🧪 Filled row {} with {}", row_label(row), sample);
        Ok(true)
    }

    /// Fill the column containing `well` with the first selected sample, or clear it.
    pub fn fill_column_at(&mut self, well: &str, clear: bool) -> Result<bool, PlateError> {
        let col = WellId::parse(well)?.col();
        if clear {
            self.assignments.clear_column(col)?;
            log::info!("🗑️ Cleared column {}", col + 1);
            return Ok(true);
        }
        let Some(sample) = self.selection.first_sample(&self.registry) else {
            return Ok(false);
        };
        self.assignments.fill_column(col, &sample)?;
        log::info!("🧪 Filled column {} with {}", col + 1, sample);
        Ok(true)
    }

    // ========================================================================
    // Bulk fill
    // ========================================================================

    pub fn set_start_well(&mut self, well: &str) -> Result<(), PlateError> {
        self.start_well = WellId::parse(well)?;
        Ok(())
    }

    pub fn set_fill_order(&mut self, order: FillOrder) {
        self.fill_order = order;
    }

    /// Lay the selected samples across the whole plate from the start well.
    ///
    /// The order becomes the current fill preference either way. Returns false
    /// without touching the plate unless exactly one plate's worth is selected.
    pub fn fill_with_selection(&mut self, order: FillOrder) -> bool {
        self.fill_order = order;
        if !self.can_fill() {
            return false;
        }
        let samples = self.selected_sample_ids();
        fill_plate(&mut self.assignments, &samples, order, self.start_well)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Record of the state that survives between sessions.
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            assignments: self
                .assignments
                .iter()
                .map(|(well, sample)| (well, sample.clone()))
                .collect(),
            selected_sample_ids: self.selected_sample_ids(),
            start_well: self.start_well,
        }
    }

    /// Apply a persisted record, dropping entries that name unknown samples.
    /// Returns the number of dropped entries.
    pub fn restore(&mut self, state: &PersistedState) -> usize {
        let mut dropped = 0;

        let mut assignments = AssignmentMap::new();
        for (&well, sample) in &state.assignments {
            if self.registry.contains(sample.as_str()) {
                assignments.place(well, sample.clone());
            } else {
                log::warn!("Dropping persisted assignment {} -> unknown sample {}", well, sample);
                dropped += 1;
            }
        }

        let known: Vec<SampleId> = state
            .selected_sample_ids
            .iter()
            .filter(|id| self.registry.contains(id.as_str()))
            .cloned()
            .collect();
        dropped += state.selected_sample_ids.len() - known.len();

        self.assignments = assignments;
        self.selection.replace_samples(known);
        self.start_well = state.start_well;
        log::info!(
            "📂 Restored {} assignments and {} selected samples",
            self.assignments.len(),
            self.selection.sample_count()
        );
        dropped
    }

    // ========================================================================
    // Message dispatch
    // ========================================================================

    /// Apply one input intent and return the settled state.
    pub fn update(&mut self, message: PlateMessage) -> Result<SessionSnapshot, PlateError> {
        match message {
            PlateMessage::SelectSample { id, mode } => self.select_sample(&id, mode)?,
            PlateMessage::SelectFirstN(n) => self.select_first_n(n),
            PlateMessage::SelectFromOrdinal { start, count } => {
                self.select_n_from_ordinal(start, count)
            }
            PlateMessage::SelectPlateBatch => self.select_plate_batch(),
            PlateMessage::ClearSampleSelection => self.clear_sample_selection(),

            PlateMessage::BeginSampleDrag(id) => self.begin_sample_drag(&id)?,
            PlateMessage::EndSampleDrag { drop } => {
                self.end_sample_drag(drop.as_deref())?;
            }
            PlateMessage::CancelSampleDrag => self.cancel_sample_drag(),

            PlateMessage::WellPointerDown { well, multi } => {
                self.well_pointer_down(&well, multi)?;
            }
            PlateMessage::BeginWellDrag(well) => {
                self.begin_well_drag(&well)?;
            }
            PlateMessage::ExtendWellDrag(well) => {
                self.extend_well_drag(&well)?;
            }
            PlateMessage::EndWellDrag => {
                self.end_well_drag();
            }
            PlateMessage::CancelWellDrag => self.cancel_well_drag(),
            PlateMessage::ClickWell { well, multi } => self.click_well(&well, multi)?,
            PlateMessage::ToggleWell { well, multi } => self.toggle_well_select(&well, multi)?,
            PlateMessage::ClearWellSelection => self.clear_well_selection(),

            PlateMessage::Place { well, sample } => {
                self.place(&well, &sample)?;
            }
            PlateMessage::ClearWell(well) => {
                self.clear(&well)?;
            }
            PlateMessage::ClearWells(wells) => {
                self.clear_many(&wells)?;
            }
            PlateMessage::ClearSelectedWells => {
                self.clear_selected_wells();
            }
            PlateMessage::ClearPlate => {
                self.clear_all();
            }
            PlateMessage::FillRow { row, sample } => self.fill_row(row, &sample)?,
            PlateMessage::FillColumn { col, sample } => self.fill_column(col, &sample)?,
            PlateMessage::ClearRow(row) => {
                self.clear_row(row)?;
            }
            PlateMessage::ClearColumn(col) => {
                self.clear_column(col)?;
            }

            PlateMessage::PlaceFirstSelected(well) => {
                self.place_first_selected(&well)?;
            }
            PlateMessage::FillRowAt { well, clear } => {
                self.fill_row_at(&well, clear)?;
            }
            PlateMessage::FillColumnAt { well, clear } => {
                self.fill_column_at(&well, clear)?;
            }

            PlateMessage::SetStartWell(well) => self.set_start_well(&well)?,
            PlateMessage::SetFillOrder(order) => self.set_fill_order(order),
            PlateMessage::FillWithSelection(order) => {
                self.fill_with_selection(order);
            }
        }
        Ok(self.snapshot())
    }
}

impl Default for PlateSession {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}
