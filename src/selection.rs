//! Selection manager: selected samples, selected wells, the range anchor and
//! the rectangle drag gesture over wells.
//!
//! Sample and well selections are independent sets. The only coupling is the
//! end of a rectangle gesture, which replaces the sample selection with the
//! occupants of the selected wells.

use std::collections::{BTreeSet, HashSet};

use crate::assignment::AssignmentMap;
use crate::error::PlateError;
use crate::geometry::rectangle;
use crate::model::{SampleId, SampleRegistry, WellId};

/// How a click on a sample combines with the current selection.
///
/// Built once from modifier keys at the presentation boundary so the core never
/// sees UI events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectMode {
    /// Plain click: select only the target
    #[default]
    Replace,
    /// Ctrl/Cmd-click: toggle the target in or out
    Toggle,
    /// Shift-click: select the span between anchor and target
    Range,
    /// Ctrl/Cmd+Shift-click: add the span to the existing selection
    RangeExtend,
}

impl SelectMode {
    /// Translate multi-select and range-select modifier flags.
    pub fn from_modifiers(multi: bool, range: bool) -> Self {
        match (multi, range) {
            (false, false) => SelectMode::Replace,
            (true, false) => SelectMode::Toggle,
            (false, true) => SelectMode::Range,
            (true, true) => SelectMode::RangeExtend,
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, SelectMode::Toggle | SelectMode::RangeExtend)
    }

    pub fn is_range(&self) -> bool {
        matches!(self, SelectMode::Range | SelectMode::RangeExtend)
    }
}

/// An in-progress rectangle selection over wells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGesture {
    /// Well where the pointer went down
    pub anchor: WellId,
    /// Well the pointer is currently over
    pub current: WellId,
}

impl DragGesture {
    /// Wells covered by the gesture, row-major.
    pub fn wells(&self) -> Vec<WellId> {
        rectangle(self.anchor, self.current)
    }

    /// Number of wells covered by the gesture.
    pub fn well_count(&self) -> usize {
        let rows = self.anchor.row().abs_diff(self.current.row()) + 1;
        let cols = self.anchor.col().abs_diff(self.current.col()) + 1;
        rows * cols
    }
}

/// Selection state for one plate session.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    samples: HashSet<SampleId>,
    wells: BTreeSet<WellId>,
    anchor: Option<usize>,
    drag: Option<DragGesture>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Selected sample ids, unordered.
    pub fn samples(&self) -> &HashSet<SampleId> {
        &self.samples
    }

    /// Selected sample ids in registry order.
    pub fn samples_in_order(&self, registry: &SampleRegistry) -> Vec<SampleId> {
        registry.in_registry_order(&self.samples)
    }

    /// The selected sample with the lowest ordinal.
    pub fn first_sample(&self, registry: &SampleRegistry) -> Option<SampleId> {
        self.samples
            .iter()
            .filter_map(|id| registry.get(id.as_str()))
            .min_by_key(|sample| sample.ordinal)
            .map(|sample| sample.id.clone())
    }

    pub fn is_sample_selected(&self, id: &str) -> bool {
        self.samples.contains(id)
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Selected wells in row-major order.
    pub fn wells(&self) -> &BTreeSet<WellId> {
        &self.wells
    }

    pub fn is_well_selected(&self, well: WellId) -> bool {
        self.wells.contains(&well)
    }

    /// Ordinal used as the fixed end of the next range selection.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// The active rectangle gesture, if any.
    pub fn drag(&self) -> Option<&DragGesture> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // ========================================================================
    // Sample selection
    // ========================================================================

    /// Apply a click on sample `id`.
    ///
    /// Range modes use the span between the anchor and the target and leave the
    /// anchor alone. Without an anchor a range click falls back to the
    /// non-range behavior of the same mode.
    pub fn toggle_sample_select(
        &mut self,
        registry: &SampleRegistry,
        id: &str,
        mode: SelectMode,
    ) -> Result<(), PlateError> {
        let ordinal = registry.ordinal_of(id)?;

        if let (true, Some(anchor)) = (mode.is_range(), self.anchor) {
            if !mode.is_multi() {
                self.samples.clear();
            }
            self.samples
                .extend(registry.span(anchor, ordinal).iter().map(|s| s.id.clone()));
            log::debug!(
                "🔗 Range select {}..={} ({} selected)",
                anchor.min(ordinal),
                anchor.max(ordinal),
                self.samples.len()
            );
            return Ok(());
        }

        if mode.is_multi() {
            self.toggle_sample(SampleId::new(id));
        } else {
            self.samples.clear();
            self.samples.insert(SampleId::new(id));
        }
        self.anchor = Some(ordinal);
        Ok(())
    }

    /// Select exactly the first `n` samples of the registry.
    pub fn select_first_n(&mut self, registry: &SampleRegistry, n: usize) {
        self.select_n_from_ordinal(registry, 0, n);
    }

    /// Select up to `n` samples starting at `start`, truncated at the registry end.
    pub fn select_n_from_ordinal(&mut self, registry: &SampleRegistry, start: usize, n: usize) {
        self.samples = registry
            .window(start, n)
            .iter()
            .map(|s| s.id.clone())
            .collect();
        log::debug!("✅ Selected {} samples from ordinal {}", self.samples.len(), start);
    }

    /// Empty the sample selection. The anchor is kept.
    pub fn clear_samples(&mut self) {
        self.samples.clear();
    }

    /// Replace the sample selection wholesale.
    pub(crate) fn replace_samples<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = SampleId>,
    {
        self.samples = ids.into_iter().collect();
    }

    /// Toggle one sample in or out. Returns true if it is now selected.
    pub(crate) fn toggle_sample(&mut self, id: SampleId) -> bool {
        if self.samples.remove(id.as_str()) {
            false
        } else {
            self.samples.insert(id);
            true
        }
    }

    pub(crate) fn set_anchor(&mut self, ordinal: Option<usize>) {
        self.anchor = ordinal;
    }

    // ========================================================================
    // Well selection
    // ========================================================================

    /// Multi toggles the well in or out; otherwise the well becomes the only selection.
    pub fn toggle_well_select(&mut self, well: WellId, multi: bool) {
        if multi {
            if !self.wells.remove(&well) {
                self.wells.insert(well);
            }
        } else {
            self.wells.clear();
            self.wells.insert(well);
        }
    }

    pub fn clear_wells(&mut self) {
        self.wells.clear();
    }

    /// Start a rectangle gesture at `well`. No-op if one is already running.
    pub fn begin_well_drag(&mut self, well: WellId) -> bool {
        if self.drag.is_some() {
            return false;
        }
        self.drag = Some(DragGesture {
            anchor: well,
            current: well,
        });
        self.wells = BTreeSet::from([well]);
        log::debug!("🔲 Well drag started at {}", well);
        true
    }

    /// Move the free corner of the active gesture to `well`.
    pub fn extend_well_drag(&mut self, well: WellId) -> bool {
        let Some(gesture) = self.drag.as_mut() else {
            return false;
        };
        gesture.current = well;
        self.wells = gesture.wells().into_iter().collect();
        true
    }

    /// Finish the active gesture.
    ///
    /// When the rectangle spans more than one well, the sample selection becomes
    /// the occupants of the selected wells and the anchor moves to the lowest of
    /// their ordinals. Returns true when the sample selection was replaced.
    pub fn end_well_drag(
        &mut self,
        assignments: &AssignmentMap,
        registry: &SampleRegistry,
    ) -> bool {
        let Some(gesture) = self.drag.take() else {
            return false;
        };
        if gesture.well_count() <= 1 {
            return false;
        }

        let found = registry.in_registry_order(assignments.occupants(&self.wells));
        let Some(first) = found.first() else {
            log::debug!("🔲 Well drag ended over {} empty wells", self.wells.len());
            return false;
        };

        self.anchor = registry.get(first.as_str()).map(|s| s.ordinal);
        log::debug!(
            "🔲 Well drag selected {} samples from {} wells",
            found.len(),
            self.wells.len()
        );
        self.replace_samples(found);
        true
    }

    /// Abandon the active gesture without touching the sample selection.
    pub fn cancel_well_drag(&mut self) {
        if self.drag.take().is_some() {
            log::debug!("🔲 Well drag cancelled");
        }
    }
}
