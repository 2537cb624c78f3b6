//! Bulk fill algorithms.
//!
//! Both fills map samples in registry order onto wells in geometry order and
//! overwrite whatever the target wells held before.

use crate::assignment::AssignmentMap;
use crate::constants::WELL_COUNT;
use crate::geometry::{FillOrder, rotate_from};
use crate::model::{SampleId, WellId};

/// Whether a full-plate fill is allowed for this many selected samples.
pub fn can_fill(selected_count: usize) -> bool {
    selected_count == WELL_COUNT
}

/// Fill the whole plate from `start`, wrapping around, one sample per well.
///
/// `samples` must already be in registry order and hold exactly one sample per
/// well; otherwise nothing happens and `false` is returned.
pub fn fill_plate(
    assignments: &mut AssignmentMap,
    samples: &[SampleId],
    order: FillOrder,
    start: WellId,
) -> bool {
    if !can_fill(samples.len()) {
        log::debug!(
            "Fill skipped: {} samples selected, {} required",
            samples.len(),
            WELL_COUNT
        );
        return false;
    }

    let wells = rotate_from(&order.wells(), start);
    for (well, sample) in wells.into_iter().zip(samples) {
        assignments.place(well, sample.clone());
    }
    log::info!("🧪 Filled plate by {} from {}", order.name(), start);
    true
}

/// Place `samples` into consecutive wells starting at `start`, without wrapping.
///
/// Stops when either the samples or the remaining wells run out. Returns the
/// number of wells written.
pub fn fill_forward(
    assignments: &mut AssignmentMap,
    samples: &[SampleId],
    order: FillOrder,
    start: WellId,
) -> usize {
    let wells = order.wells();
    let Some(offset) = wells.iter().position(|&w| w == start) else {
        return 0;
    };

    let mut placed = 0;
    for (&well, sample) in wells[offset..].iter().zip(samples) {
        assignments.place(well, sample.clone());
        placed += 1;
    }

    if placed < samples.len() {
        log::debug!(
            "Forward fill from {} stopped at plate end: {} of {} samples placed",
            start,
            placed,
            samples.len()
        );
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{column_major_order, row_major_order};

    fn w(id: &str) -> WellId {
        WellId::parse(id).unwrap()
    }

    fn samples(n: usize) -> Vec<SampleId> {
        (1..=n).map(|i| SampleId::new(format!("S{i}"))).collect()
    }

    #[test]
    fn test_fill_plate_rows_from_a1() {
        let mut map = AssignmentMap::new();
        let ids = samples(WELL_COUNT);
        assert!(fill_plate(&mut map, &ids, FillOrder::Rows, w("A1")));
        assert_eq!(map.occupant_of(w("A1")), Some(&ids[0]));
        assert_eq!(map.occupant_of(w("A12")), Some(&ids[11]));
        assert_eq!(map.occupant_of(w("H12")), Some(&ids[95]));
        assert_eq!(map.unassigned_count(), 0);
    }

    #[test]
    fn test_fill_plate_columns_wraps_from_start() {
        let mut map = AssignmentMap::new();
        let ids = samples(WELL_COUNT);
        assert!(fill_plate(&mut map, &ids, FillOrder::Columns, w("A2")));
        assert_eq!(map.occupant_of(w("A2")), Some(&ids[0]));
        assert_eq!(map.occupant_of(w("B2")), Some(&ids[1]));
        // H12 is the last column-major well; A1 follows it after wrapping.
        assert_eq!(map.occupant_of(w("H12")), Some(&ids[87]));
        assert_eq!(map.occupant_of(w("A1")), Some(&ids[88]));
        assert_eq!(map.occupant_of(w("H1")), Some(&ids[95]));
    }

    #[test]
    fn test_fill_plate_requires_full_selection() {
        let mut map = AssignmentMap::new();
        map.place(w("C3"), SampleId::from("keep"));
        assert!(!fill_plate(&mut map, &samples(95), FillOrder::Rows, w("A1")));
        assert!(!fill_plate(&mut map, &samples(97), FillOrder::Rows, w("A1")));
        assert_eq!(map.len(), 1);
        assert!(can_fill(WELL_COUNT));
        assert!(!can_fill(0));
    }

    #[test]
    fn test_fill_plate_overwrites_existing() {
        let mut map = AssignmentMap::new();
        map.place(w("A1"), SampleId::from("old"));
        fill_plate(&mut map, &samples(WELL_COUNT), FillOrder::Rows, w("A1"));
        assert_eq!(map.occupant_of(w("A1")).map(SampleId::as_str), Some("S1"));
        assert_eq!(map.len(), WELL_COUNT);
    }

    #[test]
    fn test_fill_forward_stops_at_plate_end() {
        let mut map = AssignmentMap::new();
        let order = row_major_order();
        let ids = samples(3);
        let placed = fill_forward(&mut map, &ids, FillOrder::Rows, order[94]);
        assert_eq!(placed, 2);
        assert_eq!(map.occupant_of(order[94]), Some(&ids[0]));
        assert_eq!(map.occupant_of(order[95]), Some(&ids[1]));
        assert_eq!(map.occupant_of(order[0]), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_fill_forward_in_column_order() {
        let mut map = AssignmentMap::new();
        let ids = samples(4);
        let placed = fill_forward(&mut map, &ids, FillOrder::Columns, w("G1"));
        assert_eq!(placed, 4);
        let order = column_major_order();
        assert_eq!(map.occupant_of(order[6]), Some(&ids[0]));
        assert_eq!(map.occupant_of(w("H1")), Some(&ids[1]));
        assert_eq!(map.occupant_of(w("A2")), Some(&ids[2]));
        assert_eq!(map.occupant_of(w("B2")), Some(&ids[3]));
    }
}
