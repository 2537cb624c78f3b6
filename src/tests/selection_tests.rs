//! Tests for sample and well selection through the session.

use super::init_logger;
use crate::model::{SampleId, SampleRegistry, WellId};
use crate::selection::SelectMode;
use crate::session::PlateSession;

fn w(id: &str) -> WellId {
    WellId::parse(id).unwrap()
}

fn selected(session: &PlateSession) -> Vec<String> {
    session
        .selected_sample_ids()
        .iter()
        .map(|id| id.as_str().to_string())
        .collect()
}

#[test]
fn test_range_select_from_anchor_five_to_two() {
    init_logger();
    let mut session = PlateSession::new(SampleRegistry::generated(20));

    // S6 has ordinal 5
    session.toggle_sample_select("S6", false, false).unwrap();
    session.toggle_sample_select("S3", false, true).unwrap();

    assert_eq!(selected(&session), vec!["S3", "S4", "S5", "S6"]);
    assert_eq!(session.selection().anchor(), Some(5));
}

#[test]
fn test_chained_range_selects_pivot_on_same_anchor() {
    let mut session = PlateSession::new(SampleRegistry::generated(20));
    session.select_sample("S10", SelectMode::Replace).unwrap();
    session.select_sample("S12", SelectMode::Range).unwrap();
    session.select_sample("S8", SelectMode::Range).unwrap();
    assert_eq!(selected(&session), vec!["S8", "S9", "S10"]);

    session.select_sample("S15", SelectMode::Toggle).unwrap();
    session.select_sample("S17", SelectMode::RangeExtend).unwrap();
    assert_eq!(
        selected(&session),
        vec!["S8", "S9", "S10", "S15", "S16", "S17"]
    );
}

#[test]
fn test_display_order_ignores_click_order() {
    let mut session = PlateSession::new(SampleRegistry::generated(20));
    for id in ["S9", "S2", "S14", "S1"] {
        session.toggle_sample_select(id, true, false).unwrap();
    }
    assert_eq!(selected(&session), vec!["S1", "S2", "S9", "S14"]);
}

#[test]
fn test_clear_sample_selection_keeps_anchor_for_next_range() {
    let mut session = PlateSession::new(SampleRegistry::generated(20));
    session.toggle_sample_select("S4", false, false).unwrap();
    session.clear_sample_selection();
    assert!(selected(&session).is_empty());

    session.toggle_sample_select("S6", false, true).unwrap();
    assert_eq!(selected(&session), vec!["S4", "S5", "S6"]);
}

#[test]
fn test_rectangle_drag_b3_to_d5() {
    let mut session = PlateSession::default();
    assert!(session.begin_well_drag("B3").unwrap());
    assert!(session.extend_well_drag("D5").unwrap());
    session.end_well_drag();

    let expected: Vec<WellId> = ["B3", "B4", "B5", "C3", "C4", "C5", "D3", "D4", "D5"]
        .into_iter()
        .map(w)
        .collect();
    assert_eq!(session.selected_well_ids(), expected);
    assert!(!session.is_well_dragging());
}

#[test]
fn test_rectangle_shrinks_when_pointer_moves_back() {
    let mut session = PlateSession::default();
    session.begin_well_drag("C3").unwrap();
    session.extend_well_drag("A1").unwrap();
    assert_eq!(session.selected_well_ids().len(), 9);
    session.extend_well_drag("C4").unwrap();
    assert_eq!(session.selected_well_ids(), vec![w("C3"), w("C4")]);
    session.cancel_well_drag();
    assert_eq!(session.selected_well_ids().len(), 2);
}

#[test]
fn test_rectangle_drag_selects_placed_samples() {
    let mut session = PlateSession::default();
    session.place("A1", "S40").unwrap();
    session.place("A2", "S12").unwrap();
    session.place("B2", "S40").unwrap();
    session.place("E5", "S1").unwrap();

    session.toggle_sample_select("S100", false, false).unwrap();
    session.begin_well_drag("B2").unwrap();
    session.extend_well_drag("A1").unwrap();
    assert!(session.end_well_drag());

    assert_eq!(
        session.selected_sample_ids(),
        vec![SampleId::from("S12"), SampleId::from("S40")]
    );
    assert_eq!(session.selection().anchor(), Some(11));
}

#[test]
fn test_invalid_well_rejected_without_side_effects() {
    let mut session = PlateSession::default();
    session.toggle_well_select("A1", false).unwrap();
    for bad in ["", "a1", "A0", "A01", "I1", "A13", "B 2"] {
        let err = session.toggle_well_select(bad, true).unwrap_err();
        assert!(err.is_invalid_identifier(), "{bad:?} should be rejected");
        assert!(session.begin_well_drag(bad).is_err());
    }
    assert_eq!(session.selected_well_ids(), vec![w("A1")]);
    assert!(!session.is_well_dragging());
}
