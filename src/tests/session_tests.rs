//! Tests for assignment commands and message dispatch.

use super::init_logger;
use crate::constants::{COLS, ROWS, WELL_COUNT};
use crate::error::PlateError;
use crate::geometry::{Direction, FillOrder, step};
use crate::message::PlateMessage;
use crate::model::{SampleId, SampleRegistry, WellId};
use crate::selection::SelectMode;
use crate::session::PlateSession;

fn w(id: &str) -> WellId {
    WellId::parse(id).unwrap()
}

fn msg_select(id: &str, mode: SelectMode) -> PlateMessage {
    PlateMessage::SelectSample {
        id: id.to_string(),
        mode,
    }
}

#[test]
fn test_place_overwrites_last_write_wins() {
    let mut session = PlateSession::default();
    session.place("A1", "S1").unwrap();
    assert_eq!(session.place("A1", "S2").unwrap(), Some(SampleId::from("S1")));
    assert_eq!(session.occupant_of("A1").unwrap().map(SampleId::as_str), Some("S2"));
}

#[test]
fn test_clear_is_idempotent_and_clear_all_resets_count() {
    let mut session = PlateSession::default();
    session.place("F7", "S3").unwrap();
    assert!(session.clear("F7").unwrap().is_some());
    assert_eq!(session.occupant_of("F7").unwrap(), None);
    assert!(session.clear("F7").unwrap().is_none());
    assert_eq!(session.occupant_of("F7").unwrap(), None);

    session.fill_row(0, "S1").unwrap();
    session.fill_column(11, "S2").unwrap();
    assert_eq!(session.unassigned_count(), WELL_COUNT - (COLS + ROWS - 1));
    assert_eq!(session.clear_all(), COLS + ROWS - 1);
    assert_eq!(session.unassigned_count(), WELL_COUNT);
}

#[test]
fn test_row_and_column_bounds() {
    let mut session = PlateSession::default();
    assert_eq!(session.fill_row(ROWS, "S1"), Err(PlateError::InvalidRow(ROWS)));
    assert_eq!(
        session.fill_column(COLS, "S1"),
        Err(PlateError::InvalidColumn(COLS))
    );
    assert_eq!(
        session.fill_row(0, "missing"),
        Err(PlateError::UnknownSample("missing".to_string()))
    );
    assert_eq!(session.clear_row(ROWS), Err(PlateError::InvalidRow(ROWS)));
    assert_eq!(session.clear_column(COLS), Err(PlateError::InvalidColumn(COLS)));
    assert!(session.assignments().is_empty());
}

#[test]
fn test_same_sample_may_occupy_many_wells() {
    let mut session = PlateSession::default();
    session.fill_column(3, "S8").unwrap();
    assert_eq!(session.wells_holding("S8").unwrap().len(), ROWS);
    assert_eq!(session.placed_samples().len(), 1);
}

#[test]
fn test_keyboard_focus_walk_and_place() {
    let mut session = PlateSession::default();
    session.toggle_sample_select("S5", false, false).unwrap();

    let mut focus = w("A1");
    for direction in [Direction::Up, Direction::Left, Direction::Right, Direction::Down] {
        focus = step(focus, direction);
    }
    assert_eq!(focus, w("B2"));
    assert!(session.place_first_selected(&focus.to_string()).unwrap());
    assert_eq!(session.occupant_of("B2").unwrap().map(SampleId::as_str), Some("S5"));

    assert!(session.fill_row_at("B2", false).unwrap());
    assert_eq!(session.wells_holding("S5").unwrap().len(), COLS);
}

#[test]
fn test_message_flow_matches_direct_calls() {
    init_logger();
    let mut by_message = PlateSession::new(SampleRegistry::generated(30));
    let mut direct = PlateSession::new(SampleRegistry::generated(30));

    let messages = vec![
        msg_select("S3", SelectMode::Replace),
        msg_select("S7", SelectMode::Range),
        PlateMessage::SetFillOrder(FillOrder::Columns),
        PlateMessage::BeginSampleDrag("S4".to_string()),
        PlateMessage::EndSampleDrag {
            drop: Some("C1".to_string()),
        },
        PlateMessage::WellPointerDown {
            well: "C1".to_string(),
            multi: false,
        },
        PlateMessage::ExtendWellDrag("D1".to_string()),
        PlateMessage::EndWellDrag,
        PlateMessage::ClearSelectedWells,
    ];
    let mut last = None;
    for message in messages {
        last = Some(by_message.update(message).unwrap());
    }

    direct.toggle_sample_select("S3", false, false).unwrap();
    direct.toggle_sample_select("S7", false, true).unwrap();
    direct.set_fill_order(FillOrder::Columns);
    direct.begin_sample_drag("S4").unwrap();
    direct.end_sample_drag(Some("C1")).unwrap();
    direct.well_pointer_down("C1", false).unwrap();
    direct.extend_well_drag("D1").unwrap();
    direct.end_well_drag();
    direct.clear_selected_wells();

    let last = last.unwrap();
    assert_eq!(last, direct.snapshot());
    // S3..S7 dropped at C1 down column 1, then C1:D1 selected and cleared
    assert_eq!(last.assignments.len(), 3);
    assert_eq!(last.occupant_of(w("E1")).map(SampleId::as_str), Some("S5"));
    assert_eq!(
        last.selected_samples,
        vec![SampleId::from("S3"), SampleId::from("S4")]
    );
    assert!(last.selected_wells.is_empty());
    assert!(!last.well_drag_active);
    assert_eq!(last.dragged_sample, None);
}

#[test]
fn test_rejected_message_leaves_state_untouched() {
    let mut session = PlateSession::default();
    let before = session
        .update(PlateMessage::Place {
            well: "D4".to_string(),
            sample: "S1".to_string(),
        })
        .unwrap();

    let rejected = [
        PlateMessage::Place {
            well: "D4".to_string(),
            sample: "nobody".to_string(),
        },
        PlateMessage::ClearWells(vec!["D4".to_string(), "D99".to_string()]),
        PlateMessage::SetStartWell("Z1".to_string()),
        PlateMessage::FillRowAt {
            well: "".to_string(),
            clear: true,
        },
        msg_select("S0", SelectMode::Toggle),
    ];
    for message in rejected {
        assert!(session.update(message).unwrap_err().is_invalid_identifier());
    }
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_custom_registry_rejects_duplicates() {
    let err = SampleRegistry::new([("a", "Alpha"), ("b", "Beta"), ("a", "Again")]).unwrap_err();
    assert_eq!(err, PlateError::DuplicateSample("a".to_string()));
    assert!(!err.is_invalid_identifier());

    let registry = SampleRegistry::new([("x", "X"), ("y", "Y")]).unwrap();
    let mut session = PlateSession::new(registry);
    session.select_plate_batch();
    assert_eq!(session.selected_sample_ids().len(), 2);
    assert!(!session.can_fill());
}
