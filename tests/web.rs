#![cfg(target_arch = "wasm32")]

use countalong_engine::CountGrid;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn facade_reports_the_default_grid() {
    let grid = CountGrid::new(None).expect("default options");
    assert_eq!(grid.state(), "Initialise");

    let snapshot = grid.snapshot_json().expect("snapshot serializes");
    assert!(snapshot.contains(r#""column_count":10"#));

    let events = grid.drain_events_json().expect("events serialize");
    assert!(events.contains(r#""kind":"grid-replaced""#));
    assert_eq!(grid.drain_events_json().expect("events serialize"), "[]");
}

#[wasm_bindgen_test]
fn facade_validates_fields_by_name() {
    let grid = CountGrid::new(None).expect("default options");
    let outcome = grid.on_field_changed("multiple", "abc").expect("known field");
    assert!(outcome.contains(r#""valid":false"#));
    assert_eq!(grid.state(), "InputErr");
    assert!(grid.on_field_changed("rows", "3").is_err());
}

#[wasm_bindgen_test]
fn facade_starts_and_pauses_the_interval() {
    let grid = CountGrid::new(Some(r#"{"init_cell_count": 20}"#.to_string())).expect("options");
    assert!(grid.on_start());
    assert_eq!(grid.state(), "Animate");
    grid.on_pause();
    assert_eq!(grid.state(), "Pause");
}

#[wasm_bindgen_test]
fn facade_rejects_bad_options() {
    assert!(CountGrid::new(Some("{".to_string())).is_err());
}
