use super::*;
use crate::env::ManualTicker;
use crate::systems::validator::MSG_ZERO;

fn grid() -> GridController<ManualTicker> {
    GridController::new(GridOptions::default(), ManualTicker::new())
}

fn ticks(grid: &mut GridController<ManualTicker>, n: usize) {
    for _ in 0..n {
        grid.on_tick();
    }
}

#[test]
fn default_grid_is_ten_by_ten() {
    let mut grid = grid();
    let config = grid.configuration();
    assert_eq!(config.cell_count, 100);
    assert_eq!(config.multiple, 5);
    assert_eq!(config.column_count, Some(10));
    assert_eq!(config.row_count, Some(10));
    assert_eq!(grid.state(), GridState::Initialise);
    assert_eq!(grid.field_value(FieldKey::ColumnCount), Some("10"));
    assert_eq!(grid.speed().displayed(), 50);
    assert_eq!(grid.speed().interval_ms(), 660);

    assert_eq!(
        grid.drain_events(),
        vec![
            GridEvent::ScrollReset,
            GridEvent::StateChanged {
                state: GridState::Initialise
            },
            GridEvent::GridReplaced {
                cells: Some(100),
                rows: Some(10),
                columns: Some(10),
            },
        ]
    );
}

#[test]
fn counts_to_completion_and_disables_pause() {
    let mut grid = grid();
    assert!(grid.on_start());
    assert_eq!(grid.state(), GridState::Animate);
    assert_eq!(grid.ticker().active_interval(), Some(660));

    for i in 1..20u32 {
        assert_eq!(grid.on_tick(), Step::Stepped { highlighted: Some(5 * i) });
    }
    assert_eq!(grid.on_tick(), Step::Completed { highlighted: Some(100) });

    assert_eq!(grid.state(), GridState::Complete);
    assert!(!grid.ticker().is_active());
    assert_eq!(grid.animation().highlights.len(), 20);
    assert_eq!(grid.animation().highlights.last(), Some(100));

    let controls = grid.snapshot().controls;
    assert!(!controls.pause_enabled);
    assert_eq!(controls.start_label, "Restart");

    // Late ticks are ignored
    assert_eq!(grid.on_tick(), Step::Idle);
}

#[test]
fn first_tick_highlights_and_observes() {
    let mut grid = grid();
    grid.drain_events();
    grid.on_start();
    assert_eq!(
        grid.drain_events(),
        vec![
            GridEvent::ScrollReset,
            GridEvent::StateChanged {
                state: GridState::Animate
            },
        ]
    );
    grid.on_tick();
    assert_eq!(
        grid.drain_events(),
        vec![GridEvent::Highlight { cell: 5 }, GridEvent::Observe { cell: 5 }]
    );
}

#[test]
fn uneven_multiple_completes_past_the_end() {
    let mut grid = grid();
    grid.on_field_changed(FieldKey::CellCount, "10");
    grid.on_field_changed(FieldKey::Multiple, "3");
    grid.on_start();

    assert_eq!(grid.on_tick(), Step::Stepped { highlighted: Some(3) });
    assert_eq!(grid.on_tick(), Step::Stepped { highlighted: Some(6) });
    assert_eq!(grid.on_tick(), Step::Stepped { highlighted: Some(9) });
    assert_eq!(grid.on_tick(), Step::Completed { highlighted: None });
    assert_eq!(grid.animation().highlights.to_vec(), vec![3, 6, 9]);
    assert_eq!(grid.state(), GridState::Complete);
}

#[test]
fn pause_twice_is_harmless() {
    let mut grid = grid();
    grid.on_start();
    ticks(&mut grid, 2);

    grid.on_pause();
    grid.on_pause();
    assert_eq!(grid.state(), GridState::Pause);
    assert_eq!(grid.ticker().cancels(), 1);
    assert_eq!(grid.animation().highlights.to_vec(), vec![5, 10]);
}

#[test]
fn continue_resumes_from_the_cursor() {
    let mut grid = grid();
    grid.on_start();
    ticks(&mut grid, 3);

    assert!(!grid.on_pause_or_continue());
    assert_eq!(grid.state(), GridState::Pause);
    assert!(grid.snapshot().controls.pause_attention);

    assert!(grid.on_pause_or_continue());
    assert_eq!(grid.state(), GridState::Animate);
    assert_eq!(grid.on_tick(), Step::Stepped { highlighted: Some(20) });
}

#[test]
fn restart_from_pause_wipes_and_counts_again() {
    let mut grid = grid();
    grid.on_start();
    ticks(&mut grid, 2);
    grid.on_pause();
    grid.drain_events();

    assert!(grid.on_start());
    let events = grid.drain_events();
    assert!(events.contains(&GridEvent::Unhighlight { cell: 5 }));
    assert!(events.contains(&GridEvent::Unobserve { cell: 10 }));
    assert!(events.contains(&GridEvent::StateChanged {
        state: GridState::Restart
    }));
    assert_eq!(
        events.last(),
        Some(&GridEvent::StateChanged {
            state: GridState::Animate
        })
    );
    assert!(grid.animation().highlights.is_empty());
    assert_eq!(grid.on_tick(), Step::Stepped { highlighted: Some(5) });
}

#[test]
fn restart_after_completion_does_not_unobserve() {
    let mut grid = grid();
    grid.on_field_changed(FieldKey::CellCount, "10");
    grid.on_start();
    ticks(&mut grid, 2);
    assert_eq!(grid.state(), GridState::Complete);
    grid.drain_events();

    grid.on_start();
    let events = grid.drain_events();
    assert!(events.contains(&GridEvent::Unhighlight { cell: 10 }));
    assert!(!events.iter().any(|e| matches!(e, GridEvent::Unobserve { .. })));
}

#[test]
fn clear_passes_through_clear_to_initialise() {
    let mut grid = grid();
    grid.on_start();
    ticks(&mut grid, 2);
    grid.on_pause();
    grid.drain_events();

    grid.on_clear();
    let states: Vec<GridState> = grid
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GridEvent::StateChanged { state } => Some(state),
            _ => None,
        })
        .collect();
    assert_eq!(states, vec![GridState::Clear, GridState::Initialise]);
    assert!(grid.animation().highlights.is_empty());
    assert_eq!(grid.animation().cursor.current_cell, 0);
}

#[test]
fn editing_cell_count_pauses_a_running_count() {
    let mut grid = grid();
    grid.on_start();
    ticks(&mut grid, 2);

    grid.on_field_changed(FieldKey::CellCount, "60");
    assert_eq!(grid.state(), GridState::Pause);
    assert!(!grid.ticker().is_active());
    assert_eq!(grid.animation().highlights.to_vec(), vec![5, 10]);
}

#[test]
fn shrinking_mid_run_drops_and_completes() {
    let mut grid = grid();
    grid.on_start();
    ticks(&mut grid, 4);
    grid.drain_events();

    grid.on_field_changed(FieldKey::CellCount, "12");

    assert_eq!(grid.configuration().cell_count, 12);
    assert_eq!(grid.animation().highlights.to_vec(), vec![5, 10]);
    assert_eq!(grid.animation().cursor.last_highlight, Some(10));
    // 15 would be past the end
    assert_eq!(grid.state(), GridState::Complete);

    let events = grid.drain_events();
    assert!(events.contains(&GridEvent::Unobserve { cell: 15 }));
    assert!(events.contains(&GridEvent::Unobserve { cell: 20 }));
    assert!(events.contains(&GridEvent::Highlight { cell: 10 }));
}

#[test]
fn growing_a_completed_grid_makes_it_resumable() {
    let mut grid = grid();
    grid.on_field_changed(FieldKey::CellCount, "12");
    grid.on_start();
    ticks(&mut grid, 3);
    assert_eq!(grid.state(), GridState::Complete);

    grid.on_field_changed(FieldKey::CellCount, "20");
    assert_eq!(grid.state(), GridState::Pause);
    assert_eq!(grid.animation().highlights.to_vec(), vec![5, 10]);

    assert!(grid.on_pause_or_continue());
    assert_eq!(grid.on_tick(), Step::Stepped { highlighted: Some(15) });
    assert_eq!(grid.on_tick(), Step::Completed { highlighted: Some(20) });
}

#[test]
fn new_multiple_wipes_highlights() {
    let mut grid = grid();
    grid.on_start();
    ticks(&mut grid, 2);

    grid.on_field_changed(FieldKey::Multiple, "4");
    assert_eq!(grid.configuration().multiple, 4);
    assert!(grid.animation().highlights.is_empty());
    assert_eq!(grid.state(), GridState::Initialise);
}

#[test]
fn invalid_multiple_enters_input_error() {
    let mut grid = grid();
    grid.drain_events();

    let outcome = grid.on_field_changed(FieldKey::Multiple, "abc");
    assert!(!outcome.valid);
    assert!(outcome.message.is_some());
    assert_eq!(grid.state(), GridState::InputErr);
    assert_eq!(grid.focused_field(), Some(FieldKey::Multiple));
    assert!(grid.drain_events().contains(&GridEvent::Focus {
        field: FieldKey::Multiple
    }));

    // Run and settings controls are frozen
    assert!(!grid.on_start());
    grid.on_speed_up();
    assert_eq!(grid.speed().displayed(), 50);

    let outcome = grid.on_field_changed(FieldKey::Multiple, "4");
    assert!(outcome.valid);
    assert_eq!(grid.state(), GridState::Initialise);
    assert_eq!(grid.focused_field(), None);
}

#[test]
fn zero_cell_count_clears_the_grid() {
    let mut grid = grid();
    grid.drain_events();

    let outcome = grid.on_field_changed(FieldKey::CellCount, "0");
    assert_eq!(outcome.message.as_deref(), Some(MSG_ZERO));
    assert_eq!(grid.configuration().row_count, None);
    assert_eq!(grid.configuration().column_count, None);
    assert!(grid.drain_events().contains(&GridEvent::GridReplaced {
        cells: None,
        rows: None,
        columns: None,
    }));

    let snapshot = grid.snapshot();
    assert_eq!(snapshot.rows_label, None);
    assert_eq!(snapshot.template_columns, None);
    assert_eq!(snapshot.high_multiple, None);
    assert_eq!(snapshot.errors.len(), 1);

    grid.on_field_changed(FieldKey::CellCount, "30");
    assert_eq!(grid.state(), GridState::Initialise);
    assert!(grid.configuration().row_count.is_some());
}

#[test]
fn multiple_larger_than_cell_count_is_invalid() {
    let mut grid = grid();
    let outcome = grid.on_field_changed(FieldKey::Multiple, "101");
    assert_eq!(
        outcome.message.as_deref(),
        Some("Must be a number less than or equal to 100")
    );

    // Growing the grid fixes it
    grid.on_field_changed(FieldKey::CellCount, "200");
    assert!(grid.validity().is_valid(FieldKey::Multiple));
    assert_eq!(grid.configuration().multiple, 101);
}

#[test]
fn column_edits_ignored_while_computed() {
    let mut grid = grid();
    let outcome = grid.on_field_changed(FieldKey::ColumnCount, "7");
    assert!(outcome.valid);
    assert_eq!(grid.configuration().column_count, Some(10));
    assert_eq!(grid.field_value(FieldKey::ColumnCount), Some("10"));
}

#[test]
fn manual_columns_drive_the_row_count() {
    let mut grid = grid();
    grid.on_compute_columns_toggled(false);
    assert_eq!(grid.configuration().column_count, Some(10));
    assert!(grid.snapshot().controls.column_input_enabled);

    grid.drain_events();
    grid.on_field_changed(FieldKey::ColumnCount, "7");
    assert_eq!(grid.configuration().column_count, Some(7));
    assert_eq!(grid.configuration().row_count, Some(15));
    assert!(grid.drain_events().contains(&GridEvent::GridReplaced {
        cells: Some(100),
        rows: Some(15),
        columns: Some(7),
    }));

    let outcome = grid.on_field_changed(FieldKey::ColumnCount, "200");
    assert!(!outcome.valid);
    assert_eq!(grid.state(), GridState::InputErr);
    assert_eq!(grid.focused_field(), Some(FieldKey::ColumnCount));
    assert_eq!(grid.snapshot().template_columns, None);

    // Switching back on recomputes and clears the error
    grid.on_compute_columns_toggled(true);
    assert_eq!(grid.configuration().column_count, Some(10));
    assert_eq!(grid.state(), GridState::Initialise);
}

#[test]
fn speed_change_applies_on_next_continue() {
    let mut grid = grid();
    grid.on_start();
    grid.on_speed_up();
    assert_eq!(grid.speed().displayed(), 60);
    assert_eq!(grid.ticker().active_interval(), Some(660));
    assert_eq!(grid.state(), GridState::Animate);

    grid.on_pause_or_continue();
    grid.on_pause_or_continue();
    let interval = grid.speed().interval_ms();
    assert!(interval < 660);
    assert_eq!(grid.ticker().active_interval(), Some(interval));
}

#[test]
fn speed_reset_restores_the_default_interval() {
    let mut grid = grid();
    grid.on_slow_down();
    assert_eq!(grid.speed().displayed(), 40);
    grid.on_speed_reset();
    assert_eq!(grid.speed().interval_ms(), 660);
    assert_eq!(grid.field_value(FieldKey::Speed), Some("50"));
}

#[test]
fn slider_clears_an_invalid_speed() {
    let mut grid = grid();
    grid.on_field_changed(FieldKey::Speed, "abc");
    assert_eq!(grid.state(), GridState::InputErr);
    assert_eq!(grid.speed().displayed(), 1);
    assert_eq!(grid.speed().interval_ms(), 1200);

    grid.on_speed_changed(40);
    assert!(grid.validity().all_valid());
    assert_eq!(grid.state(), GridState::Initialise);
    assert_eq!(grid.field_value(FieldKey::Speed), Some("40"));
}

#[test]
fn font_size_steps_and_resets() {
    let mut grid = grid();
    grid.on_font_size_step(10.0);
    assert_eq!(
        grid.snapshot().font_size,
        "clamp(0.99rem, 2.2cqi + 0.44rem, 2.2rem)"
    );
    grid.on_font_size_reset();
    assert_eq!(
        grid.snapshot().font_size,
        "clamp(0.9rem, 2cqi + 0.4rem, 2rem)"
    );
}

#[test]
fn narrow_viewport_caps_the_columns() {
    let mut grid = grid();
    grid.on_viewport_width_changed(500);

    let config = grid.configuration().clone();
    assert_eq!(config.max_columns, 8);
    let (rows, columns) = (config.row_count.unwrap(), config.column_count.unwrap());
    assert!(columns <= 8);
    assert!(rows * columns >= 100);
    assert_eq!(grid.snapshot().breakpoint_class, Some("grid--diminutive-1"));

    grid.on_viewport_width_changed(1400);
    assert_eq!(grid.configuration().column_count, Some(10));
    assert_eq!(grid.configuration().row_count, Some(10));
}

#[test]
fn breakpoint_change_keeps_a_count_running() {
    let mut grid = grid();
    grid.on_start();
    ticks(&mut grid, 3);

    grid.on_viewport_breakpoint_changed(6);
    assert_eq!(grid.state(), GridState::Animate);
    assert!(grid.ticker().is_active());
    assert_eq!(grid.animation().highlights.len(), 3);
    assert!(grid.configuration().column_count.unwrap() <= 6);
}

#[test]
fn breakpoint_ignored_for_manual_columns() {
    let mut grid = grid();
    grid.on_compute_columns_toggled(false);
    grid.on_field_changed(FieldKey::ColumnCount, "20");
    grid.on_viewport_breakpoint_changed(6);
    assert_eq!(grid.configuration().max_columns, 6);
    assert_eq!(grid.configuration().column_count, Some(20));
}

#[test]
fn reload_restores_initial_values() {
    let mut grid = grid();
    grid.on_viewport_width_changed(500);
    grid.on_field_changed(FieldKey::CellCount, "37");
    grid.on_start();
    ticks(&mut grid, 2);
    grid.on_show_high_multiple_toggled(false);

    grid.on_reload();
    assert_eq!(grid.state(), GridState::Initialise);
    assert_eq!(grid.configuration().cell_count, 100);
    assert_eq!(grid.field_value(FieldKey::CellCount), Some("100"));
    assert!(grid.animation().highlights.is_empty());
    assert!(!grid.ticker().is_active());
    assert!(grid.snapshot().show_high_multiple);
    // The viewport did not change
    assert_eq!(grid.configuration().max_columns, 8);
}

#[test]
fn snapshot_labels() {
    let mut grid = grid();
    grid.on_field_changed(FieldKey::Multiple, "7");
    let snapshot = grid.snapshot();
    assert_eq!(
        snapshot.high_multiple,
        Some(HighMultiple {
            highest: 98,
            next: 105
        })
    );
    assert_eq!(snapshot.rows_label.as_deref(), Some("Rows: 10"));
    assert_eq!(snapshot.template_columns.as_deref(), Some("repeat(10, 3.7em)"));

    grid.on_show_high_multiple_toggled(false);
    assert_eq!(grid.snapshot().high_multiple, None);
}

#[test]
fn field_by_name_rejects_unknown_keys() {
    let mut grid = grid();
    assert!(grid.on_field_changed_by_name("rows", "3").is_err());
    let outcome = grid.on_field_changed_by_name("cell-count", " 64 ").unwrap();
    assert!(outcome.valid);
    assert_eq!(grid.configuration().column_count, Some(8));
}

#[test]
fn snapshot_serializes_for_the_view() {
    let grid = grid();
    let json = serde_json::to_value(grid.snapshot()).unwrap();
    assert_eq!(json["state"], "Initialise");
    assert_eq!(json["config"]["cell_count"], 100);
    assert_eq!(json["controls"]["start_label"], "Start");
    assert_eq!(json["field_values"]["cell-count"], "100");
}

// The browser handle drives the same controller; off wasm32 it runs without
// a tick callback and never starts a timer.
#[cfg(not(target_arch = "wasm32"))]
#[test]
fn count_grid_handle_reports_json() {
    let handle = CountGrid::new(None).ok().expect("default options build");
    assert_eq!(handle.state(), "Initialise");
    handle.set_on_change(None);

    let outcome = handle
        .on_field_changed("multiple", "abc")
        .ok()
        .expect("known field");
    let outcome: serde_json::Value = serde_json::from_str(&outcome).unwrap();
    assert_eq!(outcome["key"], "multiple");
    assert_eq!(outcome["valid"], false);
    assert_eq!(handle.state(), "InputErr");

    handle.on_field_changed("multiple", "3").ok().expect("known field");
    handle.on_pause();
    assert_eq!(handle.state(), "Initialise");

    let snapshot = handle.snapshot_json().ok().expect("snapshot");
    let snapshot: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(snapshot["config"]["multiple"], 3);

    let events = handle.drain_events_json().ok().expect("events");
    assert!(events.starts_with('['));
    assert_eq!(handle.drain_events_json().ok().as_deref(), Some("[]"));
}
