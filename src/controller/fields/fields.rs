//! Field edits: validation, dependent revalidation and the error state.
//!
//! Multiple and column count are bounded by the cell count, so a cell count
//! change always revalidates both. While any field is invalid the state is
//! `InputErr` and focus sits on the first invalid field.

use serde::Serialize;

use crate::domain::events::GridEvent;
use crate::domain::fields::FieldKey;
use crate::domain::state::GridState;
use crate::env::Ticker;
use crate::spatial::row_count_from_columns;
use crate::systems::CountRule;

use super::{layout, GridController};

/// Verdict on a field after an edit, for the view to render next to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldOutcome {
    pub key: FieldKey,
    pub valid: bool,
    pub message: Option<String>,
}

fn outcome<T: Ticker>(grid: &GridController<T>, key: FieldKey) -> FieldOutcome {
    FieldOutcome {
        key,
        valid: grid.validator.is_valid(key),
        message: grid.validator.map().message(key).map(str::to_string),
    }
}

fn text<T: Ticker>(grid: &GridController<T>, key: FieldKey) -> String {
    grid.field_values.get(&key).cloned().unwrap_or_default()
}

pub(super) fn on_field_changed<T: Ticker>(
    grid: &mut GridController<T>,
    key: FieldKey,
    raw: &str,
) -> FieldOutcome {
    if key == FieldKey::ColumnCount && grid.config.columns_are_computed {
        log::warn!("column count edit ignored: columns are computed");
        return outcome(grid, key);
    }

    log::debug!("{} changed to '{}'", key, raw);
    if key != FieldKey::Speed {
        pause_if_running(grid);
    }
    grid.field_values.insert(key, raw.to_string());

    match key {
        FieldKey::CellCount => {
            if validate_cell_count(grid) {
                for dependent in key.dependents() {
                    revalidate(grid, *dependent);
                }
            }
            layout::redraw(grid);
        }
        FieldKey::Multiple => {
            if validate_multiple(grid) {
                // A new multiple invalidates every highlight
                let run = grid.run();
                grid.engine
                    .reset(&mut grid.anim, run, GridState::Initialise, &mut grid.events);
            }
        }
        FieldKey::Speed => validate_speed(grid),
        FieldKey::ColumnCount => {
            validate_column_count(grid);
            layout::redraw(grid);
        }
    }

    refresh_state(grid);
    outcome(grid, key)
}

pub(super) fn on_compute_columns_toggled<T: Ticker>(grid: &mut GridController<T>, on: bool) {
    if grid.config.columns_are_computed == on {
        return;
    }
    log::debug!("compute columns: {}", on);
    pause_if_running(grid);
    grid.config.columns_are_computed = on;

    // Switching off keeps the last computed value as the editable start
    if on {
        layout::apply_dims(grid);
    }
    validate_column_count(grid);
    layout::redraw(grid);
    refresh_state(grid);
}

fn revalidate<T: Ticker>(grid: &mut GridController<T>, key: FieldKey) -> bool {
    match key {
        FieldKey::CellCount => validate_cell_count(grid),
        FieldKey::Multiple => validate_multiple(grid),
        FieldKey::Speed => {
            validate_speed(grid);
            grid.validator.is_valid(FieldKey::Speed)
        }
        FieldKey::ColumnCount => validate_column_count(grid),
    }
}

/// Validate every field in priority order, as on initialisation.
pub(super) fn validate_all<T: Ticker>(grid: &mut GridController<T>) -> bool {
    for key in FieldKey::ORDER {
        revalidate(grid, key);
    }
    grid.validator.all_valid()
}

fn validate_cell_count<T: Ticker>(grid: &mut GridController<T>) -> bool {
    let rule = CountRule::range(1, grid.options.max_cell_count);
    let raw = text(grid, FieldKey::CellCount);
    match grid
        .validator
        .validate_count_field(FieldKey::CellCount, &raw, &rule)
    {
        Ok(cell_count) => {
            grid.config.cell_count = cell_count;
            layout::apply_dims(grid);
            true
        }
        Err(err) => {
            log::debug!("{}", err);
            // Derived values are meaningless without a cell count
            grid.config.row_count = None;
            if grid.config.columns_are_computed {
                grid.config.column_count = None;
            }
            false
        }
    }
}

fn validate_multiple<T: Ticker>(grid: &mut GridController<T>) -> bool {
    let upper = grid
        .validator
        .is_valid(FieldKey::CellCount)
        .then_some(grid.config.cell_count);
    let rule = CountRule::max(upper);
    let raw = text(grid, FieldKey::Multiple);
    match grid
        .validator
        .validate_count_field(FieldKey::Multiple, &raw, &rule)
    {
        Ok(multiple) => {
            if multiple != grid.config.multiple {
                log::debug!("multiple {} -> {}", grid.config.multiple, multiple);
                grid.config.multiple = multiple;
                let run = grid.run();
                grid.engine
                    .reset(&mut grid.anim, run, GridState::Initialise, &mut grid.events);
            }
            true
        }
        Err(err) => {
            log::debug!("{}", err);
            false
        }
    }
}

fn validate_speed<T: Ticker>(grid: &mut GridController<T>) {
    let rule = CountRule::range(grid.options.min_speed, grid.options.max_speed);
    let raw = text(grid, FieldKey::Speed);
    match grid
        .validator
        .validate_count_field(FieldKey::Speed, &raw, &rule)
    {
        // An unchanged speed keeps its interval (660ms reads back as 50)
        Ok(speed) if speed == grid.speed.displayed() => {}
        Ok(speed) => grid.speed.set_displayed(speed),
        Err(err) => {
            log::debug!("{}; falling back to the slowest speed", err);
            grid.speed.set_displayed(grid.options.min_speed);
        }
    }
}

pub(super) fn validate_column_count<T: Ticker>(grid: &mut GridController<T>) -> bool {
    let cell_count_valid = grid.validator.is_valid(FieldKey::CellCount);
    let upper = if cell_count_valid {
        grid.config.cell_count.min(grid.options.max_column_input)
    } else {
        grid.options.max_column_input
    };
    let rule = CountRule::max(Some(upper));
    let raw = text(grid, FieldKey::ColumnCount);
    match grid
        .validator
        .validate_count_field(FieldKey::ColumnCount, &raw, &rule)
    {
        Ok(columns) => {
            if cell_count_valid {
                grid.config.column_count = Some(columns);
                grid.config.row_count = Some(row_count_from_columns(columns, grid.config.cell_count));
            }
            true
        }
        Err(err) => {
            log::debug!("{}", err);
            grid.config.row_count = None;
            if !grid.config.columns_are_computed {
                grid.config.column_count = None;
            }
            false
        }
    }
}

/// Enter or leave `InputErr` to match the validity map.
pub(super) fn refresh_state<T: Ticker>(grid: &mut GridController<T>) {
    match grid.validator.first_invalid_key() {
        None => {
            grid.focus = None;
            let run = grid.run();
            grid.engine.recover(&mut grid.anim, run, &mut grid.events);
        }
        Some(first) => {
            log::debug!("first invalid field: {}", first);
            grid.engine.fail(&mut grid.anim, &mut grid.events);
            grid.focus = Some(first);
            grid.events.push(GridEvent::Focus { field: first });
        }
    }
}

/// Editing the grid freezes a running count first.
pub(super) fn pause_if_running<T: Ticker>(grid: &mut GridController<T>) {
    if grid.anim.state.is_running() {
        log::debug!("pausing for a configuration change");
        let run = grid.run();
        grid.engine.pause(&mut grid.anim, run, &mut grid.events);
    }
}
