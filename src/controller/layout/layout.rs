use serde::Serialize;

use crate::domain::events::GridEvent;
use crate::domain::fields::FieldKey;
use crate::env::Ticker;
use crate::spatial::compute_dimensions;

use super::{fields, GridController};

/// Largest multiple inside the grid and the one after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HighMultiple {
    pub highest: u32,
    pub next: u32,
}

pub fn high_multiple_pair(multiple: u32, cell_count: u32) -> HighMultiple {
    let multiple = multiple.max(1);
    let highest = cell_count - cell_count % multiple;
    HighMultiple {
        highest,
        next: highest + multiple,
    }
}

/// CSS `grid-template-columns`, wide enough for the longest number.
pub fn template_columns(columns: u32, cell_count: u32, slack_em: f64, padding_em: f64) -> String {
    let digits = cell_count.to_string().len() as f64;
    let width = ((digits + slack_em + 2.0 * padding_em) * 1000.0).round() / 1000.0;
    format!("repeat({}, {}em)", columns, width)
}

pub fn rows_label(rows: u32) -> String {
    format!("Rows: {}", rows)
}

/// Recompute rows and columns from the cell count. No-op unless columns
/// are computed and the cell count is valid.
pub(super) fn apply_dims<T: Ticker>(grid: &mut GridController<T>) {
    if !grid.config.columns_are_computed || !grid.validator.is_valid(FieldKey::CellCount) {
        return;
    }
    let dims = compute_dimensions(
        grid.config.cell_count,
        grid.options.column_leeway,
        grid.config.max_columns,
    );
    grid.config.row_count = Some(dims.rows);
    grid.config.column_count = Some(dims.columns);
    grid.field_values
        .insert(FieldKey::ColumnCount, dims.columns.to_string());
}

/// Rebuild the grid from the current configuration and fit the highlights
/// into it. An undrawable configuration replaces the grid with nothing and
/// leaves the highlights for when it becomes drawable again.
pub(super) fn redraw<T: Ticker>(grid: &mut GridController<T>) {
    let config = &grid.config;
    let drawable = grid.validator.is_valid(FieldKey::CellCount)
        && grid.validator.is_valid(FieldKey::ColumnCount)
        && config.row_count.is_some()
        && config.column_count.is_some();

    if !drawable {
        log::debug!("grid not drawable, clearing it");
        grid.events.push(GridEvent::GridReplaced {
            cells: None,
            rows: None,
            columns: None,
        });
        return;
    }

    log::debug!(
        "drawing {} cells as {:?} x {:?}",
        config.cell_count,
        config.row_count,
        config.column_count
    );
    grid.events.push(GridEvent::GridReplaced {
        cells: Some(config.cell_count),
        rows: config.row_count,
        columns: config.column_count,
    });
    let run = grid.run();
    grid.engine.reconcile(&mut grid.anim, run, &mut grid.events);
}

/// Re-run the layout from the current field values.
pub(super) fn recalculate_dims<T: Ticker>(grid: &mut GridController<T>) {
    apply_dims(grid);
    fields::validate_column_count(grid);
    redraw(grid);
    fields::refresh_state(grid);
}
