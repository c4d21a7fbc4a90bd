use std::collections::BTreeMap;

use crate::domain::config::GridOptions;
use crate::domain::events::GridEvent;
use crate::domain::fields::FieldKey;
use crate::domain::state::GridState;
use crate::env::Ticker;
use crate::systems::{AnimationEngine, AnimationState, FontScale, SpeedBounds, SpeedSetting, Validator};

use super::{fields, layout, GridConfiguration, GridController};

fn initial_configuration(options: &GridOptions, max_columns: u32) -> GridConfiguration {
    GridConfiguration {
        cell_count: options.init_cell_count,
        multiple: options.init_multiple,
        column_count: None,
        row_count: None,
        columns_are_computed: options.init_compute_columns,
        max_columns,
    }
}

pub(super) fn create_controller<T: Ticker>(options: GridOptions, ticker: T) -> GridController<T> {
    let mut grid = GridController {
        config: initial_configuration(&options, options.max_columns),
        field_values: BTreeMap::new(),
        validator: Validator::new(),
        speed: SpeedSetting::new(SpeedBounds::from_options(&options), options.default_interval_ms),
        font: FontScale::from_options(&options),
        show_high_multiple: options.init_show_high_multiple,
        breakpoint: None,
        focus: None,
        anim: AnimationState::new(options.init_multiple),
        engine: AnimationEngine::new(ticker),
        events: Vec::new(),
        options,
    };
    reinitialise(&mut grid);
    grid
}

/// Reset everything but the viewport-derived column cap to the initial
/// options.
pub(super) fn reinitialise<T: Ticker>(grid: &mut GridController<T>) {
    grid.engine.halt();

    let max_columns = grid
        .breakpoint
        .map(|bp| bp.max_columns())
        .unwrap_or(grid.options.max_columns);
    grid.config = initial_configuration(&grid.options, max_columns);

    log::info!(
        "initialising grid: {} cells in multiples of {} (computed columns: {})",
        grid.config.cell_count,
        grid.config.multiple,
        grid.config.columns_are_computed
    );

    grid.anim = AnimationState::new(grid.options.init_multiple);
    grid.validator.reset();
    grid.speed.reset(grid.options.default_interval_ms);
    grid.font = FontScale::from_options(&grid.options);
    grid.show_high_multiple = grid.options.init_show_high_multiple;
    grid.focus = None;

    grid.field_values.clear();
    grid.field_values
        .insert(FieldKey::CellCount, grid.options.init_cell_count.to_string());
    grid.field_values
        .insert(FieldKey::Multiple, grid.options.init_multiple.to_string());
    grid.field_values
        .insert(FieldKey::Speed, grid.speed.displayed().to_string());
    // Overwritten by the layout when columns are computed
    grid.field_values
        .insert(FieldKey::ColumnCount, grid.options.init_column_count.to_string());

    fields::validate_all(grid);

    grid.events.push(GridEvent::ScrollReset);
    grid.events.push(GridEvent::StateChanged {
        state: GridState::Initialise,
    });
    layout::redraw(grid);
    fields::refresh_state(grid);
}
