use crate::domain::fields::FieldKey;
use crate::env::Ticker;
use crate::spatial::Breakpoint;
use crate::systems::FontScale;

use super::{fields, layout, GridController};

/// Speed and font buttons are frozen while any field is invalid.
fn settings_enabled<T: Ticker>(grid: &GridController<T>, what: &str) -> bool {
    let enabled = grid.validator.all_valid();
    if !enabled {
        log::warn!("{} ignored: a field is invalid", what);
    }
    enabled
}

fn sync_speed_field<T: Ticker>(grid: &mut GridController<T>) {
    grid.field_values
        .insert(FieldKey::Speed, grid.speed.displayed().to_string());
}

/// The running timer keeps its period until the next start or continue.
pub(super) fn speed_step<T: Ticker>(grid: &mut GridController<T>, delta: i32) {
    if !settings_enabled(grid, "speed change") {
        return;
    }
    let speed = grid.speed.step(delta);
    log::debug!("speed {} ({}ms)", speed, grid.speed.interval_ms());
    sync_speed_field(grid);
}

pub(super) fn speed_reset<T: Ticker>(grid: &mut GridController<T>) {
    if !settings_enabled(grid, "speed reset") {
        return;
    }
    grid.speed.reset(grid.options.default_interval_ms);
    log::debug!("speed reset to {}", grid.speed.displayed());
    sync_speed_field(grid);
}

/// The slider always produces an in-range value, so it also clears an
/// invalid speed field.
pub(super) fn speed_changed<T: Ticker>(grid: &mut GridController<T>, displayed: u32) {
    grid.speed.set_displayed(displayed);
    sync_speed_field(grid);
    let raw = grid.speed.displayed().to_string();
    fields::on_field_changed(grid, FieldKey::Speed, &raw);
}

pub(super) fn font_size_step<T: Ticker>(grid: &mut GridController<T>, pct: f64) {
    if !settings_enabled(grid, "font size change") {
        return;
    }
    let options = &grid.options;
    if grid
        .font
        .step(pct, options.font_size_floor, options.font_size_ceiling)
    {
        log::debug!("font size {}", grid.font.clamp_css());
    }
}

pub(super) fn font_size_reset<T: Ticker>(grid: &mut GridController<T>) {
    if !settings_enabled(grid, "font size reset") {
        return;
    }
    grid.font = FontScale::from_options(&grid.options);
}

pub(super) fn show_high_multiple<T: Ticker>(grid: &mut GridController<T>, on: bool) {
    grid.show_high_multiple = on;
}

/// New column cap from the viewport. Only a computed layout is affected; a
/// running count carries on over the redrawn grid.
pub(super) fn set_max_columns<T: Ticker>(grid: &mut GridController<T>, max_columns: u32) {
    if max_columns == 0 {
        log::warn!("ignoring zero column cap");
        return;
    }
    if grid.config.max_columns == max_columns {
        return;
    }
    log::debug!("max columns {} -> {}", grid.config.max_columns, max_columns);
    grid.config.max_columns = max_columns;
    if !grid.config.columns_are_computed {
        return;
    }
    layout::recalculate_dims(grid);
}

pub(super) fn viewport_width_changed<T: Ticker>(grid: &mut GridController<T>, width_px: u32) {
    let breakpoint = Breakpoint::from_viewport_width(width_px);
    if grid.breakpoint == Some(breakpoint) {
        return;
    }
    log::debug!("viewport {}px -> {}", width_px, breakpoint.class_name());
    grid.breakpoint = Some(breakpoint);
    set_max_columns(grid, breakpoint.max_columns());
}
