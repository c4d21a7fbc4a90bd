//! GridController - single authority over the grid configuration
//!
//! Every external event (field edit, run control, settings button,
//! viewport signal, timer tick) enters through one of the `on_*` methods
//! and is handled synchronously: validate, recompute, re-lay out, then
//! move the state machine. Render work is queued as `GridEvent`s for the
//! view to drain; `snapshot()` describes everything else the view shows.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::config::GridOptions;
use crate::domain::events::GridEvent;
use crate::domain::fields::FieldKey;
use crate::domain::state::GridState;
use crate::env::Ticker;
use crate::spatial::Breakpoint;
use crate::systems::{
    AnimationEngine, AnimationState, FontScale, Run, SpeedSetting, Step, ValidityMap, Validator,
};

#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "fields/fields.rs"]
mod fields;
#[path = "layout/layout.rs"]
mod layout;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/snapshot.rs"]
mod snapshot;
mod facade;

pub use facade::CountGrid;
pub use fields::FieldOutcome;
pub use layout::HighMultiple;
pub use snapshot::{Controls, Snapshot};

/// The authoritative numeric state of the grid.
///
/// `cell_count` and `multiple` hold the last accepted values. Row and
/// column counts are `None` while the fields they derive from are invalid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GridConfiguration {
    pub cell_count: u32,
    pub multiple: u32,
    pub column_count: Option<u32>,
    pub row_count: Option<u32>,
    pub columns_are_computed: bool,
    pub max_columns: u32,
}

pub struct GridController<T: Ticker> {
    options: GridOptions,
    config: GridConfiguration,
    /// Field text as the view should display it.
    field_values: BTreeMap<FieldKey, String>,
    validator: Validator,
    speed: SpeedSetting,
    font: FontScale,
    show_high_multiple: bool,
    breakpoint: Option<Breakpoint>,
    focus: Option<FieldKey>,
    anim: AnimationState,
    engine: AnimationEngine<T>,
    events: Vec<GridEvent>,
}

impl<T: Ticker> GridController<T> {
    pub fn new(options: GridOptions, ticker: T) -> Self {
        init::create_controller(options, ticker)
    }

    /// Back to the configured initial values, dropping any run in progress.
    pub fn on_reload(&mut self) {
        init::reinitialise(self);
    }

    // === Fields ===

    pub fn on_field_changed(&mut self, key: FieldKey, raw: &str) -> FieldOutcome {
        fields::on_field_changed(self, key, raw)
    }

    /// Same as `on_field_changed` with the key given by name.
    pub fn on_field_changed_by_name(&mut self, key: &str, raw: &str) -> Result<FieldOutcome, String> {
        let key: FieldKey = key.parse()?;
        Ok(self.on_field_changed(key, raw))
    }

    pub fn on_compute_columns_toggled(&mut self, on: bool) {
        fields::on_compute_columns_toggled(self, on);
    }

    pub fn on_recalculate_dims(&mut self) {
        layout::recalculate_dims(self);
    }

    // === Run controls ===

    pub fn on_start(&mut self) -> bool {
        commands::start(self)
    }

    pub fn on_pause(&mut self) {
        commands::pause(self);
    }

    pub fn on_pause_or_continue(&mut self) -> bool {
        commands::pause_or_continue(self)
    }

    pub fn on_clear(&mut self) {
        commands::clear(self);
    }

    pub fn on_tick(&mut self) -> Step {
        commands::tick(self)
    }

    // === Settings ===

    pub fn on_speed_step(&mut self, delta: i32) {
        settings::speed_step(self, delta);
    }

    pub fn on_speed_up(&mut self) {
        let step = self.options.speed_step;
        settings::speed_step(self, step);
    }

    pub fn on_slow_down(&mut self) {
        let step = self.options.speed_step;
        settings::speed_step(self, -step);
    }

    pub fn on_speed_reset(&mut self) {
        settings::speed_reset(self);
    }

    /// Range slider moved to `displayed`.
    pub fn on_speed_changed(&mut self, displayed: u32) {
        settings::speed_changed(self, displayed);
    }

    pub fn on_font_size_step(&mut self, pct: f64) {
        settings::font_size_step(self, pct);
    }

    pub fn on_font_size_reset(&mut self) {
        settings::font_size_reset(self);
    }

    pub fn on_show_high_multiple_toggled(&mut self, on: bool) {
        settings::show_high_multiple(self, on);
    }

    // === Viewport ===

    pub fn on_viewport_breakpoint_changed(&mut self, max_columns: u32) {
        settings::set_max_columns(self, max_columns);
    }

    pub fn on_viewport_width_changed(&mut self, width_px: u32) {
        settings::viewport_width_changed(self, width_px);
    }

    // === Output ===

    pub fn snapshot(&self) -> Snapshot {
        snapshot::build(self)
    }

    /// Render events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GridEvent] {
        &self.events
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn configuration(&self) -> &GridConfiguration {
        &self.config
    }

    pub fn animation(&self) -> &AnimationState {
        &self.anim
    }

    pub fn state(&self) -> GridState {
        self.anim.state
    }

    pub fn validity(&self) -> &ValidityMap {
        self.validator.map()
    }

    pub fn speed(&self) -> &SpeedSetting {
        &self.speed
    }

    pub fn font(&self) -> &FontScale {
        &self.font
    }

    pub fn field_value(&self, key: FieldKey) -> Option<&str> {
        self.field_values.get(&key).map(String::as_str)
    }

    pub fn focused_field(&self) -> Option<FieldKey> {
        self.focus
    }

    pub fn ticker(&self) -> &T {
        self.engine.ticker()
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        self.engine.ticker_mut()
    }

    fn run(&self) -> Run {
        Run {
            multiple: self.config.multiple,
            cell_count: self.config.cell_count,
        }
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
