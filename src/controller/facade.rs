use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::domain::config::GridOptions;
use crate::env::{IntervalTicker, TickSlot};

use super::GridController;

type SharedGrid = Rc<RefCell<GridController<IntervalTicker>>>;
type ChangeCallback = Rc<RefCell<Option<js_sys::Function>>>;

fn to_json<S: Serialize>(value: &S) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Fill the ticker's slot with the `setInterval` callback.
///
/// Weak handles: the closure lives inside the ticker the grid owns.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn install_tick(core: &SharedGrid, on_change: &ChangeCallback, slot: &TickSlot) {
    let grid = Rc::downgrade(core);
    let callback = Rc::downgrade(on_change);
    let tick = Closure::wrap(Box::new(move || {
        let Some(grid) = grid.upgrade() else {
            return;
        };
        match grid.try_borrow_mut() {
            Ok(mut grid) => {
                grid.on_tick();
            }
            Err(_) => {
                log::warn!("tick skipped: grid is busy");
                return;
            }
        }
        let Some(callback) = callback.upgrade() else {
            return;
        };
        let f = callback.borrow();
        if let Some(f) = f.as_ref() {
            if let Err(e) = f.call0(&JsValue::NULL) {
                log::error!("change callback failed: {:?}", e);
            }
        }
    }) as Box<dyn FnMut()>);
    *slot.borrow_mut() = Some(tick);
}

/// Browser handle on a `GridController` driven by `setInterval`.
///
/// Render work is pulled with `drain_events_json()`; the optional change
/// callback fires after every timer tick so the page knows when to pull.
#[wasm_bindgen]
pub struct CountGrid {
    core: SharedGrid,
    on_change: ChangeCallback,
}

#[wasm_bindgen]
impl CountGrid {
    /// Build a grid from optional JSON overrides of the default options.
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: Option<String>) -> Result<CountGrid, JsValue> {
        let options = match options_json {
            Some(json) => GridOptions::from_json(&json).map_err(|e| JsValue::from_str(&e))?,
            None => GridOptions::default(),
        };

        let ticker = IntervalTicker::new();
        let slot = ticker.slot();
        let core: SharedGrid = Rc::new(RefCell::new(GridController::new(options, ticker)));
        let on_change: ChangeCallback = Rc::new(RefCell::new(None));

        #[cfg(target_arch = "wasm32")]
        install_tick(&core, &on_change, &slot);
        #[cfg(not(target_arch = "wasm32"))]
        drop(slot);

        Ok(Self { core, on_change })
    }

    pub fn set_on_change(&self, callback: Option<js_sys::Function>) {
        *self.on_change.borrow_mut() = callback;
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.core.borrow().state().to_string()
    }

    /// Field edit by key name (`cell-count`, `multiple`, `speed`,
    /// `column-count`). Returns the field's verdict as JSON.
    pub fn on_field_changed(&self, key: &str, raw: &str) -> Result<String, JsValue> {
        let outcome = self
            .core
            .borrow_mut()
            .on_field_changed_by_name(key, raw)
            .map_err(|e| JsValue::from_str(&e))?;
        to_json(&outcome)
    }

    pub fn on_compute_columns_toggled(&self, on: bool) {
        self.core.borrow_mut().on_compute_columns_toggled(on);
    }

    pub fn on_show_high_multiple_toggled(&self, on: bool) {
        self.core.borrow_mut().on_show_high_multiple_toggled(on);
    }

    pub fn on_recalculate_dims(&self) {
        self.core.borrow_mut().on_recalculate_dims();
    }

    pub fn on_start(&self) -> bool {
        self.core.borrow_mut().on_start()
    }

    pub fn on_pause(&self) {
        self.core.borrow_mut().on_pause();
    }

    pub fn on_pause_or_continue(&self) -> bool {
        self.core.borrow_mut().on_pause_or_continue()
    }

    pub fn on_clear(&self) {
        self.core.borrow_mut().on_clear();
    }

    pub fn on_speed_up(&self) {
        self.core.borrow_mut().on_speed_up();
    }

    pub fn on_slow_down(&self) {
        self.core.borrow_mut().on_slow_down();
    }

    pub fn on_speed_reset(&self) {
        self.core.borrow_mut().on_speed_reset();
    }

    /// Range slider input.
    pub fn on_speed_changed(&self, displayed: u32) {
        self.core.borrow_mut().on_speed_changed(displayed);
    }

    pub fn on_font_size_up(&self) {
        let mut grid = self.core.borrow_mut();
        let pct = grid.options().font_size_step_pct;
        grid.on_font_size_step(pct);
    }

    pub fn on_font_size_down(&self) {
        let mut grid = self.core.borrow_mut();
        let pct = grid.options().font_size_step_pct;
        grid.on_font_size_step(-pct);
    }

    pub fn on_font_size_reset(&self) {
        self.core.borrow_mut().on_font_size_reset();
    }

    pub fn on_viewport_breakpoint_changed(&self, max_columns: u32) {
        self.core.borrow_mut().on_viewport_breakpoint_changed(max_columns);
    }

    pub fn on_viewport_width_changed(&self, width_px: u32) {
        self.core.borrow_mut().on_viewport_width_changed(width_px);
    }

    pub fn on_reload(&self) {
        self.core.borrow_mut().on_reload();
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        to_json(&self.core.borrow().snapshot())
    }

    /// Render events since the last call, oldest first.
    pub fn drain_events_json(&self) -> Result<String, JsValue> {
        to_json(&self.core.borrow_mut().drain_events())
    }
}
