//! `setInterval`-backed ticker for the browser.
//!
//! The JS callback is owned by a shared slot that the facade fills once the
//! controller has been wrapped, so the ticker can be built before the thing
//! it calls back into exists.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::Ticker;

pub type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct IntervalTicker {
    slot: TickSlot,
    handle: Option<i32>,
    interval_ms: Option<u32>,
}

impl IntervalTicker {
    pub fn new() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
            handle: None,
            interval_ms: None,
        }
    }

    pub fn slot(&self) -> TickSlot {
        Rc::clone(&self.slot)
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker for IntervalTicker {
    fn start(&mut self, interval_ms: u32) -> Result<(), String> {
        self.cancel();

        let window = web_sys::window().ok_or_else(|| "no global window".to_string())?;
        let slot = self.slot.borrow();
        let callback = slot
            .as_ref()
            .ok_or_else(|| "tick callback not installed".to_string())?;

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                interval_ms.min(i32::MAX as u32) as i32,
            )
            .map_err(|e| format!("setInterval failed: {:?}", e))?;

        self.handle = Some(handle);
        self.interval_ms = Some(interval_ms);
        Ok(())
    }

    fn cancel(&mut self) {
        self.interval_ms = None;
        let Some(handle) = self.handle.take() else {
            return;
        };
        match web_sys::window() {
            Some(window) => window.clear_interval_with_handle(handle),
            None => log::error!("cannot clear interval {}: no global window", handle),
        }
    }

    fn active_interval(&self) -> Option<u32> {
        self.interval_ms
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
