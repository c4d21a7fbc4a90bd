//! Count-along grid engine - counting in multiples over a number grid, in WASM
//!
//! Architecture:
//! - domain/      - Configuration, field keys, states and render events
//! - spatial/     - Grid dimensions and viewport breakpoints
//! - systems/     - Speed mapping, validation, font scale, animation
//! - env/         - Host capabilities: step timer and log sink
//! - controller/  - GridController orchestration and the JS facade

pub mod controller;
pub mod domain;
pub mod env;
pub mod spatial;
pub mod systems;

use wasm_bindgen::prelude::*;

pub use controller::{CountGrid, GridConfiguration, GridController, Snapshot};
pub use domain::config::GridOptions;
pub use domain::events::GridEvent;
pub use domain::fields::{FieldError, FieldKey};
pub use domain::state::GridState;
pub use env::{ManualTicker, Ticker};

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine with info-level logging
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    install_logger(log::LevelFilter::Info);
    log::info!("count-along engine {} initialized", version());
}

/// Initialize with an explicit log level ("error" ... "trace", or "off")
#[wasm_bindgen]
pub fn init_with_level(level: &str) -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    let level = env::logging::parse_level(level).map_err(|e| JsValue::from_str(&e))?;
    install_logger(level);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn install_logger(level: log::LevelFilter) {
    env::logging::init_console(level);
}

#[cfg(not(target_arch = "wasm32"))]
fn install_logger(level: log::LevelFilter) {
    env::logging::init_native(level);
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
