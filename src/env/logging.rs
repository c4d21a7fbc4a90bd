//! Log sink installed once at startup.
//!
//! In the browser records go to the console at the matching level;
//! native hosts and tests go through `env_logger` (`RUST_LOG` still wins).

use log::LevelFilter;

/// Parse a level name as used by the page ("debug", "warn", ...).
pub fn parse_level(name: &str) -> Result<LevelFilter, String> {
    name.trim()
        .parse::<LevelFilter>()
        .map_err(|_| format!("unknown log level '{}'", name))
}

mod console {
    use log::{Level, Log, Metadata, Record};
    use wasm_bindgen::JsValue;

    pub(super) struct ConsoleLogger;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = JsValue::from_str(&format!(
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            ));
            match record.level() {
                Level::Error => web_sys::console::error_1(&line),
                Level::Warn => web_sys::console::warn_1(&line),
                Level::Info => web_sys::console::info_1(&line),
                Level::Debug => web_sys::console::debug_1(&line),
                Level::Trace => web_sys::console::log_1(&line),
            }
        }

        fn flush(&self) {}
    }
}

/// Route `log` records to the browser console. Later calls only change the
/// level.
pub fn init_console(level: LevelFilter) {
    // Fails only if a logger is already installed
    let _ = log::set_logger(&console::LOGGER);
    log::set_max_level(level);
}

/// Install `env_logger` with `level` as the default filter. Safe to call
/// more than once (tests do).
#[cfg(not(target_arch = "wasm32"))]
pub fn init_native(level: LevelFilter) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.to_string()),
    )
    .is_test(cfg!(test))
    .try_init();
}
