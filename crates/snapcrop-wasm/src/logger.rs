//! Browser console logging.
//!
//! The core crate only emits records through the `log` facade; `console_log`
//! routes them to `console.error/warn/info/debug` by level. Panics are
//! forwarded to `console.error` as well.

use log::{Level, LevelFilter};
use wasm_bindgen::prelude::*;

/// Install the console logger and panic hook. Later calls only change the
/// level.
pub(crate) fn init(level: LevelFilter) {
    console_error_panic_hook::set_once();
    // Fails if a logger is already installed; keep that one
    let _ = console_log::init_with_level(Level::Trace);
    log::set_max_level(level);
}

/// Parse a level name ("off", "error", "warn", "info", "debug", "trace").
///
/// Unknown names fall back to `Info`.
pub(crate) fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Change how much the cropper logs to the console.
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    init(parse_level(level));
}
