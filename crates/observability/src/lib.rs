//! Process-wide logging setup for inventory sync processes.

/// Log subscriber configuration (filters, formatting).
pub mod logging;

pub use logging::DEFAULT_FILTER;

/// Initialize structured logging with the default filter.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    logging::init(DEFAULT_FILTER);
}
