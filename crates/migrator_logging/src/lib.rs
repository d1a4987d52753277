#![deny(missing_docs)]
//! Shared logging utilities for the migrator workspace.
//!
//! Every crate logs through the `migrate_*` macros so that all lines carry
//! the same target and can be filtered as one unit. A terminal initializer
//! for tests lives here as well.

/// Log target used by every `migrate_*` macro.
pub const TARGET: &str = "migrator";

/// Logs a trace-level message under the [`TARGET`] target.
#[macro_export]
macro_rules! migrate_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the [`TARGET`] target.
#[macro_export]
macro_rules! migrate_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the [`TARGET`] target.
#[macro_export]
macro_rules! migrate_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the [`TARGET`] target.
#[macro_export]
macro_rules! migrate_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the [`TARGET`] target.
#[macro_export]
macro_rules! migrate_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Maps the `--verbose` switch onto a level filter.
pub fn level_for(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Initializes a terminal logger for integration and unit tests.
///
/// Safe to call from every test: a second initialization is ignored.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let _ = TermLogger::init(
        level_for(cfg!(debug_assertions)),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Never,
    );
}
