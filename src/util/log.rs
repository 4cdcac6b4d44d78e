// src/util/log.rs

//! Logger Utility - Routes the `log_*!` macros to a stdout `tracing` subscriber
use std::sync::OnceLock;
use tracing::level_filters::LevelFilter;

pub use tracing;

pub static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Install the global stdout subscriber.
///
/// Only the first call decides whether debug output is enabled; later calls
/// are no-ops, which keeps repeated initialisation in tests harmless.
pub fn init(debug: bool) {
    let debug = *DEBUG_ENABLED.get_or_init(|| debug);

    let level = if debug { LevelFilter::DEBUG } else { LevelFilter::INFO };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

/// Whether `-d` was given on the command line
pub fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get().unwrap_or(&false)
}

/// Convenience macro for error logging with formatting
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        $crate::util::log::tracing::error!("{}", format_args!($($arg)*));
    }};
}

/// Convenience macro for warning logging with formatting
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        $crate::util::log::tracing::warn!("{}", format_args!($($arg)*));
    }};
}

/// Convenience macro for info logging with formatting
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        $crate::util::log::tracing::info!("{}", format_args!($($arg)*));
    }};
}

/// Convenience macro for debug logging with formatting
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        if $crate::util::log::debug_enabled() {
            $crate::util::log::tracing::debug!("{}", format_args!($($arg)*));
        }
    }};
}
