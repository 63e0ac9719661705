#![deny(missing_docs)]
//! Shared logging utilities for the token counter workspace.
//!
//! This crate provides the `counter_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. The macros forward to
//! the `log` facade, so crates using them must depend on `log` as well.

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! counter_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! counter_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! counter_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! counter_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! counter_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    #[test]
    fn macros_expand_without_a_logger() {
        counter_trace!("trace {}", 1);
        counter_debug!("debug {}", 2);
        counter_info!("info {}", 3);
        counter_warn!("warn {}", 4);
        counter_error!("error {}", 5);
    }

    #[test]
    fn test_initializer_is_idempotent() {
        super::initialize_for_tests();
        super::initialize_for_tests();
        counter_info!("logger initialized twice without panicking");
    }
}
