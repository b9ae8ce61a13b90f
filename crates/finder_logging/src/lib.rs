#![deny(missing_docs)]
//! Shared logging utilities for the job finder workspace.
//!
//! Library crates log through the `finder_*` macros so the binary alone decides
//! where records end up. The macros forward to the `log` facade.

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! finder_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! finder_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! finder_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! finder_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! finder_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Maps a `-v` repeat count onto a level filter, starting from `base`.
///
/// Each step raises verbosity by one level and saturates at `Trace`.
pub fn level_from_verbosity(base: log::LevelFilter, verbose: u8) -> log::LevelFilter {
    const ORDER: [log::LevelFilter; 6] = [
        log::LevelFilter::Off,
        log::LevelFilter::Error,
        log::LevelFilter::Warn,
        log::LevelFilter::Info,
        log::LevelFilter::Debug,
        log::LevelFilter::Trace,
    ];
    let start = ORDER.iter().position(|level| *level == base).unwrap_or(3);
    let index = (start + usize::from(verbose)).min(ORDER.len() - 1);
    ORDER[index]
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
    use super::*;
    use log::LevelFilter;

    #[test]
    fn verbosity_raises_level_and_saturates() {
        assert_eq!(level_from_verbosity(LevelFilter::Info, 0), LevelFilter::Info);
        assert_eq!(level_from_verbosity(LevelFilter::Info, 1), LevelFilter::Debug);
        assert_eq!(level_from_verbosity(LevelFilter::Info, 9), LevelFilter::Trace);
        assert_eq!(level_from_verbosity(LevelFilter::Warn, 1), LevelFilter::Info);
    }
}
