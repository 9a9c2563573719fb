#![deny(missing_docs)]
//! Shared logging utilities for the IntelliDebug workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! a helper for logging user text without dumping it whole, and a minimal test
//! initializer for the global logger.

/// Log target attached to every record emitted through the `engine_*` macros.
pub const LOG_TARGET: &str = "intellidebug";

/// Returns at most `max_chars` characters of `text` on a single line, with an
/// ellipsis when the text was cut.
///
/// Drafts are arbitrary source code; logs only ever get this preview.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let mut chars = flat.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have installed the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Never,
    )]);
}
