//! Tracing conventions shared across the rolescope crates.
//!
//! Consumers bring their own subscriber; the binary installs one writing to
//! stderr so log lines never collide with the terminal UI. Filter with:
//!
//! ```text
//! ROLESCOPE_LOG=debug rolescope --demo
//! ```

use tracing::Level;

/// Target used by all rolescope tracing events.
pub const TARGET: &str = "rolescope";

/// Environment variable consulted for the default log level.
pub const LOG_LEVEL_ENV: &str = "ROLESCOPE_LOG";

/// Parse a log level string (case-insensitive).
///
/// Recognized values: `trace`, `debug`, `info`, `warn`, `error`.
/// Returns `None` for unrecognized strings.
#[must_use]
pub fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Resolve the log level from [`LOG_LEVEL_ENV`], falling back to `default`.
#[must_use]
pub fn level_from_env(default: Level) -> Level {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|value| parse_level(value.trim()))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_levels() {
        assert_eq!(parse_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_level("DEBUG"), Some(Level::DEBUG));
        assert_eq!(parse_level("Info"), Some(Level::INFO));
        assert_eq!(parse_level("warn"), Some(Level::WARN));
        assert_eq!(parse_level("error"), Some(Level::ERROR));
    }

    #[test]
    fn parse_unknown_returns_none() {
        assert_eq!(parse_level("verbose"), None);
        assert_eq!(parse_level(""), None);
    }
}
