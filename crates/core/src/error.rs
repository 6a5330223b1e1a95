//! Error type for the few fallible entry points
//!
//! The hourly engine itself never fails: out-of-range numbers are clamped and
//! unknown regions fall back to a default profile. Errors only surface where
//! text is parsed (season names, timestamps) or a configuration is validated.

use thiserror::Error;

/// Errors reported by parsing and configuration helpers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeatherError {
    /// Season name was neither "auto" nor a recognised season
    #[error("unknown season '{0}' (expected auto, winter, spring, summer or fall)")]
    InvalidSeason(String),

    /// Timestamp could not be parsed into a calendar date and time
    #[error("invalid timestamp '{input}': {reason}")]
    InvalidTimestamp {
        /// The rejected input
        input: String,
        /// Parser diagnostic
        reason: String,
    },

    /// A configuration field was outside its accepted range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, WeatherError>;
