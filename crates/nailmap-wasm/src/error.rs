//! Error types for board ingestion and viewer configuration.

use thiserror::Error;

/// Errors that can occur while parsing a test-point file.
///
/// Individual malformed rows never produce an error; they are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The full scan accepted zero test points.
    #[error(
        "no valid data found in `{file_name}`: expected a Tebo-ICT compatible .asc file \
         (or .txt/.fab/.csv) with `$`-prefixed test point rows of at least 7 fields"
    )]
    NoDataFound {
        /// Display name of the rejected input.
        file_name: String,
    },
}

/// Errors raised when validating a [`crate::config::ViewerConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Zoom bounds are non-finite, non-positive, or inverted.
    #[error("invalid zoom range [{min}, {max}]")]
    InvalidZoomRange {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },

    /// A zoom step factor lies outside its allowed interval.
    #[error("invalid {name} step {value}")]
    InvalidStep {
        /// Name of the offending field.
        name: &'static str,
        /// Requested value.
        value: f64,
    },

    /// Padding is negative or non-finite.
    #[error("invalid padding {0}")]
    InvalidPadding(f64),

    /// A radius parameter is non-positive or non-finite.
    #[error("invalid {name} {value}")]
    InvalidRadius {
        /// Name of the offending field.
        name: &'static str,
        /// Requested value.
        value: f64,
    },
}
