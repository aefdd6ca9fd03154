//! Error type for filter construction and configuration

use thiserror::Error;

pub const INVALID_NAME: &str = "The `name` argument is invalid. Expected a non-empty string.";
pub const INVALID_FIELD: &str =
    "The `field` option is invalid. Expected a non-empty string or array.";

/// Errors raised while building filters
///
/// Applying a filter never fails; only construction and configuration do.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A constructor argument or option failed validation
    #[error("{0}")]
    InvalidArgument(String),

    /// A filter definition could not be turned into a filter
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    pub fn invalid_name() -> Self {
        Self::InvalidArgument(INVALID_NAME.to_string())
    }

    pub fn invalid_field() -> Self {
        Self::InvalidArgument(INVALID_FIELD.to_string())
    }
}
