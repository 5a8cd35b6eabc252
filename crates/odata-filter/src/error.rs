//! Translator error types.

use odata_sql_core::ParseError;
use thiserror::Error;

/// Errors returned by the translator.
///
/// Display strings are single-line and lowercase with stable prefixes, so
/// they can travel to API callers unchanged.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The input is not well-formed OData.
    #[error("failed to parse query: {0}")]
    Parse(#[from] ParseError),

    /// The input parsed but was semantically rejected.
    #[error("invalid query: {0}")]
    Invalid(String),
}

impl FilterError {
    /// Creates an invalid-query error.
    pub(crate) fn invalid(cause: impl Into<String>) -> Self {
        Self::Invalid(cause.into())
    }
}

/// Result type alias for translator operations.
pub type Result<T> = std::result::Result<T, FilterError>;
