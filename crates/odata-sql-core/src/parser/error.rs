//! Parser error types.

use thiserror::Error;

/// A parse failure.
///
/// The display string is the diagnostic cause; callers prepend their own
/// context (e.g. `failed to parse query: `).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A group or function call was not closed.
    #[error("missing closing bracket ')'")]
    MissingClosingBracket,

    /// A function name was not followed by an argument list.
    #[error("missing opening bracket '('")]
    MissingOpeningBracket,

    /// Unrecognized input, carrying the offending source fragment.
    #[error("possible typo in \"{0}\"")]
    PossibleTypo(String),
}
