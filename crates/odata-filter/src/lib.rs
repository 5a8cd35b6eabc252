//! # odata-filter
//!
//! Translates OData v4 `$filter` expressions into safe, parameterized SQL
//! `WHERE` clauses attached to an [`QueryBuilder`].
//!
//! Collection endpoints can hand caller-supplied filter strings straight to
//! [`build_query`]: every value operand is bound as a `?` parameter, and
//! [`build_query_with_validation`] additionally whitelists identifiers
//! against a [`Schema`]'s column list, closing the SQL injection surface
//! that inlined column names would otherwise open.
//!
//! ```rust
//! use odata_filter::{build_query, Dialect};
//! use odata_orm::{QueryBuilder, SqlValue};
//!
//! let builder = build_query(
//!     "name ne 'prd' and length(testValue) gt 10",
//!     QueryBuilder::new(),
//!     Dialect::Sqlite,
//! )?;
//! let (sql, params) = builder.build_where();
//! assert_eq!(sql, "WHERE name != ? AND LENGTH(test_value) > ?");
//! assert_eq!(
//!     params,
//!     vec![SqlValue::Text("prd".into()), SqlValue::Int(10)]
//! );
//! # Ok::<(), odata_filter::FilterError>(())
//! ```
//!
//! Navigation paths (`metadata/tag/value`) become nested filters that the
//! deep-filter plugin renders as correlated `IN (SELECT ...)` subqueries.
//! `not(...)` is lowered at emission time by reversing operators and
//! logical connectives (De Morgan), never by wrapping SQL in `NOT (...)`.

mod bootstrap;
mod dialect;
mod emit;
mod error;
mod ops;
mod validate;

pub use dialect::Dialect;
pub use error::{FilterError, Result};

// Re-exports for callers wiring up the collaborators.
pub use odata_orm::{NamingStrategy, OperatorPrefixes, QueryBuilder, Schema, SqlValue};
pub use odata_sql_core::{NodeKind, SyntaxTree};

use odata_sql_core::Parser;
use tracing::debug;

use crate::bootstrap::bootstrap;
use crate::emit::Emitter;
use crate::validate::Validator;

/// Parses a filter string into its syntax tree without emitting SQL.
///
/// # Errors
///
/// Returns [`FilterError::Parse`] if the input is not well-formed.
pub fn get_ast(query: &str) -> Result<SyntaxTree> {
    Ok(Parser::new(query).parse()?)
}

/// Parses a filter string and renders a human-readable tree representation.
///
/// # Errors
///
/// Returns [`FilterError::Parse`] if the input is not well-formed.
pub fn print_tree(query: &str) -> Result<String> {
    Ok(get_ast(query)?.render())
}

/// Translates a filter string and attaches the resulting predicates to the
/// builder. No identifier whitelisting is performed; use
/// [`build_query_with_validation`] for caller-supplied input.
///
/// The builder is consumed; on error its predicates were never touched
/// (emission composes into detached sessions and attaches on success), so
/// callers that need to retry keep a clone.
///
/// # Errors
///
/// Returns [`FilterError::Parse`] for malformed input and
/// [`FilterError::Invalid`] for well-formed input the translator rejects.
pub fn build_query(query: &str, builder: QueryBuilder, dialect: Dialect) -> Result<QueryBuilder> {
    debug!(target: "odata_filter", %query, ?dialect, "building query");
    let tree = get_ast(query)?;
    let (builder, prefixes) = bootstrap(builder);
    let naming = builder.naming_strategy().clone();
    Emitter::new(dialect, prefixes, naming).emit(&tree, builder)
}

/// Like [`build_query`], but first validates the tree against the schema's
/// column whitelist and the depth cap (`max_depth = 0` disables the depth
/// check).
///
/// # Errors
///
/// Returns [`FilterError::Parse`] for malformed input and
/// [`FilterError::Invalid`] for unknown columns, exceeded depth, or shapes
/// the emitter rejects.
pub fn build_query_with_validation<S: Schema>(
    query: &str,
    builder: QueryBuilder,
    dialect: Dialect,
    max_depth: usize,
) -> Result<QueryBuilder> {
    debug!(target: "odata_filter", %query, ?dialect, max_depth, "building query with validation");
    let tree = get_ast(query)?;
    Validator::new(&tree, S::COLUMNS, builder.naming_strategy(), max_depth).run()?;
    let (builder, prefixes) = bootstrap(builder);
    let naming = builder.naming_strategy().clone();
    Emitter::new(dialect, prefixes, naming).emit(&tree, builder)
}

/// Validates a filter string against the schema without emitting anything.
/// The builder only supplies the naming strategy.
///
/// # Errors
///
/// Returns [`FilterError::Parse`] for malformed input and
/// [`FilterError::Invalid`] for unknown columns or exceeded depth.
pub fn valid_query<S: Schema>(
    query: &str,
    max_depth: usize,
    builder: &QueryBuilder,
) -> Result<()> {
    let tree = get_ast(query)?;
    Validator::new(&tree, S::COLUMNS, builder.naming_strategy(), max_depth).run()
}
