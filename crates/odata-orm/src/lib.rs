//! # odata-orm
//!
//! A small ORM-style query builder: the attachment target for translated
//! filter expressions.
//!
//! This crate provides:
//! - [`QueryBuilder`] for composing a `WHERE` clause out of parameterized
//!   fragments, nested filters, and grouped sub-builders
//! - [`NestedFilter`] and its deep-filter rendering into correlated
//!   `IN (SELECT ...)` subqueries
//! - [`OperatorPrefixes`] for rewriting prefix-encoded values (`">=5"`)
//!   into comparison predicates
//! - [`NamingStrategy`] for translating API identifiers to column names
//! - [`Schema`] and an async execution surface over `sqlx`/SQLite
//!
//! ## Composing predicates
//!
//! ```rust
//! use odata_orm::{QueryBuilder, SqlValue};
//!
//! let builder = QueryBuilder::new()
//!     .filter("name = ?", vec![SqlValue::Text("alice".into())])
//!     .or_filter("age > ?", vec![SqlValue::Int(30)]);
//! let (sql, params) = builder.build_where();
//! assert_eq!(sql, "WHERE name = ? OR age > ?");
//! assert_eq!(params.len(), 2);
//! ```

mod builder;
mod error;
mod inflect;
mod naming;
mod nested;
mod prefix;
mod schema;
mod value;

pub use builder::QueryBuilder;
pub use error::{OrmError, Result};
pub use naming::NamingStrategy;
pub use nested::{NestedFilter, NestedValue};
pub use prefix::OperatorPrefixes;
pub use schema::Schema;
pub use value::{SqlValue, ToSqlValue};
