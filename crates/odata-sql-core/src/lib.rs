//! # odata-sql-core
//!
//! A hand-written lexer and Pratt parser for the OData v4 `$filter`
//! expression subset, producing a flat, arena-backed syntax tree.
//!
//! This crate knows nothing about SQL. It turns a filter string such as
//!
//! ```text
//! name eq 'test' and startswith(metadata/name, 'prd')
//! ```
//!
//! into a [`SyntaxTree`] whose nodes carry a [`NodeKind`] (binary operator,
//! unary operator, left operand, right operand) and the textual value taken
//! from the source. Consumers walk the tree through parent/left/right links.
//!
//! ## Parsing approach
//!
//! Expressions use a Pratt (top-down operator precedence) parser. Infix
//! operators are whitespace-separated words (`eq`, `ne`, `and`, `or`, ...)
//! with `or` binding loosest, then `and`, then the comparison family. String
//! functions (`contains`, `startswith`, `endswith`, `concat`) and the unary
//! functions (`length`, `tolower`, `year`, ..., and `not`) use call syntax
//! and therefore parse as primaries.

pub mod lexer;
pub mod parser;
pub mod tree;

pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{ParseError, Parser};
pub use tree::{Node, NodeId, NodeKind, SyntaxTree};
