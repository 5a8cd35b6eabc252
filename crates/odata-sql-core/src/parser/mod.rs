//! OData filter parser.
//!
//! A Pratt (top-down operator precedence) parser for the `$filter` subset:
//!
//! - **Infix operators**, low to high precedence: `or`, `and`, then the
//!   comparison family `eq`, `ne`, `gt`, `ge`, `lt`, `le`.
//! - **Binary functions**: `concat`, `contains`, `startswith`, `endswith`,
//!   written `name(arg1,arg2)`.
//! - **Unary functions**: `not`, `length`, `indexof`, `tolower`, `toupper`,
//!   `trim`, `year`, `month`, `day`, `hour`, `minute`, `second`,
//!   `fractionalsecond`, `date`, `time`, `now`, `round`, `floor`, `ceiling`,
//!   written `name(arg)` (`now` also accepts an empty argument list).
//! - **Operands**: identifiers, navigation paths (`a/b/c`), single-quoted
//!   strings, and base-10 integers.
//!
//! Parenthesized groups nest arbitrarily. The parser reports three failure
//! causes: a missing `)`, a missing `(` after a function name, and a
//! possible typo carrying the offending source fragment.

mod config;
mod core;
mod error;

pub use config::{infix_binding_power, is_binary_function, is_unary_function};
pub use core::Parser;
pub use error::ParseError;
