//! Identifier-to-column naming strategies.

use std::fmt;
use std::sync::Arc;

/// Translates API identifiers (OData camelCase) to storage column names.
///
/// The default strategy snake-cases identifiers (`testValue` →
/// `test_value`). A custom callback preserves per-entity column overrides.
#[derive(Clone, Default)]
pub enum NamingStrategy {
    /// snake_case translation (default).
    #[default]
    SnakeCase,
    /// Caller-supplied translation.
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl NamingStrategy {
    /// Returns the column name for an identifier.
    #[must_use]
    pub fn column_name(&self, identifier: &str) -> String {
        match self {
            Self::SnakeCase => to_snake_case(identifier),
            Self::Custom(f) => f(identifier),
        }
    }
}

impl fmt::Debug for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SnakeCase => f.write_str("SnakeCase"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Converts a camelCase identifier to snake_case.
fn to_snake_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    for (i, c) in identifier.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        let naming = NamingStrategy::SnakeCase;
        assert_eq!(naming.column_name("name"), "name");
        assert_eq!(naming.column_name("testValue"), "test_value");
        assert_eq!(naming.column_name("createdAt"), "created_at");
        assert_eq!(naming.column_name("already_snake"), "already_snake");
    }

    #[test]
    fn test_custom() {
        let naming = NamingStrategy::Custom(Arc::new(|s| format!("t_{s}")));
        assert_eq!(naming.column_name("name"), "t_name");
    }
}
