//! Operator tables: SQL comparison symbols and prefix tokens, with their
//! negation-reversed counterparts.
//!
//! Negation never wraps emitted SQL in `NOT (...)`; instead the emitter
//! swaps to the reversed table at the `not` boundary (`eq` → `!=`,
//! `lt` → `>=`, `contains` → `NOT LIKE`, ...).

use odata_orm::OperatorPrefixes;

/// Returns true for the comparison family.
#[must_use]
pub(crate) fn is_comparison(op: &str) -> bool {
    matches!(op, "eq" | "ne" | "gt" | "ge" | "lt" | "le")
}

/// Returns true for the string-matching predicates.
#[must_use]
pub(crate) fn is_string_predicate(op: &str) -> bool {
    matches!(op, "contains" | "startswith" | "endswith")
}

/// Returns the SQL symbol for a comparison operator, reversed under
/// negation.
#[must_use]
pub(crate) fn comparison_sql(op: &str, negated: bool) -> Option<&'static str> {
    let symbol = if negated {
        match op {
            "eq" => "!=",
            "ne" => "=",
            "lt" => ">=",
            "le" => ">",
            "gt" => "<=",
            "ge" => "<",
            _ => return None,
        }
    } else {
        match op {
            "eq" => "=",
            "ne" => "!=",
            "lt" => "<",
            "le" => "<=",
            "gt" => ">",
            "ge" => ">=",
            _ => return None,
        }
    };
    Some(symbol)
}

/// Snapshot of the operator-prefix tokens used to build prefix-encoded
/// leaves for navigation-path predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrefixTables {
    greater_than: String,
    greater_or_equal: String,
    less_than: String,
    less_or_equal: String,
    not_equal: String,
    like: String,
    not_like: String,
}

impl PrefixTables {
    /// Captures the tokens from a collaborator configuration.
    #[must_use]
    pub fn from_config(config: &OperatorPrefixes) -> Self {
        Self {
            greater_than: config.greater_than.clone(),
            greater_or_equal: config.greater_or_equal.clone(),
            less_than: config.less_than.clone(),
            less_or_equal: config.less_or_equal.clone(),
            not_equal: config.not_equal.clone(),
            like: config.like.clone(),
            not_like: config.not_like.clone(),
        }
    }

    /// Returns the token prefixing a navigation-path leaf for a comparison
    /// operator. Equality carries the bare literal (empty token). The
    /// reversed table mirrors the comparison reversal: greater swaps with
    /// less, and `eq`/`ne` swap roles.
    #[must_use]
    pub fn comparison_token(&self, op: &str, negated: bool) -> Option<&str> {
        let token = if negated {
            match op {
                "eq" => self.not_equal.as_str(),
                "ne" => "",
                "lt" => self.greater_or_equal.as_str(),
                "le" => self.greater_than.as_str(),
                "gt" => self.less_or_equal.as_str(),
                "ge" => self.less_than.as_str(),
                _ => return None,
            }
        } else {
            match op {
                "eq" => "",
                "ne" => self.not_equal.as_str(),
                "lt" => self.less_than.as_str(),
                "le" => self.less_or_equal.as_str(),
                "gt" => self.greater_than.as_str(),
                "ge" => self.greater_or_equal.as_str(),
                _ => return None,
            }
        };
        Some(token)
    }

    /// Returns the LIKE (or NOT LIKE, when negated) token.
    #[must_use]
    pub fn like_token(&self, negated: bool) -> &str {
        if negated {
            &self.not_like
        } else {
            &self.like
        }
    }
}
