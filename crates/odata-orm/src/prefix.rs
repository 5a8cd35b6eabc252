//! Operator-prefix rewriting.
//!
//! Values may carry a leading token that selects the comparison operator:
//! `">=5"` means *greater or equal to 5*, `"~foo%"` means *LIKE 'foo%'*.
//! Equality needs no token. The token set is configurable; the longest
//! configured token wins when several match.

use crate::value::SqlValue;

/// The comparison selected by a prefix token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrefixOp {
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    NotEqual,
    Like,
    NotLike,
}

impl PrefixOp {
    const fn sql(self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::NotEqual => "!=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
        }
    }
}

/// Configurable prefix tokens for non-equality predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorPrefixes {
    /// Token for `>` (default `>`).
    pub greater_than: String,
    /// Token for `>=` (default `>=`).
    pub greater_or_equal: String,
    /// Token for `<` (default `<`).
    pub less_than: String,
    /// Token for `<=` (default `<=`).
    pub less_or_equal: String,
    /// Token for `!=` (default `!=`).
    pub not_equal: String,
    /// Token for `LIKE` (default `~`).
    pub like: String,
    /// Token for `NOT LIKE` (default `!~`).
    pub not_like: String,
}

impl Default for OperatorPrefixes {
    fn default() -> Self {
        Self {
            greater_than: String::from(">"),
            greater_or_equal: String::from(">="),
            less_than: String::from("<"),
            less_or_equal: String::from("<="),
            not_equal: String::from("!="),
            like: String::from("~"),
            not_like: String::from("!~"),
        }
    }
}

impl OperatorPrefixes {
    /// Rewrites `column = value` into the predicate selected by the value's
    /// prefix token. An unprefixed value stays an equality check. Returns
    /// the SQL fragment and the bound parameter.
    #[must_use]
    pub fn rewrite(&self, column: &str, value: &str) -> (String, SqlValue) {
        match self.match_prefix(value) {
            Some((op, rest)) => {
                let mut sql = format!("{column} {} ?", op.sql());
                let param = match op {
                    PrefixOp::Like | PrefixOp::NotLike => {
                        if rest.contains("\\%") {
                            sql.push_str(" ESCAPE '\\'");
                        }
                        SqlValue::Text(String::from(rest))
                    }
                    _ => SqlValue::from_literal(rest),
                };
                (sql, param)
            }
            None => (format!("{column} = ?"), SqlValue::from_literal(value)),
        }
    }

    /// Finds the longest configured token prefixing the value.
    fn match_prefix<'a>(&self, value: &'a str) -> Option<(PrefixOp, &'a str)> {
        let mut tokens = [
            (self.greater_than.as_str(), PrefixOp::GreaterThan),
            (self.greater_or_equal.as_str(), PrefixOp::GreaterOrEqual),
            (self.less_than.as_str(), PrefixOp::LessThan),
            (self.less_or_equal.as_str(), PrefixOp::LessOrEqual),
            (self.not_equal.as_str(), PrefixOp::NotEqual),
            (self.like.as_str(), PrefixOp::Like),
            (self.not_like.as_str(), PrefixOp::NotLike),
        ];
        tokens.sort_by_key(|(token, _)| std::cmp::Reverse(token.len()));
        tokens
            .iter()
            .find_map(|(token, op)| value.strip_prefix(*token).map(|rest| (*op, rest)))
    }
}
