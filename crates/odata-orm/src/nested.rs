//! Deep nested filters.
//!
//! A [`NestedFilter`] is an ordered map from column keys to values or
//! further maps. Each map level denotes a traversal across a foreign-key
//! relationship and renders as a correlated subquery:
//!
//! ```text
//! {metadata: {tag: {value: "~test-3%"}}}
//! =>
//! metadata_id IN (SELECT id FROM metadata
//!                 WHERE tag_id IN (SELECT id FROM tags WHERE value LIKE ?))
//! ```
//!
//! Leaf values run through [`OperatorPrefixes`] rewriting, so a leaf can
//! carry any comparison, not just equality.

use tracing::trace;

use crate::inflect::pluralize;
use crate::prefix::OperatorPrefixes;
use crate::value::SqlValue;

/// A value inside a [`NestedFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedValue {
    /// A leaf value, possibly prefix-encoded (`">=5"`, `"~foo%"`).
    Value(String),
    /// A nested map, one relationship deeper.
    Map(NestedFilter),
}

/// An ordered column → value map interpreted as correlated subqueries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestedFilter {
    entries: Vec<(String, NestedValue)>,
}

impl NestedFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, keeping insertion order.
    pub fn insert(&mut self, key: impl Into<String>, value: NestedValue) {
        self.entries.push((key.into(), value));
    }

    /// Builds a single-branch filter from a path of column keys down to a
    /// leaf value: `["metadata", "tag", "value"]` + `"x"` becomes
    /// `{metadata: {tag: {value: "x"}}}`.
    #[must_use]
    pub fn from_path(path: &[String], leaf: impl Into<String>) -> Self {
        let mut filter = Self::new();
        match path {
            [] => {}
            [key] => filter.insert(key.clone(), NestedValue::Value(leaf.into())),
            [key, rest @ ..] => filter.insert(
                key.clone(),
                NestedValue::Map(Self::from_path(rest, leaf)),
            ),
        }
        filter
    }

    /// Returns true if the filter holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the filter to a SQL fragment and its parameters. Entries are
    /// joined with `AND`; each map entry becomes an `IN (SELECT ...)`
    /// subquery against the pluralized relation table.
    #[must_use]
    pub fn render(&self, prefixes: &OperatorPrefixes) -> (String, Vec<SqlValue>) {
        let mut parts = Vec::with_capacity(self.entries.len());
        let mut params = Vec::new();
        for (key, value) in &self.entries {
            match value {
                NestedValue::Value(raw) => {
                    let (sql, param) = prefixes.rewrite(key, raw);
                    parts.push(sql);
                    params.push(param);
                }
                NestedValue::Map(inner) => {
                    let (inner_sql, inner_params) = inner.render(prefixes);
                    parts.push(format!(
                        "{key}_id IN (SELECT id FROM {} WHERE {inner_sql})",
                        pluralize(key)
                    ));
                    params.extend(inner_params);
                }
            }
        }
        let sql = parts.join(" AND ");
        trace!(target: "odata_orm::nested", %sql, "rendered nested filter");
        (sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(filter: &NestedFilter) -> (String, Vec<SqlValue>) {
        filter.render(&OperatorPrefixes::default())
    }

    #[test]
    fn test_leaf_equality() {
        let filter = NestedFilter::from_path(&[String::from("metadata"), String::from("name")], "test");
        let (sql, params) = render(&filter);
        assert_eq!(sql, "metadata_id IN (SELECT id FROM metadata WHERE name = ?)");
        assert_eq!(params, vec![SqlValue::Text(String::from("test"))]);
    }

    #[test]
    fn test_two_levels_with_like_leaf() {
        let filter = NestedFilter::from_path(
            &[
                String::from("metadata"),
                String::from("tag"),
                String::from("value"),
            ],
            "~test-3%",
        );
        let (sql, params) = render(&filter);
        assert_eq!(
            sql,
            "metadata_id IN (SELECT id FROM metadata WHERE tag_id IN (SELECT id FROM tags WHERE value LIKE ?))"
        );
        assert_eq!(params, vec![SqlValue::Text(String::from("test-3%"))]);
    }

    #[test]
    fn test_prefixed_leaf_binds_integer() {
        let filter = NestedFilter::from_path(&[String::from("metadata"), String::from("count")], ">=5");
        let (sql, params) = render(&filter);
        assert_eq!(sql, "metadata_id IN (SELECT id FROM metadata WHERE count >= ?)");
        assert_eq!(params, vec![SqlValue::Int(5)]);
    }

    #[test]
    fn test_multiple_entries_join_with_and() {
        let mut filter = NestedFilter::new();
        filter.insert("name", NestedValue::Value(String::from("a")));
        filter.insert("kind", NestedValue::Value(String::from("b")));
        let (sql, params) = render(&filter);
        assert_eq!(sql, "name = ? AND kind = ?");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_empty_path() {
        let filter = NestedFilter::from_path(&[], "x");
        assert!(filter.is_empty());
        assert_eq!(render(&filter).0, "");
    }
}
