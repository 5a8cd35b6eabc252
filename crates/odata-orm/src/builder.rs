//! Chainable query builder.
//!
//! Builders are composed by value: each method consumes the builder and
//! returns the updated one. Grouping comes from attaching detached
//! sub-builders obtained through [`QueryBuilder::session`]; a group with
//! more than one conjunct renders parenthesized.

use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::Result;
use crate::naming::NamingStrategy;
use crate::nested::NestedFilter;
use crate::prefix::OperatorPrefixes;
use crate::schema::Schema;
use crate::value::SqlValue;

/// How a conjunct attaches to the predicates before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

impl Connective {
    const fn sql(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// A single predicate attached to a builder.
#[derive(Debug, Clone)]
enum Predicate {
    /// A raw parameterized SQL fragment.
    Fragment { sql: String, params: Vec<SqlValue> },
    /// A nested filter rendered through the deep-filter plugin.
    Nested(NestedFilter),
    /// A detached sub-builder, parenthesized when it holds several parts.
    Group(QueryBuilder),
}

#[derive(Debug, Clone)]
struct Conjunct {
    connective: Connective,
    predicate: Predicate,
}

/// An ORM-style query builder accumulating `WHERE` predicates.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    conjuncts: Vec<Conjunct>,
    naming: NamingStrategy,
    deep_filter: bool,
    prefixes: Option<OperatorPrefixes>,
}

impl QueryBuilder {
    /// Creates an empty builder with the default naming strategy and no
    /// plugins registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the naming strategy.
    #[must_use]
    pub fn with_naming(mut self, naming: NamingStrategy) -> Self {
        self.naming = naming;
        self
    }

    /// Returns the naming strategy.
    #[must_use]
    pub fn naming_strategy(&self) -> &NamingStrategy {
        &self.naming
    }

    /// Translates an identifier through the naming strategy.
    #[must_use]
    pub fn column_name(&self, identifier: &str) -> String {
        self.naming.column_name(identifier)
    }

    /// Returns a detached builder sharing this builder's configuration but
    /// none of its predicates. Used to compose subexpressions without
    /// inheriting already-attached conditions.
    #[must_use]
    pub fn session(&self) -> Self {
        Self {
            conjuncts: Vec::new(),
            naming: self.naming.clone(),
            deep_filter: self.deep_filter,
            prefixes: self.prefixes.clone(),
        }
    }

    /// Returns true if no predicates are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conjuncts.is_empty()
    }

    fn attach(mut self, connective: Connective, predicate: Predicate) -> Self {
        self.conjuncts.push(Conjunct {
            connective,
            predicate,
        });
        self
    }

    /// Attaches a parameterized fragment with `AND`.
    #[must_use]
    pub fn filter(self, sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        self.attach(
            Connective::And,
            Predicate::Fragment {
                sql: sql.into(),
                params,
            },
        )
    }

    /// Attaches a parameterized fragment with `OR`.
    #[must_use]
    pub fn or_filter(self, sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        self.attach(
            Connective::Or,
            Predicate::Fragment {
                sql: sql.into(),
                params,
            },
        )
    }

    /// Attaches a nested filter with `AND`.
    #[must_use]
    pub fn filter_nested(self, map: NestedFilter) -> Self {
        self.attach(Connective::And, Predicate::Nested(map))
    }

    /// Attaches a nested filter with `OR`.
    #[must_use]
    pub fn or_filter_nested(self, map: NestedFilter) -> Self {
        self.attach(Connective::Or, Predicate::Nested(map))
    }

    /// Attaches a detached sub-builder with `AND`. Empty sub-builders are
    /// dropped.
    #[must_use]
    pub fn filter_group(self, group: Self) -> Self {
        if group.is_empty() {
            return self;
        }
        self.attach(Connective::And, Predicate::Group(group))
    }

    /// Attaches a detached sub-builder with `OR`. Empty sub-builders are
    /// dropped.
    #[must_use]
    pub fn or_filter_group(self, group: Self) -> Self {
        if group.is_empty() {
            return self;
        }
        self.attach(Connective::Or, Predicate::Group(group))
    }

    /// Returns true if the deep-filter plugin is registered.
    #[must_use]
    pub fn has_deep_filter(&self) -> bool {
        self.deep_filter
    }

    /// Registers the deep-filter plugin, enabling nested-map rendering.
    #[must_use]
    pub fn register_deep_filter(mut self) -> Self {
        self.deep_filter = true;
        self
    }

    /// Returns the registered operator-prefix configuration, if any.
    #[must_use]
    pub fn operator_prefixes(&self) -> Option<&OperatorPrefixes> {
        self.prefixes.as_ref()
    }

    /// Registers an operator-prefix configuration.
    #[must_use]
    pub fn register_operator_prefixes(mut self, prefixes: OperatorPrefixes) -> Self {
        self.prefixes = Some(prefixes);
        self
    }

    /// Renders the accumulated predicates without the `WHERE` keyword.
    fn render(&self) -> (String, Vec<SqlValue>) {
        let prefixes = self.prefixes.clone().unwrap_or_default();
        let mut sql = String::new();
        let mut params = Vec::new();

        for (i, conjunct) in self.conjuncts.iter().enumerate() {
            if i > 0 {
                sql.push_str(conjunct.connective.sql());
            }
            match &conjunct.predicate {
                Predicate::Fragment {
                    sql: fragment,
                    params: fragment_params,
                } => {
                    sql.push_str(fragment);
                    params.extend(fragment_params.iter().cloned());
                }
                Predicate::Nested(map) => {
                    let (nested_sql, nested_params) = map.render(&prefixes);
                    sql.push_str(&nested_sql);
                    params.extend(nested_params);
                }
                Predicate::Group(group) => {
                    let (group_sql, group_params) = group.render();
                    if group.conjuncts.len() > 1 {
                        sql.push('(');
                        sql.push_str(&group_sql);
                        sql.push(')');
                    } else {
                        sql.push_str(&group_sql);
                    }
                    params.extend(group_params);
                }
            }
        }

        (sql, params)
    }

    /// Builds the `WHERE` clause and its parameters. Returns an empty
    /// string when no predicates are attached.
    #[must_use]
    pub fn build_where(&self) -> (String, Vec<SqlValue>) {
        let (sql, params) = self.render();
        if sql.is_empty() {
            (sql, params)
        } else {
            (format!("WHERE {sql}"), params)
        }
    }

    /// Builds a full `SELECT` statement for the schema's table.
    #[must_use]
    pub fn build_select<S: Schema>(&self) -> (String, Vec<SqlValue>) {
        let (where_clause, params) = self.build_where();
        let mut sql = format!("SELECT {} FROM {}", S::COLUMNS.join(", "), S::TABLE);
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause);
        }
        (sql, params)
    }

    /// Executes the query and returns all matching rows.
    pub async fn fetch_all<S, M>(&self, pool: &SqlitePool) -> Result<Vec<M>>
    where
        S: Schema,
        M: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let (sql, params) = self.build_select::<S>();
        debug!(target: "odata_orm::builder", %sql, "executing select");
        let mut query = sqlx::query_as::<_, M>(&sql);
        for param in params {
            query = bind_param(query, param);
        }
        Ok(query.fetch_all(pool).await?)
    }

    /// Returns the count of matching rows.
    pub async fn count<S: Schema>(&self, pool: &SqlitePool) -> Result<i64> {
        let (where_clause, params) = self.build_where();
        let mut sql = format!("SELECT COUNT(*) FROM {}", S::TABLE);
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause);
        }
        debug!(target: "odata_orm::builder", %sql, "executing count");
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for param in params {
            query = match param {
                SqlValue::Null => query.bind(Option::<i64>::None),
                SqlValue::Bool(b) => query.bind(b),
                SqlValue::Int(i) => query.bind(i),
                SqlValue::Float(f) => query.bind(f),
                SqlValue::Text(s) => query.bind(s),
            };
        }
        Ok(query.fetch_one(pool).await?)
    }
}

/// Binds a [`SqlValue`] parameter to a `query_as` query.
fn bind_param<'q, M>(
    query: sqlx::query::QueryAs<'q, sqlx::Sqlite, M, SqliteArguments<'q>>,
    value: SqlValue,
) -> sqlx::query::QueryAs<'q, sqlx::Sqlite, M, SqliteArguments<'q>>
where
    M: for<'r> FromRow<'r, SqliteRow>,
{
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
    }
}
