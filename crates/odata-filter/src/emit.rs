//! Expression emission.
//!
//! Walks the syntax tree and attaches predicates to the query builder:
//! parameterized SQL fragments for plain columns, nested filters for
//! navigation paths. Negation is a mode, not a transform pass: entering a
//! `not` subtree sets `negated` and the emitter reads the reversed operator
//! and prefix tables, so the tree itself stays untouched and no `NOT (...)`
//! wrapper is ever emitted.

use odata_orm::{NamingStrategy, NestedFilter, QueryBuilder, SqlValue};
use odata_sql_core::{Node, NodeKind, SyntaxTree};

use crate::dialect::Dialect;
use crate::error::{FilterError, Result};
use crate::ops::{comparison_sql, is_comparison, is_string_predicate, PrefixTables};

pub(crate) struct Emitter<'a> {
    dialect: Dialect,
    prefixes: &'a PrefixTables,
    naming: NamingStrategy,
}

impl<'a> Emitter<'a> {
    pub fn new(dialect: Dialect, prefixes: &'a PrefixTables, naming: NamingStrategy) -> Self {
        Self {
            dialect,
            prefixes,
            naming,
        }
    }

    /// Emits the whole tree into the builder.
    ///
    /// Subexpressions compose into detached sessions and attach only once
    /// they emitted successfully, so an error leaves the builder's existing
    /// predicates alone.
    pub fn emit(&self, tree: &SyntaxTree, builder: QueryBuilder) -> Result<QueryBuilder> {
        self.emit_node(tree, tree.root(), builder, false)
    }

    fn emit_node(
        &self,
        tree: &SyntaxTree,
        node: &Node,
        builder: QueryBuilder,
        negated: bool,
    ) -> Result<QueryBuilder> {
        match node.kind {
            NodeKind::BinaryOperator => match node.value.as_str() {
                "and" | "or" => self.emit_logical(tree, node, builder, negated),
                op if is_comparison(op) => self.emit_comparison(tree, node, builder, negated),
                op if is_string_predicate(op) => self.emit_like(tree, node, builder, negated),
                op => Err(FilterError::invalid(format!(
                    "operator '{op}' is not supported as a predicate"
                ))),
            },
            NodeKind::UnaryOperator => {
                if node.value == "not" {
                    let child = tree
                        .left(node)
                        .ok_or_else(|| FilterError::invalid("empty 'not' expression"))?;
                    // negation applies once; a nested `not` inherits the mode
                    self.emit_node(tree, child, builder, true)
                } else {
                    Err(FilterError::invalid(
                        "root level operators other then 'not' are not supported",
                    ))
                }
            }
            NodeKind::LeftOperand | NodeKind::RightOperand => {
                Err(FilterError::invalid("root level operands are not supported"))
            }
        }
    }

    fn children<'t>(&self, tree: &'t SyntaxTree, node: &Node) -> Result<(&'t Node, &'t Node)> {
        let left = tree
            .left(node)
            .ok_or_else(|| FilterError::invalid("malformed expression"))?;
        let right = tree
            .right(node)
            .ok_or_else(|| FilterError::invalid("malformed expression"))?;
        Ok((left, right))
    }

    /// Emits `and`/`or`: each side goes into a fresh session so child
    /// predicates cannot accumulate into each other, then the groups attach
    /// with the connective, flipped under negation (De Morgan).
    fn emit_logical(
        &self,
        tree: &SyntaxTree,
        node: &Node,
        builder: QueryBuilder,
        negated: bool,
    ) -> Result<QueryBuilder> {
        let (left, right) = self.children(tree, node)?;
        let left_builder = self.emit_node(tree, left, builder.session(), negated)?;
        let right_builder = self.emit_node(tree, right, builder.session(), negated)?;

        let use_or = (node.value == "or") != negated;
        let builder = builder.filter_group(left_builder);
        Ok(if use_or {
            builder.or_filter_group(right_builder)
        } else {
            builder.filter_group(right_builder)
        })
    }

    fn emit_comparison(
        &self,
        tree: &SyntaxTree,
        node: &Node,
        builder: QueryBuilder,
        negated: bool,
    ) -> Result<QueryBuilder> {
        let op = node.value.as_str();
        let (left, right) = self.children(tree, node)?;
        self.require_literal(right)?;

        if left.kind == NodeKind::LeftOperand && left.value.contains('/') {
            let token = self
                .prefixes
                .comparison_token(op, negated)
                .ok_or_else(|| FilterError::invalid(format!("unknown operator '{op}'")))?;
            let leaf = format!("{token}{}", literal_text(right));
            let map = NestedFilter::from_path(&self.nav_path(&left.value), leaf);
            return Ok(builder.filter_nested(map));
        }

        let column = self.column_sql(tree, left)?;
        let symbol = comparison_sql(op, negated)
            .ok_or_else(|| FilterError::invalid(format!("unknown operator '{op}'")))?;
        Ok(builder.filter(format!("{column} {symbol} ?"), vec![literal_param(right)]))
    }

    /// Rejects non-literal right operands of comparisons.
    fn require_literal(&self, right: &Node) -> Result<()> {
        match right.kind {
            NodeKind::RightOperand => Ok(()),
            NodeKind::UnaryOperator => Err(FilterError::invalid(
                "unary operators not supported as right operand of equality operators",
            )),
            NodeKind::BinaryOperator if right.value == "concat" => Err(FilterError::invalid(
                "concat not supported as right operand of equality operators",
            )),
            _ => Err(FilterError::invalid(
                "only literal values are supported as right operand of equality operators",
            )),
        }
    }

    fn emit_like(
        &self,
        tree: &SyntaxTree,
        node: &Node,
        builder: QueryBuilder,
        negated: bool,
    ) -> Result<QueryBuilder> {
        let op = node.value.as_str();
        let (left, right) = self.children(tree, node)?;

        let text = match right.kind {
            NodeKind::RightOperand => unquote(&right.value),
            _ => None,
        };
        let Some(text) = text else {
            return Err(FilterError::invalid(format!(
                "'{op}' requires a quoted string literal as its second argument"
            )));
        };

        // a literal % in the search text must not act as a wildcard
        let (text, escaped) = if text.contains('%') {
            (text.replace('%', "\\%"), true)
        } else {
            (text, false)
        };
        let pattern = match op {
            "contains" => format!("%{text}%"),
            "startswith" => format!("{text}%"),
            _ => format!("%{text}"),
        };

        if left.kind == NodeKind::LeftOperand && left.value.contains('/') {
            let leaf = format!("{}{pattern}", self.prefixes.like_token(negated));
            let map = NestedFilter::from_path(&self.nav_path(&left.value), leaf);
            return Ok(builder.filter_nested(map));
        }

        let column = self.column_sql(tree, left)?;
        let keyword = if negated { "NOT LIKE" } else { "LIKE" };
        let mut sql = format!("{column} {keyword} ?");
        if escaped {
            sql.push_str(" ESCAPE '\\'");
        }
        Ok(builder.filter(sql, vec![SqlValue::Text(pattern)]))
    }

    /// Splits a navigation path and translates each segment to its column
    /// name.
    fn nav_path(&self, value: &str) -> Vec<String> {
        value
            .split('/')
            .map(|segment| self.naming.column_name(segment))
            .collect()
    }

    /// Renders the SQL text for a left operand: a bare identifier, a unary
    /// function chain, or a concat tree.
    fn column_sql(&self, tree: &SyntaxTree, node: &Node) -> Result<String> {
        match node.kind {
            NodeKind::LeftOperand => {
                if node.value.contains('/') {
                    Err(FilterError::invalid(
                        "navigation paths are not supported inside function arguments",
                    ))
                } else {
                    Ok(self.naming.column_name(&node.value))
                }
            }
            NodeKind::UnaryOperator => self.unary_chain_sql(tree, node),
            NodeKind::BinaryOperator if node.value == "concat" => self.concat_sql(tree, node),
            _ => Err(FilterError::invalid(
                "only column expressions are supported as left operand of equality operators",
            )),
        }
    }

    /// Renders a unary function chain (`length(trim(x))`) by recursing to
    /// the innermost argument and wrapping on the way back out.
    fn unary_chain_sql(&self, tree: &SyntaxTree, node: &Node) -> Result<String> {
        let arg = match tree.left(node) {
            Some(child) => Some(self.argument_sql(tree, child)?),
            None => None,
        };
        self.dialect
            .render_unary(&node.value, arg.as_deref())
            .ok_or_else(|| FilterError::invalid(format!("unknown function '{}'", node.value)))
    }

    /// Renders a concat tree, joining children with the SQL standard `||`.
    fn concat_sql(&self, tree: &SyntaxTree, node: &Node) -> Result<String> {
        let (left, right) = self.children(tree, node)?;
        let left_sql = self.argument_sql(tree, left)?;
        let right_sql = self.argument_sql(tree, right)?;
        Ok(format!("{left_sql} || {right_sql}"))
    }

    /// Renders a function argument. Literals are carried as written,
    /// quotes included; everything else renders as a column expression.
    fn argument_sql(&self, tree: &SyntaxTree, node: &Node) -> Result<String> {
        match node.kind {
            NodeKind::RightOperand => Ok(node.value.clone()),
            _ => self.column_sql(tree, node),
        }
    }
}

/// Strips the outer quotes from a string literal and resolves the OData
/// `''` escape. Returns `None` for unquoted values.
fn unquote(raw: &str) -> Option<String> {
    let inner = raw.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(inner.replace("''", "'"))
}

/// Returns the literal's text: unquoted string content or raw integer.
fn literal_text(node: &Node) -> String {
    unquote(&node.value).unwrap_or_else(|| node.value.clone())
}

/// Binds a literal: quoted strings as text, integers as integers.
fn literal_param(node: &Node) -> SqlValue {
    match unquote(&node.value) {
        Some(text) => SqlValue::Text(text),
        None => SqlValue::from_literal(&node.value),
    }
}
