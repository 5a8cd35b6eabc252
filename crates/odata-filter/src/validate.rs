//! Tree validation: depth cap and identifier whitelisting.
//!
//! Identifier text is the one part of a filter that ends up inlined in SQL
//! (column names cannot be parameter-bound), so every left operand must
//! resolve to a known column of the target schema. The depth cap bounds
//! pathological nested expressions.

use odata_orm::NamingStrategy;
use odata_sql_core::{Node, NodeKind, SyntaxTree};

use crate::error::{FilterError, Result};

pub(crate) struct Validator<'a> {
    tree: &'a SyntaxTree,
    columns: &'a [&'a str],
    naming: &'a NamingStrategy,
    max_depth: usize,
}

impl<'a> Validator<'a> {
    pub fn new(
        tree: &'a SyntaxTree,
        columns: &'a [&'a str],
        naming: &'a NamingStrategy,
        max_depth: usize,
    ) -> Self {
        Self {
            tree,
            columns,
            naming,
            max_depth,
        }
    }

    /// Walks the tree, enforcing the depth cap (disabled when zero) and
    /// checking every left operand outside of `concat` against the column
    /// whitelist. Navigation paths are checked on their leftmost segment.
    pub fn run(&self) -> Result<()> {
        self.walk(self.tree.root(), 1)
    }

    fn walk(&self, node: &Node, depth: usize) -> Result<()> {
        if self.max_depth > 0 && depth > self.max_depth {
            return Err(FilterError::invalid(format!(
                "maximum query complexity exceeded: {depth} > {}",
                self.max_depth
            )));
        }

        if node.kind == NodeKind::LeftOperand {
            let inside_concat = self
                .tree
                .parent(node)
                .is_some_and(|parent| parent.value == "concat");
            if !inside_concat {
                let segment = node.value.split('/').next().unwrap_or_default();
                let column = self.naming.column_name(segment);
                if !self.columns.iter().any(|known| *known == column) {
                    return Err(FilterError::invalid(format!(
                        "unknown column name '{column}'"
                    )));
                }
            }
        }

        if let Some(left) = self.tree.left(node) {
            self.walk(left, depth + 1)?;
        }
        if let Some(right) = self.tree.right(node) {
            self.walk(right, depth + 1)?;
        }
        Ok(())
    }
}
