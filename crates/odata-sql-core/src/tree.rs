//! Arena-backed syntax tree for parsed filter expressions.
//!
//! Nodes live in a flat vector and refer to each other through [`NodeId`]
//! indices, so the tree carries parent links without reference cycles. The
//! parser owns the arena while building; consumers hold only shared
//! references during a single walk.

use std::fmt;

/// Identifier of a node inside a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The grammatical role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// An infix operator or binary function (`and`, `eq`, `contains`, ...).
    BinaryOperator,
    /// A unary function (`not`, `length`, `year`, ...).
    UnaryOperator,
    /// An identifier or navigation path (`name`, `metadata/tag/value`).
    LeftOperand,
    /// A literal: single-quoted string or base-10 integer, as written.
    RightOperand,
}

/// A single node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Unique id of this node within its tree.
    pub id: NodeId,
    /// The grammatical role.
    pub kind: NodeKind,
    /// Operator/function name or the literal textual operand.
    pub value: String,
    /// The parent node, if any.
    pub parent: Option<NodeId>,
    /// The left (or only) child.
    pub left: Option<NodeId>,
    /// The right child.
    pub right: Option<NodeId>,
}

/// A parsed filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.nodes[self.root.0]
    }

    /// Returns the node with the given id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns the left (or only) child of a node.
    #[must_use]
    pub fn left(&self, node: &Node) -> Option<&Node> {
        node.left.map(|id| self.node(id))
    }

    /// Returns the right child of a node.
    #[must_use]
    pub fn right(&self, node: &Node) -> Option<&Node> {
        node.right.map(|id| self.node(id))
    }

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent(&self, node: &Node) -> Option<&Node> {
        node.parent.map(|id| self.node(id))
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Renders the tree as indented text, one node per line.
    ///
    /// ```text
    /// and
    /// ├── eq
    /// │   ├── name
    /// │   └── 'test'
    /// └── gt
    ///     ├── id
    ///     └── 5
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root(), "", "", &mut out);
        out
    }

    fn render_node(&self, node: &Node, line_prefix: &str, child_prefix: &str, out: &mut String) {
        out.push_str(line_prefix);
        out.push_str(&node.value);
        out.push('\n');

        let children: Vec<&Node> = [self.left(node), self.right(node)]
            .into_iter()
            .flatten()
            .collect();
        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let connector = if last { "└── " } else { "├── " };
            let extension = if last { "    " } else { "│   " };
            self.render_node(
                child,
                &format!("{child_prefix}{connector}"),
                &format!("{child_prefix}{extension}"),
                out,
            );
        }
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Incremental builder used by the parser to assemble a [`SyntaxTree`]
/// bottom-up.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: NodeKind, value: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            kind,
            value,
            parent: None,
            left: None,
            right: None,
        });
        id
    }

    /// Adds a leaf operand node.
    pub fn add_operand(&mut self, kind: NodeKind, value: impl Into<String>) -> NodeId {
        self.push(kind, value.into())
    }

    /// Adds a unary operator node over an optional child.
    pub fn add_unary(&mut self, value: impl Into<String>, child: Option<NodeId>) -> NodeId {
        let id = self.push(NodeKind::UnaryOperator, value.into());
        if let Some(child) = child {
            self.nodes[id.0].left = Some(child);
            self.nodes[child.0].parent = Some(id);
        }
        id
    }

    /// Adds a binary operator node over two children.
    pub fn add_binary(&mut self, value: impl Into<String>, left: NodeId, right: NodeId) -> NodeId {
        let id = self.push(NodeKind::BinaryOperator, value.into());
        self.nodes[id.0].left = Some(left);
        self.nodes[id.0].right = Some(right);
        self.nodes[left.0].parent = Some(id);
        self.nodes[right.0].parent = Some(id);
        id
    }

    /// Finalizes the tree with the given root.
    #[must_use]
    pub fn finish(self, root: NodeId) -> SyntaxTree {
        SyntaxTree {
            nodes: self.nodes,
            root,
        }
    }
}
