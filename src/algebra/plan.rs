//! Relational algebra node types.

/// Relational algebra expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgebraNode {
    Table(TableNode),
    Selection(SelectionNode),
    Join(JoinNode),
    Projection(ProjectionNode),
}

/// A base relation, optionally renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNode {
    pub table: String,
    /// `None` when the query used the bare table name.
    pub alias: Option<String>,
}

/// σ over `input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionNode {
    pub condition: String,
    pub input: Box<AlgebraNode>,
}

/// Theta join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinNode {
    pub condition: String,
    pub left: Box<AlgebraNode>,
    pub right: Box<AlgebraNode>,
}

/// π over `input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionNode {
    pub attributes: String,
    pub input: Box<AlgebraNode>,
}

impl AlgebraNode {
    pub fn table(table: impl Into<String>, alias: Option<String>) -> Self {
        AlgebraNode::Table(TableNode {
            table: table.into(),
            alias,
        })
    }

    pub fn select(condition: impl Into<String>, input: AlgebraNode) -> Self {
        AlgebraNode::Selection(SelectionNode {
            condition: condition.into(),
            input: Box::new(input),
        })
    }

    pub fn join(condition: impl Into<String>, left: AlgebraNode, right: AlgebraNode) -> Self {
        AlgebraNode::Join(JoinNode {
            condition: condition.into(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn project(attributes: impl Into<String>, input: AlgebraNode) -> Self {
        AlgebraNode::Projection(ProjectionNode {
            attributes: attributes.into(),
            input: Box::new(input),
        })
    }

    /// Direct children, left to right.
    pub fn children(&self) -> Vec<&AlgebraNode> {
        match self {
            AlgebraNode::Table(_) => Vec::new(),
            AlgebraNode::Selection(node) => vec![&node.input],
            AlgebraNode::Join(node) => vec![&node.left, &node.right],
            AlgebraNode::Projection(node) => vec![&node.input],
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(|c| c.size()).sum::<usize>()
    }
}
