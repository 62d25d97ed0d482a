//! Infix and labeled-tree renderings of algebra trees.
//!
//! Both forms are produced from [`AlgebraNode::label`], so the infix string
//! and the tree always agree fragment for fragment.

use serde::Serialize;
use std::fmt;

use super::plan::AlgebraNode;

/// Node kind as it appears in the labeled tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Table,
    Selection,
    Join,
    Projection,
}

/// Generic `{ type, label, children }` node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    pub children: Vec<GraphNode>,
}

impl GraphNode {
    /// Reassemble the infix form from labels alone.
    pub fn to_infix(&self) -> String {
        match (self.kind, self.children.as_slice()) {
            (NodeKind::Table, _) => wrap_rename(&self.label),
            (NodeKind::Join, [left, right]) => format!(
                "{} {} {}",
                join_operand(left.kind, left.to_infix()),
                self.label,
                join_operand(right.kind, right.to_infix())
            ),
            (_, [child]) => {
                let inner = match child.kind {
                    NodeKind::Table => child.label.clone(),
                    _ => child.to_infix(),
                };
                format!("{}({})", self.label, inner)
            }
            // Only reachable for hand-built trees with the wrong arity
            _ => self.label.clone(),
        }
    }
}

impl AlgebraNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            AlgebraNode::Table(_) => NodeKind::Table,
            AlgebraNode::Selection(_) => NodeKind::Selection,
            AlgebraNode::Join(_) => NodeKind::Join,
            AlgebraNode::Projection(_) => NodeKind::Projection,
        }
    }

    /// The fragment this node contributes to the infix form.
    pub fn label(&self) -> String {
        match self {
            AlgebraNode::Table(node) => match &node.alias {
                Some(alias) => format!("{} ← {}", alias, node.table),
                None => node.table.clone(),
            },
            AlgebraNode::Selection(node) => format!("σ_{}", node.condition),
            AlgebraNode::Join(node) => format!("⨝_{{{}}}", node.condition),
            AlgebraNode::Projection(node) => format!("π_{}", node.attributes),
        }
    }

    pub fn to_graph(&self) -> GraphNode {
        GraphNode {
            kind: self.kind(),
            label: self.label(),
            children: self.children().into_iter().map(|c| c.to_graph()).collect(),
        }
    }
}

impl fmt::Display for AlgebraNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgebraNode::Table(_) => f.write_str(&wrap_rename(&self.label())),
            AlgebraNode::Join(node) => write!(
                f,
                "{} {} {}",
                join_operand(node.left.kind(), node.left.to_string()),
                self.label(),
                join_operand(node.right.kind(), node.right.to_string())
            ),
            AlgebraNode::Selection(node) => {
                write!(f, "{}({})", self.label(), unary_operand(&node.input))
            }
            AlgebraNode::Projection(node) => {
                write!(f, "{}({})", self.label(), unary_operand(&node.input))
            }
        }
    }
}

/// Input of σ or π. A renamed table is written without its own parentheses.
fn unary_operand(input: &AlgebraNode) -> String {
    match input {
        AlgebraNode::Table(_) => input.label(),
        _ => input.to_string(),
    }
}

fn wrap_rename(label: &str) -> String {
    if label.contains(" ← ") {
        format!("({})", label)
    } else {
        label.to_string()
    }
}

fn join_operand(kind: NodeKind, rendered: String) -> String {
    if kind == NodeKind::Join {
        format!("({})", rendered)
    } else {
        rendered
    }
}
