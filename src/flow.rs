//! Clause-level flow graph.
//!
//! Shows how the clauses of a query feed each other:
//!
//! ```text
//! FROM t ──► JOIN u ON c ──┐
//!   │                       ▼
//!   └──────────────────► WHERE w ──► SELECT s
//! ```
//!
//! Without a WHERE clause, SELECT is fed directly by FROM and every JOIN.

use serde::Serialize;
use std::fmt;

use crate::sql::ParsedQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowNode {
    pub id: usize,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowEdge {
    pub from: usize,
    pub to: usize,
}

/// Clause flow DAG. Node 0 is always the FROM node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseFlow {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl ClauseFlow {
    pub fn from_query(query: &ParsedQuery) -> Self {
        let mut flow = ClauseFlow {
            nodes: Vec::new(),
            edges: Vec::new(),
        };

        let from = flow.add(format!("FROM {}", query.from_clause));
        let mut feeders = vec![from];
        for join in &query.joins {
            let id = flow.add(format!("JOIN {} ON {}", join.table, join.condition));
            flow.link(from, id);
            feeders.push(id);
        }

        if let Some(where_clause) = &query.where_clause {
            let id = flow.add(format!("WHERE {}", where_clause));
            for feeder in feeders {
                flow.link(feeder, id);
            }
            feeders = vec![id];
        }

        let select = flow.add(format!("SELECT {}", query.select_clause));
        for feeder in feeders {
            flow.link(feeder, select);
        }

        flow
    }

    fn add(&mut self, label: String) -> usize {
        let id = self.nodes.len();
        self.nodes.push(FlowNode { id, label });
        id
    }

    fn link(&mut self, from: usize, to: usize) {
        self.edges.push(FlowEdge { from, to });
    }

    pub fn node(&self, id: usize) -> Option<&FlowNode> {
        self.nodes.get(id)
    }

    /// Ids of the nodes fed by `id`.
    pub fn successors(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges.iter().filter(move |e| e.from == id).map(|e| e.to)
    }
}

impl fmt::Display for ClauseFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for edge in &self.edges {
            let label = |id: usize| self.node(id).map(|n| n.label.as_str()).unwrap_or("?");
            writeln!(f, "{} -> {}", label(edge.from), label(edge.to))?;
        }
        Ok(())
    }
}
