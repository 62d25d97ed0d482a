//! Relational algebra: tree, builder and renderers.

mod builder;
mod plan;
mod render;

pub use builder::{build, AlgebraBuilder};
pub use plan::*;
pub use render::{GraphNode, NodeKind};
