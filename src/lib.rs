//! # relalg
//!
//! Translates SQL `SELECT` queries into relational algebra, validated against
//! a schema catalog.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      SQL text                            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql::scanner]
//! ┌─────────────────────────────────────────────────────────┐
//! │           Clauses (SELECT / FROM / JOIN / WHERE)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql::resolve]
//! ┌─────────────────────────────────────────────────────────┐
//! │             ParsedQuery (alias → table map)              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [validation]  ◄── SchemaCatalog
//! ┌─────────────────────────────────────────────────────────┐
//! │        ValidatedQuery (type-checked WHERE conjuncts)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [algebra]
//! ┌─────────────────────────────────────────────────────────┐
//! │     AlgebraNode  →  infix string  /  labeled tree        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The usual entry point is [`translate::translate`], or [`parse`] for the
//! built-in catalog with default options.

pub mod algebra;
pub mod catalog;
pub mod config;
pub mod error;
pub mod flow;
pub mod sql;
pub mod translate;
pub mod validation;

pub use algebra::{AlgebraNode, GraphNode, NodeKind};
pub use catalog::{ColumnType, SchemaCatalog};
pub use error::{TranslateError, TranslateResult};
pub use flow::ClauseFlow;
pub use sql::ParsedQuery;
pub use translate::{parse, translate, TranslateOptions, Translation};
