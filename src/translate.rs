//! End-to-end translation from SQL text to relational algebra.
//!
//! ```text
//! SQL → Scan → Resolve aliases → Validate → Build tree → Render
//! ```
//!
//! # Example
//!
//! ```
//! use relalg::translate::{translate, TranslateOptions};
//! use relalg::catalog::builtin;
//!
//! let output = translate(
//!     "SELECT Nome FROM Cliente WHERE idCliente = 1",
//!     builtin(),
//!     &TranslateOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(output.algebra, "π_Nome(σ_idCliente = 1(Cliente))");
//! ```

use serde::Serialize;
use tracing::debug;

use crate::algebra::{self, AlgebraNode, GraphNode};
use crate::catalog::{builtin, SchemaCatalog};
use crate::error::TranslateResult;
use crate::flow::ClauseFlow;
use crate::sql::{self, AliasPolicy, ParsedQuery};
use crate::validation::{self, SubqueryPolicy, ValidatedQuery};

// ============================================================================
// Options
// ============================================================================

/// Options for translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Handling of failing `IN (SELECT ...)` subqueries.
    pub subquery_policy: SubqueryPolicy,

    /// Handling of repeated aliases.
    pub alias_policy: AliasPolicy,
}

impl TranslateOptions {
    pub fn with_subquery_policy(mut self, policy: SubqueryPolicy) -> Self {
        self.subquery_policy = policy;
        self
    }

    pub fn with_alias_policy(mut self, policy: AliasPolicy) -> Self {
        self.alias_policy = policy;
        self
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// A successful translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// The parsed query the algebra was built from.
    pub query: ParsedQuery,

    /// Infix algebra expression.
    pub algebra: String,

    /// Labeled tree form of the same expression.
    pub tree: GraphNode,

    #[serde(skip)]
    pub plan: AlgebraNode,
}

impl Translation {
    pub fn flow(&self) -> ClauseFlow {
        ClauseFlow::from_query(&self.query)
    }
}

// ============================================================================
// Translation Functions
// ============================================================================

/// Translate `input` against `catalog`.
pub fn translate(
    input: &str,
    catalog: &SchemaCatalog,
    options: &TranslateOptions,
) -> TranslateResult<Translation> {
    let validated = validate(input, catalog, options)?;

    let plan = algebra::build(&validated);
    let algebra = plan.to_string();
    debug!(algebra = %algebra, nodes = plan.size(), "algebra built");

    Ok(Translation {
        query: validated.query,
        tree: plan.to_graph(),
        algebra,
        plan,
    })
}

/// Parse and validate `input` without building the algebra tree.
pub fn validate(
    input: &str,
    catalog: &SchemaCatalog,
    options: &TranslateOptions,
) -> TranslateResult<ValidatedQuery> {
    let result = sql::parse_query(input, options.alias_policy).and_then(|query| {
        debug!(
            from = %query.from_clause,
            joins = query.joins.len(),
            has_where = query.where_clause.is_some(),
            "query parsed"
        );
        validation::validate(query, catalog, options)
    });

    if let Err(err) = &result {
        debug!(kind = err.kind(), error = %err, "translation failed");
    }
    result
}

/// Translate `input` against the built-in catalog with default options.
pub fn parse(input: &str) -> TranslateResult<Translation> {
    translate(input, builtin(), &TranslateOptions::default())
}
