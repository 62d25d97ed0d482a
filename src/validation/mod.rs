//! Semantic validation of parsed queries.
//!
//! Checks a [`ParsedQuery`] against a [`SchemaCatalog`] in a fixed order and
//! stops at the first failure:
//!
//! 1. every referenced table exists
//! 2. every SELECT field resolves
//! 3. every JOIN condition is well-formed and type-correct
//! 4. every WHERE comparison is type-correct
//!
//! `IN (SELECT ...)` subqueries are translated recursively and rewritten to
//! `field ∈ <algebra>`.

pub mod literal;
pub mod predicate;
pub mod scope;

pub use literal::{check_literal, LiteralCheck};
pub use predicate::{CompareOp, Comparison, Operand, Predicate};
pub use scope::{ResolvedColumn, Scope};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{ColumnType, SchemaCatalog};
use crate::error::{TranslateError, TranslateResult};
use crate::sql::ParsedQuery;
use crate::translate::{self, TranslateOptions};

/// How failures inside an `IN (SELECT ...)` subquery are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubqueryPolicy {
    /// Keep the fragment as raw text and carry on.
    #[default]
    Lenient,
    /// Fail the whole query.
    Strict,
}

/// One validated top-level WHERE conjunct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conjunct {
    pub predicate: Predicate,
    /// The single alias every column in the conjunct is qualified with.
    pub qualifier: Option<String>,
}

impl Conjunct {
    fn new(predicate: Predicate) -> Self {
        let qualifier = predicate.qualifier().map(str::to_string);
        Self {
            predicate,
            qualifier,
        }
    }

    /// Rendered condition, with logical symbols.
    pub fn text(&self) -> String {
        self.predicate.to_string()
    }
}

/// A query that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery {
    pub query: ParsedQuery,
    pub conjuncts: Vec<Conjunct>,
}

impl ValidatedQuery {
    /// True when some conjunct cannot be pushed to a single source.
    pub fn has_unattributed(&self) -> bool {
        self.conjuncts.iter().any(|c| c.qualifier.is_none())
    }
}

/// Validate `query` against `catalog`.
pub fn validate(
    query: ParsedQuery,
    catalog: &SchemaCatalog,
    options: &TranslateOptions,
) -> TranslateResult<ValidatedQuery> {
    let validator = Validator {
        scope: Scope::new(&query, catalog),
        query: &query,
        catalog,
        options,
    };

    validator.check_tables()?;
    validator.check_select()?;
    validator.check_joins()?;
    let conjuncts = validator.check_where()?;

    debug!(conjuncts = conjuncts.len(), "query validated");
    Ok(ValidatedQuery { query, conjuncts })
}

struct Validator<'a> {
    scope: Scope<'a>,
    query: &'a ParsedQuery,
    catalog: &'a SchemaCatalog,
    options: &'a TranslateOptions,
}

impl Validator<'_> {
    fn check_tables(&self) -> TranslateResult<()> {
        match self
            .query
            .referenced_tables()
            .into_iter()
            .find(|t| !self.catalog.contains_table(t))
        {
            Some(missing) => Err(TranslateError::UnknownTable(missing.to_string())),
            None => Ok(()),
        }
    }

    fn check_select(&self) -> TranslateResult<()> {
        if self.query.is_select_all() {
            return Ok(());
        }

        for field in self.query.select_fields() {
            if field.is_empty() {
                return Err(TranslateError::malformed(format!(
                    "empty field in SELECT list '{}'",
                    self.query.select_clause
                )));
            }
            if field == "*" {
                return Err(TranslateError::malformed(
                    "'*' cannot be combined with other SELECT fields",
                ));
            }
            if let Some(alias) = field.strip_suffix(".*") {
                if self.query.table_for_alias(alias).is_none() {
                    return Err(TranslateError::UnknownField {
                        field: field.to_string(),
                        table: None,
                    });
                }
                continue;
            }
            self.scope.resolve(field)?;
        }
        Ok(())
    }

    /// ON conditions are checked but kept as written.
    fn check_joins(&self) -> TranslateResult<()> {
        for join in &self.query.joins {
            let predicate = Predicate::parse(&join.condition)?;
            self.check_predicate(predicate)?;
        }
        Ok(())
    }

    fn check_where(&self) -> TranslateResult<Vec<Conjunct>> {
        let Some(where_clause) = &self.query.where_clause else {
            return Ok(Vec::new());
        };

        Predicate::conjuncts(where_clause)?
            .into_iter()
            .map(|p| self.check_predicate(p).map(Conjunct::new))
            .collect()
    }

    /// Check a predicate, returning it with any subqueries rewritten.
    fn check_predicate(&self, predicate: Predicate) -> TranslateResult<Predicate> {
        match predicate {
            Predicate::Compare(comparison) => {
                self.check_comparison(&comparison)?;
                Ok(Predicate::Compare(comparison))
            }
            Predicate::InList { field, values } => {
                let left = self.comparable_column(&field)?;
                for value in &values {
                    self.check_literal_operand(&field, left.ty, value)?;
                }
                Ok(Predicate::InList { field, values })
            }
            Predicate::InSubquery {
                field,
                subquery,
                source,
                ..
            } => self.check_subquery(field, subquery, source),
            Predicate::Raw(text) => Ok(Predicate::Raw(text)),
            Predicate::Group(inner) => Ok(Predicate::Group(Box::new(self.check_predicate(*inner)?))),
            Predicate::And(parts) => self.check_all(parts).map(Predicate::And),
            Predicate::Or(parts) => self.check_all(parts).map(Predicate::Or),
        }
    }

    fn check_all(&self, parts: Vec<Predicate>) -> TranslateResult<Vec<Predicate>> {
        parts
            .into_iter()
            .map(|p| self.check_predicate(p))
            .collect()
    }

    fn check_comparison(&self, comparison: &Comparison) -> TranslateResult<()> {
        let left = self.comparable_column(&comparison.left)?;

        match &comparison.right {
            Operand::Column(right) => {
                let mismatch = || TranslateError::TypeMismatch {
                    field: comparison.left.clone(),
                    expected: left.ty,
                    found: right.clone(),
                };

                // A bare word naming no column is an unquoted literal
                let other = match self.scope.resolve(right) {
                    Err(TranslateError::UnknownField { table: None, .. }) if !right.contains('.') => {
                        return Err(mismatch())
                    }
                    result => result?,
                };

                if left.ty.is_comparable_with(other.ty) {
                    Ok(())
                } else {
                    Err(mismatch())
                }
            }
            Operand::Literal(literal) => {
                self.check_literal_operand(&comparison.left, left.ty, literal)
            }
        }
    }

    fn check_literal_operand(
        &self,
        field: &str,
        ty: ColumnType,
        literal: &str,
    ) -> TranslateResult<()> {
        match check_literal(ty, literal) {
            LiteralCheck::Compatible => Ok(()),
            LiteralCheck::Mismatch => Err(TranslateError::TypeMismatch {
                field: field.to_string(),
                expected: ty,
                found: literal.to_string(),
            }),
            LiteralCheck::Unsupported => Err(unsupported(field, ty)),
        }
    }

    /// Resolve a left operand and make sure its type can be compared.
    fn comparable_column(&self, field: &str) -> TranslateResult<ResolvedColumn> {
        let column = self.scope.resolve(field)?;
        if column.ty == ColumnType::Bool {
            return Err(unsupported(field, column.ty));
        }
        Ok(column)
    }

    fn check_subquery(
        &self,
        field: String,
        subquery: String,
        source: String,
    ) -> TranslateResult<Predicate> {
        let left = self.comparable_column(&field)?;

        match self.translate_subquery(&field, left.ty, &subquery) {
            Ok(algebra) => {
                debug!(field = %field, "subquery rewritten");
                Ok(Predicate::InSubquery {
                    field,
                    subquery,
                    source,
                    algebra: Some(algebra),
                })
            }
            Err(err) => match self.options.subquery_policy {
                SubqueryPolicy::Strict => Err(err),
                SubqueryPolicy::Lenient => {
                    warn!(
                        subquery = %subquery,
                        error = %err,
                        "subquery left unvalidated"
                    );
                    Ok(Predicate::Raw(source))
                }
            },
        }
    }

    fn translate_subquery(
        &self,
        field: &str,
        expected: ColumnType,
        subquery: &str,
    ) -> TranslateResult<String> {
        let inner = translate::translate(subquery, self.catalog, self.options)?;

        let selected = match inner.query.select_fields().as_slice() {
            [single] if !single.ends_with('*') => single.to_string(),
            _ => {
                return Err(TranslateError::malformed(format!(
                    "subquery must select exactly one field: '{}'",
                    subquery
                )))
            }
        };

        let inner_column = Scope::new(&inner.query, self.catalog).resolve(&selected)?;
        if !expected.is_comparable_with(inner_column.ty) {
            return Err(TranslateError::TypeMismatch {
                field: field.to_string(),
                expected,
                found: "(subquery)".to_string(),
            });
        }

        Ok(inner.algebra)
    }
}

fn unsupported(field: &str, ty: ColumnType) -> TranslateError {
    TranslateError::UnsupportedType {
        field: field.to_string(),
        declared: ty.to_string(),
    }
}
