//! WHERE / ON predicate syntax.
//!
//! Predicates are parsed from clause text into a small tree. `OR` binds
//! looser than `AND`, parentheses group, and the leaves are comparisons,
//! `IN` lists and `IN` subqueries. The tree renders back with the logical
//! symbols used in algebra output.

use std::fmt;

use crate::error::{TranslateError, TranslateResult};
use crate::sql::lexer::{self, strip_enclosing_parens};
use crate::sql::token::{is_reserved, Keyword};

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    GtEq,
    LtEq,
    NotEq,
    Eq,
    Gt,
    Lt,
}

impl CompareOp {
    /// Operators in the order they are tried: longest symbol first, so `>=`
    /// wins over `>`.
    pub const BY_LENGTH: [CompareOp; 6] = [
        CompareOp::GtEq,
        CompareOp::LtEq,
        CompareOp::NotEq,
        CompareOp::Eq,
        CompareOp::Gt,
        CompareOp::Lt,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::GtEq => ">=",
            CompareOp::LtEq => "<=",
            CompareOp::NotEq => "<>",
            CompareOp::Eq => "=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Column(String),
    Literal(String),
}

impl Operand {
    /// Unquoted identifiers (optionally `alias.column`) are column
    /// references; everything else is a literal.
    pub fn classify(text: &str) -> Operand {
        if is_identifier(text) && !is_reserved(text) {
            Operand::Column(text.to_string())
        } else {
            Operand::Literal(text.to_string())
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Operand::Column(s) | Operand::Literal(s) => s,
        }
    }
}

fn is_identifier(text: &str) -> bool {
    let mut parts = text.split('.');
    let valid_part = |p: &str| {
        let mut chars = p.chars();
        chars
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_')
            && chars.all(|c| c.is_alphanumeric() || c == '_')
    };

    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, None) => valid_part(name),
        (Some(alias), Some(column), None) => valid_part(alias) && valid_part(column),
        _ => false,
    }
}

/// `left <op> right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub left: String,
    pub op: CompareOp,
    pub right: Operand,
}

/// A parsed predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Compare(Comparison),
    InList {
        field: String,
        values: Vec<String>,
    },
    InSubquery {
        field: String,
        subquery: String,
        /// Source text of the whole `field IN (...)` fragment.
        source: String,
        /// Set once the subquery has been translated.
        algebra: Option<String>,
    },
    /// Text kept verbatim without validation.
    Raw(String),
    Group(Box<Predicate>),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Parse a condition. `OR` is split first so `AND` binds tighter.
    pub fn parse(text: &str) -> TranslateResult<Predicate> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TranslateError::malformed("empty condition"));
        }

        let ors = lexer::split_top_level(text, Keyword::Or)?;
        if ors.len() > 1 {
            return ors
                .into_iter()
                .map(Predicate::parse)
                .collect::<TranslateResult<Vec<_>>>()
                .map(Predicate::Or);
        }

        let ands = lexer::split_top_level(text, Keyword::And)?;
        if ands.len() > 1 {
            return ands
                .into_iter()
                .map(Predicate::parse)
                .collect::<TranslateResult<Vec<_>>>()
                .map(Predicate::And);
        }

        if let Some(inner) = strip_enclosing_parens(text) {
            return Ok(Predicate::Group(Box::new(Predicate::parse(inner)?)));
        }

        parse_atom(text)
    }

    /// Split a WHERE clause into its top-level conjuncts.
    pub fn conjuncts(where_clause: &str) -> TranslateResult<Vec<Predicate>> {
        Ok(match Predicate::parse(where_clause)? {
            Predicate::And(parts) => parts,
            other => vec![other],
        })
    }

    /// Column references in source order.
    pub fn column_refs(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.collect_refs(&mut refs);
        refs
    }

    fn collect_refs<'a>(&'a self, refs: &mut Vec<&'a str>) {
        match self {
            Predicate::Compare(c) => {
                refs.push(&c.left);
                if let Operand::Column(right) = &c.right {
                    refs.push(right);
                }
            }
            Predicate::InList { field, .. } | Predicate::InSubquery { field, .. } => {
                refs.push(field)
            }
            Predicate::Raw(_) => {}
            Predicate::Group(inner) => inner.collect_refs(refs),
            Predicate::And(parts) | Predicate::Or(parts) => {
                for part in parts {
                    part.collect_refs(refs);
                }
            }
        }
    }

    pub fn contains_raw(&self) -> bool {
        match self {
            Predicate::Raw(_) => true,
            Predicate::Group(inner) => inner.contains_raw(),
            Predicate::And(parts) | Predicate::Or(parts) => parts.iter().any(|p| p.contains_raw()),
            _ => false,
        }
    }

    /// The one alias every column reference is qualified with, if any.
    pub fn qualifier(&self) -> Option<&str> {
        if self.contains_raw() {
            return None;
        }

        let mut qualifier = None;
        for column in self.column_refs() {
            let (alias, _) = column.split_once('.')?;
            match qualifier {
                None => qualifier = Some(alias),
                Some(q) if q == alias => {}
                Some(_) => return None,
            }
        }
        qualifier
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Compare(c) => write!(f, "{} {} {}", c.left, c.op, c.right.text()),
            Predicate::InList { field, values } => {
                write!(f, "{} ∈ {{{}}}", field, values.join(", "))
            }
            Predicate::InSubquery {
                field,
                algebra: Some(algebra),
                ..
            } => write!(f, "{} ∈ {}", field, algebra),
            Predicate::InSubquery { source, .. } => f.write_str(source),
            Predicate::Raw(text) => f.write_str(text),
            Predicate::Group(inner) => write!(f, "({})", inner),
            Predicate::And(parts) => write_joined(f, parts, " ∧ "),
            Predicate::Or(parts) => write_joined(f, parts, " ∨ "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, parts: &[Predicate], sep: &str) -> fmt::Result {
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", part)?;
    }
    Ok(())
}

fn parse_atom(text: &str) -> TranslateResult<Predicate> {
    let words = lexer::words(text)?;

    if let Some(in_word) = words.iter().find(|w| w.is_top_level() && w.is(Keyword::In)) {
        let field = text[..in_word.start].trim();
        let rest = text[in_word.end..].trim();
        if field.is_empty() {
            return Err(TranslateError::malformed(format!(
                "missing field before IN in '{}'",
                text
            )));
        }
        let inner = strip_enclosing_parens(rest).ok_or_else(|| {
            TranslateError::malformed(format!(
                "IN must be followed by a parenthesized list or subquery in '{}'",
                text
            ))
        })?;

        let starts_with_select = lexer::words(inner)?
            .first()
            .is_some_and(|w| w.is(Keyword::Select));
        if starts_with_select {
            return Ok(Predicate::InSubquery {
                field: field.to_string(),
                subquery: inner.to_string(),
                source: text.to_string(),
                algebra: None,
            });
        }

        let values = split_list(inner);
        if values.iter().any(|v| v.is_empty()) {
            return Err(TranslateError::malformed(format!(
                "empty value in IN list '{}'",
                text
            )));
        }
        return Ok(Predicate::InList {
            field: field.to_string(),
            values: values.into_iter().map(str::to_string).collect(),
        });
    }

    for op in CompareOp::BY_LENGTH {
        let Some(op_word) = words
            .iter()
            .find(|w| w.is_top_level() && w.text == op.symbol())
        else {
            continue;
        };

        let left = text[..op_word.start].trim();
        let right = text[op_word.end..].trim();
        if left.is_empty() || right.is_empty() {
            return Err(TranslateError::malformed(format!(
                "operator '{}' is missing an operand in '{}'",
                op, text
            )));
        }

        return Ok(Predicate::Compare(Comparison {
            left: left.to_string(),
            op,
            right: Operand::classify(right),
        }));
    }

    Err(TranslateError::malformed(format!(
        "no comparison operator found in '{}' (operators must be surrounded by spaces)",
        text
    )))
}

/// Split a comma-separated list, ignoring commas inside string literals.
fn split_list(text: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut in_quote = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '\'' => in_quote = !in_quote,
            ',' if !in_quote => {
                items.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(text[start..].trim());
    items
}
