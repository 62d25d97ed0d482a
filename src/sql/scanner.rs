//! Clause scanner.
//!
//! Splits a query into its SELECT, FROM, JOIN and WHERE fragments. Only
//! top-level words outside string literals count as clause keywords, and
//! each keyword ends the clause before it:
//!
//! ```text
//! SELECT <list> FROM <table> [[AS] alias] (JOIN <table> [[AS] alias] ON <cond>)* [WHERE <rest>]
//! ```
//!
//! The scanner never looks at the schema.

use tracing::debug;

use super::lexer::{self, Word};
use super::query::{Clauses, JoinClause, TableRef};
use super::token::{is_keyword, is_reserved, Keyword};
use crate::error::{TranslateError, TranslateResult};

/// A clause keyword found at the top level, with the span its clause starts after.
#[derive(Debug, Clone, Copy)]
struct Boundary {
    keyword: Keyword,
    /// Start of the keyword (including an `INNER` prefix).
    start: usize,
    /// End of the keyword.
    end: usize,
}

/// Scan `input` into raw clause fragments.
pub fn scan(input: &str) -> TranslateResult<Clauses> {
    if input.trim().is_empty() {
        return Err(TranslateError::EmptyQuery);
    }

    let words = lexer::words(input)?;
    let first = words.first().ok_or(TranslateError::EmptyQuery)?;
    if !first.is(Keyword::Select) {
        return Err(TranslateError::malformed(format!(
            "query must start with SELECT, found '{}'",
            first.text
        )));
    }

    let from_idx = words
        .iter()
        .position(|w| w.is_top_level() && w.is(Keyword::From))
        .ok_or_else(|| TranslateError::malformed("missing FROM clause"))?;
    let from = words[from_idx];

    let select = input[first.end..from.start].trim();
    if select.is_empty() {
        return Err(TranslateError::malformed("SELECT list is empty"));
    }

    let boundaries = find_boundaries(&words, from_idx)?;

    let from_end = boundaries.first().map_or(input.len(), |b| b.start);
    let from_ref = parse_table_ref(&input[from.end..from_end], Keyword::From)?;

    let mut joins = Vec::new();
    let mut where_clause = None;
    for (i, boundary) in boundaries.iter().enumerate() {
        let end = boundaries.get(i + 1).map_or(input.len(), |b| b.start);
        let span = &input[boundary.end..end];

        match boundary.keyword {
            Keyword::Join => joins.push(parse_join(span)?),
            Keyword::Where => {
                let text = span.trim();
                if text.is_empty() {
                    return Err(TranslateError::malformed("WHERE clause is empty"));
                }
                where_clause = Some(text.to_string());
            }
            _ => {}
        }
    }

    debug!(
        select,
        from = %from_ref.table,
        joins = joins.len(),
        has_where = where_clause.is_some(),
        "scanned query clauses"
    );

    Ok(Clauses {
        select: select.to_string(),
        from: from_ref,
        joins,
        where_clause,
    })
}

/// Collect JOIN and WHERE keywords after FROM. WHERE consumes the rest of the
/// query, so nothing after it is a boundary.
fn find_boundaries(words: &[Word<'_>], from_idx: usize) -> TranslateResult<Vec<Boundary>> {
    let mut boundaries = Vec::new();

    for idx in from_idx + 1..words.len() {
        let word = words[idx];
        if !word.is_top_level() {
            continue;
        }

        if word.is(Keyword::Where) {
            boundaries.push(Boundary {
                keyword: Keyword::Where,
                start: word.start,
                end: word.end,
            });
            break;
        }

        if word.is(Keyword::Join) {
            let start = join_start(words, idx)?;
            boundaries.push(Boundary {
                keyword: Keyword::Join,
                start,
                end: word.end,
            });
        }
    }

    Ok(boundaries)
}

/// Start offset of the JOIN at `idx`, absorbing an `INNER` prefix.
fn join_start(words: &[Word<'_>], idx: usize) -> TranslateResult<usize> {
    let join = words[idx];
    let Some(prev) = idx.checked_sub(1).map(|i| words[i]) else {
        return Ok(join.start);
    };

    match Keyword::parse(prev.text) {
        Some(Keyword::Inner) if prev.is_top_level() => Ok(prev.start),
        Some(
            kw @ (Keyword::Left
            | Keyword::Right
            | Keyword::Full
            | Keyword::Outer
            | Keyword::Cross
            | Keyword::Natural),
        ) if prev.is_top_level() => Err(TranslateError::malformed(format!(
            "{} JOIN is not supported, only inner joins are",
            kw
        ))),
        _ => Ok(join.start),
    }
}

fn parse_join(span: &str) -> TranslateResult<JoinClause> {
    let words = lexer::words(span)?;
    let on = words
        .iter()
        .find(|w| w.is_top_level() && w.is(Keyword::On))
        .ok_or_else(|| {
            TranslateError::malformed(format!("JOIN '{}' is missing an ON condition", span.trim()))
        })?;

    let table_ref = parse_table_ref(&span[..on.start], Keyword::Join)?;
    let condition = span[on.end..].trim();
    if condition.is_empty() {
        return Err(TranslateError::malformed(format!(
            "JOIN {} has an empty ON condition",
            table_ref.table
        )));
    }

    Ok(JoinClause {
        table: table_ref.table,
        alias: table_ref.alias,
        condition: condition.to_string(),
    })
}

/// Parse `table`, `table alias` or `table AS alias`.
///
/// A reserved keyword in alias position is not an alias: the alias falls back
/// to the table name and the rest of the span is ignored.
fn parse_table_ref(span: &str, clause: Keyword) -> TranslateResult<TableRef> {
    let parts: Vec<&str> = span.split_whitespace().collect();

    let Some(&table) = parts.first() else {
        return Err(TranslateError::malformed(format!(
            "missing table name after {}",
            clause
        )));
    };
    if table.starts_with('(') {
        return Err(TranslateError::malformed(format!(
            "derived tables are not supported in {}",
            clause
        )));
    }
    if is_reserved(table) {
        return Err(TranslateError::malformed(format!(
            "expected table name after {}, found keyword '{}'",
            clause, table
        )));
    }

    let (candidate, consumed) = match parts.get(1) {
        Some(word) if is_keyword(word, Keyword::As) => match parts.get(2) {
            Some(alias) => (Some(*alias), 3),
            None => {
                return Err(TranslateError::malformed(format!(
                    "missing alias after AS in {} {}",
                    clause, table
                )))
            }
        },
        Some(word) => (Some(*word), 2),
        None => (None, 1),
    };

    let alias = match candidate {
        Some(word) if is_reserved(word) => {
            debug!(table, ignored = %parts[1..].join(" "), "alias candidate is a keyword");
            None
        }
        Some(word) => {
            if let Some(extra) = parts.get(consumed) {
                if !is_reserved(extra) {
                    return Err(TranslateError::malformed(format!(
                        "unexpected '{}' after {} {} {}",
                        extra, clause, table, word
                    )));
                }
                debug!(table, ignored = %parts[consumed..].join(" "), "ignoring trailing keywords");
            }
            Some(word.to_string())
        }
        None => None,
    };

    Ok(TableRef::new(table, alias))
}
