//! SQL front end.
//!
//! Turns free query text into a [`ParsedQuery`]:
//!
//! - [`lexer`] - quote- and parenthesis-aware word splitting
//! - [`token`] - reserved keywords
//! - [`scanner`] - clause extraction (SELECT / FROM / JOIN / WHERE)
//! - [`resolve`] - alias → table resolution
//! - [`query`] - the structured query types

pub mod lexer;
pub mod query;
pub mod resolve;
pub mod scanner;
pub mod token;

pub use query::{Clauses, JoinClause, ParsedQuery, TableRef};
pub use resolve::{resolve, AliasPolicy};
pub use scanner::scan;
pub use token::Keyword;

use crate::error::TranslateResult;

/// Scan and resolve `input` in one step.
pub fn parse_query(input: &str, policy: AliasPolicy) -> TranslateResult<ParsedQuery> {
    resolve(scan(input)?, policy)
}
