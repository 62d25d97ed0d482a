//! Literal compatibility checks against declared column types.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::catalog::ColumnType;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Outcome of checking a literal against a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralCheck {
    Compatible,
    Mismatch,
    /// The column type cannot be compared against literals at all.
    Unsupported,
}

/// Check `literal` (as written, quotes included) against `ty`.
pub fn check_literal(ty: ColumnType, literal: &str) -> LiteralCheck {
    let compatible = match ty {
        ColumnType::Int => literal.parse::<i64>().is_ok(),
        ColumnType::Decimal => is_decimal(literal),
        ColumnType::String => unquote(literal).is_some(),
        ColumnType::Date => unquote(literal).is_some_and(is_date),
        ColumnType::Bool => return LiteralCheck::Unsupported,
    };

    if compatible {
        LiteralCheck::Compatible
    } else {
        LiteralCheck::Mismatch
    }
}

/// Contents of a single-quoted literal.
pub fn unquote(literal: &str) -> Option<&str> {
    (literal.len() >= 2 && literal.starts_with('\'') && literal.ends_with('\''))
        .then(|| &literal[1..literal.len() - 1])
}

fn is_decimal(text: &str) -> bool {
    Decimal::from_str(text).is_ok()
}

/// ISO dates, ISO date-times (space or `T` separated) and RFC 3339.
pub fn is_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(text, fmt).is_ok())
        || DateTime::parse_from_rfc3339(text).is_ok()
}
