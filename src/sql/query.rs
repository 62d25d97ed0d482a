//! Structured form of a scanned query.

use serde::Serialize;
use std::collections::BTreeMap;

/// A table in the FROM or JOIN clause with its effective alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRef {
    pub table: String,
    /// Equals `table` when no alias was written.
    pub alias: String,
}

impl TableRef {
    pub fn new(table: impl Into<String>, alias: Option<String>) -> Self {
        let table = table.into();
        let alias = alias.unwrap_or_else(|| table.clone());
        Self { table, alias }
    }

    pub fn is_aliased(&self) -> bool {
        self.alias != self.table
    }
}

/// One `JOIN <table> [alias] ON <condition>` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinClause {
    pub table: String,
    pub alias: String,
    pub condition: String,
}

/// Raw clause fragments as the scanner found them, before alias resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clauses {
    pub select: String,
    pub from: TableRef,
    pub joins: Vec<JoinClause>,
    pub where_clause: Option<String>,
}

/// A query with its aliases resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    pub select_clause: String,
    pub from_clause: String,
    pub from_alias: String,
    pub where_clause: Option<String>,
    pub joins: Vec<JoinClause>,
    /// Alias → table, covering `from_alias` and every join alias.
    pub table_aliases: BTreeMap<String, String>,
}

impl ParsedQuery {
    pub fn is_select_all(&self) -> bool {
        self.select_clause.trim() == "*"
    }

    /// SELECT list items, trimmed, in source order.
    pub fn select_fields(&self) -> Vec<&str> {
        self.select_clause.split(',').map(str::trim).collect()
    }

    pub fn table_for_alias(&self, alias: &str) -> Option<&str> {
        self.table_aliases.get(alias).map(String::as_str)
    }

    /// `(alias, table)` pairs in source order: FROM first, then each JOIN.
    pub fn sources(&self) -> impl Iterator<Item = (&str, &str)> {
        std::iter::once((self.from_alias.as_str(), self.from_clause.as_str())).chain(
            self.joins
                .iter()
                .map(|j| (j.alias.as_str(), j.table.as_str())),
        )
    }

    /// Distinct tables in source order.
    pub fn referenced_tables(&self) -> Vec<&str> {
        let mut tables: Vec<&str> = Vec::new();
        for (_, table) in self.sources() {
            if !tables.contains(&table) {
                tables.push(table);
            }
        }
        tables
    }
}
