//! Schema catalog.
//!
//! The catalog is the table/column/type metadata every query is checked
//! against. It is built once and only ever read afterwards, so a single
//! instance can be shared by any number of concurrent translations.
//!
//! # Example
//!
//! ```
//! use relalg::catalog::{ColumnType, SchemaCatalog};
//!
//! let catalog = SchemaCatalog::new()
//!     .with_table("Cliente", [("idCliente", ColumnType::Int), ("Nome", ColumnType::String)]);
//!
//! assert!(catalog.contains_table("Cliente"));
//! assert_eq!(catalog.column_type("Cliente", "Nome"), Some(ColumnType::String));
//! ```

mod store;

pub use store::builtin;

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Declared type of a catalog column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Decimal,
    String,
    Date,
    /// Declared in the schema but not supported in predicates.
    Bool,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Decimal => "decimal",
            ColumnType::String => "string",
            ColumnType::Date => "date",
            ColumnType::Bool => "bool",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int | ColumnType::Decimal)
    }

    /// Whether values of the two types can be compared with each other.
    pub fn is_comparable_with(&self, other: ColumnType) -> bool {
        *self == other || (self.is_numeric() && other.is_numeric())
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ColumnType,
}

/// A table and its ordered columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// Immutable set of tables known to the translator.
///
/// Table and column names are case-sensitive. Tables keep their declaration
/// order for listing.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    tables: Vec<TableSchema>,
    index: HashMap<String, usize>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table, replacing any earlier definition with the same name.
    pub fn with_table<'c>(
        mut self,
        name: &str,
        columns: impl IntoIterator<Item = (&'c str, ColumnType)>,
    ) -> Self {
        let table = TableSchema {
            name: name.to_string(),
            columns: columns
                .into_iter()
                .map(|(name, ty)| ColumnDef {
                    name: name.to_string(),
                    ty,
                })
                .collect(),
        };

        match self.index.get(name) {
            Some(&idx) => self.tables[idx] = table,
            None => {
                self.index.insert(name.to_string(), self.tables.len());
                self.tables.push(table);
            }
        }
        self
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.index.get(name).map(|&idx| &self.tables[idx])
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.iter()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    pub fn has_column(&self, table: &str, column: &str) -> bool {
        self.table(table).is_some_and(|t| t.has_column(column))
    }

    pub fn column_type(&self, table: &str, column: &str) -> Option<ColumnType> {
        self.table(table)?.column(column).map(|c| c.ty)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
