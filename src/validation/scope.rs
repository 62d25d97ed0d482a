//! Field resolution against the tables a query references.

use crate::catalog::{ColumnType, SchemaCatalog};
use crate::error::{TranslateError, TranslateResult};
use crate::sql::ParsedQuery;

/// A field reference resolved to its table and declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub table: String,
    pub column: String,
    pub ty: ColumnType,
}

/// The tables visible to one query.
pub struct Scope<'a> {
    query: &'a ParsedQuery,
    catalog: &'a SchemaCatalog,
}

impl<'a> Scope<'a> {
    pub fn new(query: &'a ParsedQuery, catalog: &'a SchemaCatalog) -> Self {
        Self { query, catalog }
    }

    /// Resolve `alias.column` through the alias map, or a bare `column` to
    /// the single referenced table that owns it.
    pub fn resolve(&self, field: &str) -> TranslateResult<ResolvedColumn> {
        match field.split_once('.') {
            Some((alias, column)) => self.resolve_qualified(field, alias, column),
            None => self.resolve_bare(field),
        }
    }

    fn resolve_qualified(
        &self,
        field: &str,
        alias: &str,
        column: &str,
    ) -> TranslateResult<ResolvedColumn> {
        let table = self
            .query
            .table_for_alias(alias)
            .ok_or_else(|| TranslateError::UnknownField {
                field: field.to_string(),
                table: None,
            })?;

        let ty = self
            .catalog
            .column_type(table, column)
            .ok_or_else(|| TranslateError::UnknownField {
                field: field.to_string(),
                table: Some(table.to_string()),
            })?;

        Ok(ResolvedColumn {
            table: table.to_string(),
            column: column.to_string(),
            ty,
        })
    }

    fn resolve_bare(&self, column: &str) -> TranslateResult<ResolvedColumn> {
        let owners = self.owners(column);

        match owners.as_slice() {
            [] => Err(TranslateError::UnknownField {
                field: column.to_string(),
                table: None,
            }),
            [(table, ty)] => Ok(ResolvedColumn {
                table: table.to_string(),
                column: column.to_string(),
                ty: *ty,
            }),
            _ => Err(TranslateError::AmbiguousField {
                field: column.to_string(),
                tables: owners.iter().map(|(t, _)| t.to_string()).collect(),
            }),
        }
    }

    /// Referenced tables that declare `column`, in source order.
    pub fn owners(&self, column: &str) -> Vec<(&'a str, ColumnType)> {
        self.query
            .referenced_tables()
            .into_iter()
            .filter_map(|table| {
                self.catalog
                    .column_type(table, column)
                    .map(|ty| (table, ty))
            })
            .collect()
    }
}
