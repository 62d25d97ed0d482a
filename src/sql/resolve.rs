//! Alias resolution.
//!
//! Folds the FROM and JOIN fragments into the alias → table map every later
//! stage resolves qualified fields through.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::query::{Clauses, ParsedQuery};
use crate::error::{TranslateError, TranslateResult};

/// What to do when an alias is declared twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasPolicy {
    /// Fail with `DuplicateAlias`.
    #[default]
    Reject,
    /// The later declaration replaces the earlier one.
    Overwrite,
}

/// Build a [`ParsedQuery`] from scanned clauses.
///
/// Aliases are inserted FROM first, then each JOIN in source order.
pub fn resolve(clauses: Clauses, policy: AliasPolicy) -> TranslateResult<ParsedQuery> {
    let mut aliases: BTreeMap<String, String> = BTreeMap::new();

    let declared = std::iter::once((&clauses.from.alias, &clauses.from.table))
        .chain(clauses.joins.iter().map(|j| (&j.alias, &j.table)));

    for (alias, table) in declared {
        match aliases.entry(alias.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(table.clone());
            }
            Entry::Occupied(mut slot) => match policy {
                AliasPolicy::Reject => {
                    return Err(TranslateError::DuplicateAlias {
                        alias: alias.clone(),
                        first: slot.get().clone(),
                        second: table.clone(),
                    })
                }
                AliasPolicy::Overwrite => {
                    tracing::debug!(alias = %alias, previous = %slot.get(), table = %table, "alias overwritten");
                    slot.insert(table.clone());
                }
            },
        }
    }

    Ok(ParsedQuery {
        select_clause: clauses.select,
        from_clause: clauses.from.table,
        from_alias: clauses.from.alias,
        where_clause: clauses.where_clause,
        joins: clauses.joins,
        table_aliases: aliases,
    })
}
