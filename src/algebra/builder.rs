//! Build algebra trees from validated queries.

use tracing::debug;

use super::plan::AlgebraNode;
use crate::validation::{Conjunct, ValidatedQuery};

const CONJUNCTION: &str = " ∧ ";

pub struct AlgebraBuilder<'a> {
    validated: &'a ValidatedQuery,
}

impl<'a> AlgebraBuilder<'a> {
    pub fn new(validated: &'a ValidatedQuery) -> Self {
        Self { validated }
    }

    pub fn build(&self) -> AlgebraNode {
        let query = &self.validated.query;

        // Left-deep join tree in source order
        let mut plan = self.build_source(0, &query.from_alias, &query.from_clause);
        for (i, join) in query.joins.iter().enumerate() {
            let right = self.build_source(i + 1, &join.alias, &join.table);
            plan = AlgebraNode::join(join.condition.clone(), plan, right);
        }

        if self.validated.has_unattributed() {
            plan = AlgebraNode::select(conjoin(&self.validated.conjuncts), plan);
        }

        AlgebraNode::project(query.select_clause.clone(), plan)
    }

    /// A table leaf with every conjunct qualified by its alias pushed onto it.
    fn build_source(&self, position: usize, alias: &str, table: &str) -> AlgebraNode {
        let renamed = (alias != table).then(|| alias.to_string());
        let leaf = AlgebraNode::table(table, renamed);

        if !self.owns_alias(position, alias) {
            return leaf;
        }

        let pushed: Vec<&Conjunct> = self
            .validated
            .conjuncts
            .iter()
            .filter(|c| c.qualifier.as_deref() == Some(alias))
            .collect();

        if pushed.is_empty() {
            return leaf;
        }

        debug!(alias = %alias, conjuncts = pushed.len(), "selection pushed down");
        AlgebraNode::select(conjoin(pushed), leaf)
    }

    /// The alias map keeps the last declaration of a repeated alias, so only
    /// that source receives its conjuncts.
    fn owns_alias(&self, position: usize, alias: &str) -> bool {
        self.validated
            .query
            .sources()
            .enumerate()
            .filter(|(_, (a, _))| *a == alias)
            .last()
            .is_some_and(|(i, _)| i == position)
    }
}

fn conjoin<'c>(conjuncts: impl IntoIterator<Item = &'c Conjunct>) -> String {
    conjuncts
        .into_iter()
        .map(Conjunct::text)
        .collect::<Vec<_>>()
        .join(CONJUNCTION)
}

/// Build the algebra tree for `validated`.
pub fn build(validated: &ValidatedQuery) -> AlgebraNode {
    AlgebraBuilder::new(validated).build()
}
