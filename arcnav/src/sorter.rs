use std::cmp::Ordering;

use crate::config::Collation;
use crate::node::{NodeId, PathNode};
use crate::pool::NodePool;

/// Display order over sibling nodes.
///
/// Sentinels come first, then directories, then files. Within a kind nodes
/// order by display name under the configured [`Collation`]. The comparison is
/// a total order, so `sort_by` with it is deterministic for a given input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sorter {
    collation: Collation,
}

impl Sorter {
    pub fn new(collation: Collation) -> Self {
        Sorter { collation }
    }

    pub fn collation(&self) -> Collation {
        self.collation
    }

    pub fn compare(&self, a: &PathNode, b: &PathNode) -> Ordering {
        a.kind()
            .cmp(&b.kind())
            .then_with(|| self.compare_names(a.display_name(), b.display_name()))
    }

    pub fn compare_names(&self, a: &str, b: &str) -> Ordering {
        match self.collation {
            Collation::Ordinal => a.cmp(b),
            Collation::IgnoreCase => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
                .then_with(|| a.cmp(b)),
        }
    }

    /// Sorts sibling handles in place. Equal nodes keep their relative order.
    pub fn sort(&self, pool: &NodePool, ids: &mut [NodeId]) {
        ids.sort_by(|a, b| self.compare(pool.get(*a), pool.get(*b)));
    }
}
