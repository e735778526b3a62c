//! PathTree
//! --------
//!
//! `PathTree` is what a browser holds on to for one open archive. It owns the
//! node pool, the builder and the current root level, and it is the only
//! place where whole subtrees go back to the pool.
//!
//! Subtrees are always returned children first, so no slot is freed while a
//! node below it still refers to it as a parent. After a full [`PathTree::reset`]
//! the pool hands out slots from index 0 again, which keeps rebuilds of the
//! same listing predictable.
//!
//! Handles obtained from a tree are only valid until the nodes they name are
//! released (by `reset`, `reset_node`, `collapse` of an ancestor or `load`).

use tracing::debug;

use crate::builder::HierarchyBuilder;
use crate::config::HierarchyConfig;
use crate::error::Result;
use crate::node::{NodeId, NodeKind, PathNode};
use crate::pool::{NodePool, PoolStats};
use crate::sorter::Sorter;

/// Owned, serializable copy of a (partially discovered) subtree.
///
/// Two snapshots compare equal when kinds, names, paths and discovery state
/// match, regardless of which pool slots backed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub kind: NodeKind,
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub children: Option<Vec<NodeSnapshot>>,
}

#[derive(Debug)]
pub struct PathTree {
    builder: HierarchyBuilder,
    pool: NodePool,
    sorter: Sorter,
    roots: Vec<NodeId>,
}

impl PathTree {
    pub fn new(config: HierarchyConfig) -> Result<Self> {
        Ok(PathTree::with_builder(HierarchyBuilder::new(config)?))
    }

    /// Sizes the pool and picks the collation from the builder's config.
    pub fn with_builder(builder: HierarchyBuilder) -> Self {
        let pool = NodePool::with_config(builder.config());
        let sorter = Sorter::new(builder.config().collation);
        PathTree {
            builder,
            pool,
            sorter,
            roots: Vec::new(),
        }
    }

    pub fn config(&self) -> &HierarchyConfig {
        self.builder.config()
    }

    pub fn builder(&self) -> &HierarchyBuilder {
        &self.builder
    }

    pub fn sorter(&self) -> &Sorter {
        &self.sorter
    }

    pub fn pool(&self) -> &NodePool {
        &self.pool
    }

    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Root level in first-occurrence order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// # Panics
    ///
    /// If `id` was released since it was handed out.
    pub fn node(&self, id: NodeId) -> &PathNode {
        self.pool.get(id)
    }

    pub fn try_node(&self, id: NodeId) -> Option<&PathNode> {
        self.pool.try_get(id)
    }

    /// Replaces the current tree with the root level of `entries`.
    pub fn load<S: AsRef<str>>(&mut self, entries: &[S]) -> &[NodeId] {
        self.reset();
        self.roots = self.builder.build_roots(&mut self.pool, entries);
        &self.roots
    }

    /// Children of `dir`, discovering them on first use.
    pub fn expand<S: AsRef<str>>(&mut self, dir: NodeId, entries: &[S]) -> Result<&[NodeId]> {
        if !self.pool.get(dir).is_discovered() {
            self.builder.discover_children(&mut self.pool, dir, entries)?;
        }
        Ok(self.pool.get(dir).children())
    }

    /// Discovers every directory below the roots.
    pub fn expand_all<S: AsRef<str>>(&mut self, entries: &[S]) -> Result<()> {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if !self.pool.get(id).is_directory() {
                continue;
            }
            let children = self.expand(id, entries)?;
            stack.extend(children.iter().rev().copied());
        }
        Ok(())
    }

    /// Returns the children of `dir` to the pool and marks it undiscovered.
    pub fn collapse(&mut self, dir: NodeId) {
        let children = std::mem::take(&mut self.pool.get_mut(dir).children);
        for child in &children {
            release_subtree(&mut self.pool, *child);
        }
        // Hand the emptied buffer back so its capacity is kept.
        let node = self.pool.get_mut(dir);
        node.children = children;
        node.children.clear();
        node.discovered = false;
    }

    /// Returns the subtree under `root` to the pool, `root` included.
    ///
    /// If `root` is on the root level it is removed from it.
    pub fn reset_node(&mut self, root: NodeId) {
        if let Some(parent) = self.pool.get(root).parent() {
            self.pool.get_mut(parent).children.retain(|id| *id != root);
        }
        release_subtree(&mut self.pool, root);
        self.roots.retain(|id| *id != root);
    }

    /// Returns every node to the pool and restarts slot reuse at index 0.
    pub fn reset(&mut self) {
        let released = self.pool.used();
        for root in std::mem::take(&mut self.roots) {
            release_subtree(&mut self.pool, root);
        }
        self.pool.reset_item_pointers();
        debug!(released, "reset path tree");
    }

    /// Resolves `path` from the root level, discovering directories on the
    /// way. Segment names match the way sibling deduplication does.
    ///
    /// A path ending in the separator only resolves to a directory. Otherwise
    /// the last segment takes the first sibling of either kind with that name.
    pub fn find<S: AsRef<str>>(&mut self, path: &str, entries: &[S]) -> Result<Option<NodeId>> {
        let segments: Vec<String> = self.builder.segments(path).map(str::to_string).collect();
        if segments.is_empty() {
            return Ok(None);
        }
        let want_dir = path.ends_with(self.config().separator);

        let mut level: Vec<NodeId> = self.roots.clone();
        for (depth, segment) in segments.iter().enumerate() {
            let last = depth + 1 == segments.len();
            let found = level.iter().copied().find(|id| {
                let node = self.pool.get(*id);
                let kind_ok = match node.kind() {
                    NodeKind::GoBack => false,
                    NodeKind::Directory => true,
                    NodeKind::File => last && !want_dir,
                };
                kind_ok && self.builder.names_match(node.display_name(), segment)
            });
            let found = match found {
                Some(found) => found,
                None => return Ok(None),
            };
            if last {
                return Ok(Some(found));
            }
            level = self.expand(found, entries)?.to_vec();
        }
        Ok(None)
    }

    /// Root level in display order.
    pub fn sorted_roots(&self) -> Vec<NodeId> {
        let mut ids = self.roots.clone();
        self.sorter.sort(&self.pool, &mut ids);
        ids
    }

    /// Discovered children of `dir` in display order.
    pub fn sorted_children(&self, dir: NodeId) -> Vec<NodeId> {
        let mut ids = self.pool.get(dir).children().to_vec();
        self.sorter.sort(&self.pool, &mut ids);
        ids
    }

    /// Parent, grandparent and so on up to the root level.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            pool: &self.pool,
            next: self.pool.get(id).parent(),
        }
    }

    /// Depth-first pre-order over every discovered node, with its depth.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            pool: &self.pool,
            stack: self.roots.iter().rev().map(|id| (*id, 0)).collect(),
        }
    }

    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        self.sorted_roots()
            .into_iter()
            .map(|id| self.snapshot_node(id))
            .collect()
    }

    pub fn snapshot_node(&self, id: NodeId) -> NodeSnapshot {
        let node = self.pool.get(id);
        NodeSnapshot {
            kind: node.kind(),
            name: node.display_name().to_string(),
            path: node.full_path().to_string(),
            children: node.is_discovered().then(|| {
                self.sorted_children(id)
                    .into_iter()
                    .map(|child| self.snapshot_node(child))
                    .collect()
            }),
        }
    }
}

/// Releases `root` and everything below it, children before parents.
fn release_subtree(pool: &mut NodePool, root: NodeId) {
    // (node, children already pushed)
    let mut stack = vec![(root, false)];
    while let Some((id, visited)) = stack.pop() {
        if visited {
            pool.release(id);
            continue;
        }
        stack.push((id, true));
        stack.extend(pool.get(id).children().iter().map(|child| (*child, false)));
    }
}

pub struct Ancestors<'a> {
    pool: &'a NodePool,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.pool.get(current).parent();
        Some(current)
    }
}

pub struct Walk<'a> {
    pool: &'a NodePool,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<(NodeId, usize)> {
        let (id, depth) = self.stack.pop()?;
        self.stack.extend(
            self.pool
                .get(id)
                .children()
                .iter()
                .rev()
                .map(|child| (*child, depth + 1)),
        );
        Some((id, depth))
    }
}
