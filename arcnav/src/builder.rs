//! Hierarchy reconstruction
//! ------------------------
//!
//! An archive listing has no directory records, only paths:
//!
//! ```text
//! Meshes\a.nif
//! Meshes\Sub\b.nif
//! Textures\c.dds
//! ```
//!
//! `HierarchyBuilder` derives one tree level at a time from such a listing.
//! [`HierarchyBuilder::build_roots`] produces the top level
//! (`Meshes`, `Textures`); [`HierarchyBuilder::discover_children`] produces the
//! level below a directory when it is opened (`a.nif`, `Sub`).
//!
//! Each level is a full linear scan of the listing that keeps the entries whose
//! leading segments match the directory path. The next segment becomes a file
//! if it is the last one and a directory otherwise. Directories are merged by
//! name (case-insensitively unless configured otherwise); files never are, so
//! duplicate entries in an archive stay visible as duplicate files.
//!
//! Empty segments produced by leading, doubled or trailing separators are
//! ignored. An entry ending in a separator names a directory and produces no
//! file node. Entries with no segments at all are skipped.

use std::borrow::Cow;
use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::config::HierarchyConfig;
use crate::error::{Error, Result};
use crate::node::{NodeId, NodeKind};
use crate::pool::NodePool;

/// Display name of the sentinel leading one level up.
pub const GO_BACK_NAME: &str = "..";

/// A child accepted during a scan, before it gets a pool slot.
#[derive(Debug)]
struct Pending<'e> {
    kind: NodeKind,
    name: &'e str,
    entry: &'e str,
}

#[derive(Debug, Clone)]
pub struct HierarchyBuilder {
    config: HierarchyConfig,
}

impl HierarchyBuilder {
    pub fn new(config: HierarchyConfig) -> Result<Self> {
        config.validate()?;
        Ok(HierarchyBuilder { config })
    }

    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Builds the top level of the hierarchy.
    ///
    /// Single-segment entries become files; every other entry contributes a
    /// directory named by its first segment. The result follows the order in
    /// which names first appear in `entries`.
    pub fn build_roots<S: AsRef<str>>(&self, pool: &mut NodePool, entries: &[S]) -> Vec<NodeId> {
        let pending = self.scan_level(entries, &[]);
        let roots = self.allocate(pool, None, "", pending);
        debug!(entries = entries.len(), roots = roots.len(), "built root level");
        roots
    }

    /// Appends the children of directory `dir` found in `entries`.
    ///
    /// Calling this twice for the same directory appends the children twice;
    /// check [`crate::node::PathNode::is_discovered`] first, or go through
    /// [`crate::tree::PathTree::expand`] which does.
    pub fn discover_children<S: AsRef<str>>(
        &self,
        pool: &mut NodePool,
        dir: NodeId,
        entries: &[S],
    ) -> Result<()> {
        let node = pool.get(dir);
        if node.kind() != NodeKind::Directory {
            return Err(Error::NotADirectory(node.full_path().to_string()));
        }
        if node.is_discovered() {
            warn!(path = node.full_path(), "directory discovered again, children will repeat");
        }
        let dir_path = node.full_path().to_string();
        let back_path = node
            .parent()
            .map(|parent| pool.get(parent).full_path().to_string())
            .unwrap_or_default();

        let prefix: Vec<&str> = self.segments(&dir_path).collect();
        let pending = self.scan_level(entries, &prefix);

        let sentinel = usize::from(self.config.go_back_sentinel);
        pool.grow_to_contain(pending.len() + sentinel);

        let mut children = Vec::with_capacity(pending.len() + sentinel);
        if self.config.go_back_sentinel {
            let back = pool.take();
            let node = pool.get_mut(back);
            node.kind = NodeKind::GoBack;
            node.display_name.push_str(GO_BACK_NAME);
            node.full_path.push_str(&back_path);
            node.parent = Some(dir);
            children.push(back);
        }
        children.extend(self.allocate(pool, Some(dir), &dir_path, pending));

        debug!(path = %dir_path, children = children.len(), "discovered directory");
        let node = pool.get_mut(dir);
        node.children.extend(children);
        node.discovered = true;
        Ok(())
    }

    /// Non-empty segments of `path`.
    pub fn segments<'p>(&self, path: &'p str) -> impl Iterator<Item = &'p str> + 'p {
        path.split(self.config.separator).filter(|s| !s.is_empty())
    }

    /// Compares two segments the way sibling deduplication does.
    pub fn names_match(&self, a: &str, b: &str) -> bool {
        if self.config.case_sensitive {
            a == b
        } else {
            a.chars()
                .flat_map(char::to_lowercase)
                .eq(b.chars().flat_map(char::to_lowercase))
        }
    }

    fn dedup_key<'e>(&self, name: &'e str) -> Cow<'e, str> {
        if self.config.case_sensitive {
            Cow::Borrowed(name)
        } else {
            Cow::Owned(name.chars().flat_map(char::to_lowercase).collect())
        }
    }

    /// Collects the level directly below `prefix`, in first-occurrence order.
    fn scan_level<'e, S: AsRef<str>>(&self, entries: &'e [S], prefix: &[&str]) -> Vec<Pending<'e>> {
        let mut seen_dirs: HashSet<Cow<'e, str>> = HashSet::new();
        let mut pending = Vec::new();

        for entry in entries {
            let entry = entry.as_ref();
            let mut segments = self.segments(entry);

            let under_prefix = prefix
                .iter()
                .all(|want| segments.next().map_or(false, |got| self.names_match(got, want)));
            if !under_prefix {
                continue;
            }

            let name = match segments.next() {
                Some(name) => name,
                None => {
                    if prefix.is_empty() {
                        trace!(entry, "skipping entry without path segments");
                    }
                    continue;
                }
            };

            let is_leaf = segments.next().is_none();
            if is_leaf && !entry.ends_with(self.config.separator) {
                pending.push(Pending {
                    kind: NodeKind::File,
                    name,
                    entry,
                });
            } else if seen_dirs.insert(self.dedup_key(name)) {
                pending.push(Pending {
                    kind: NodeKind::Directory,
                    name,
                    entry,
                });
            }
        }
        pending
    }

    /// Takes one slot per pending child and links it below `parent`.
    fn allocate(
        &self,
        pool: &mut NodePool,
        parent: Option<NodeId>,
        parent_path: &str,
        pending: Vec<Pending<'_>>,
    ) -> Vec<NodeId> {
        pool.grow_to_contain(pending.len());
        let mut ids = Vec::with_capacity(pending.len());
        for child in pending {
            let id = pool.take();
            let node = pool.get_mut(id);
            node.kind = child.kind;
            node.display_name.push_str(child.name);
            match child.kind {
                NodeKind::File => node.full_path.push_str(child.entry),
                _ => {
                    if parent.is_some() {
                        node.full_path.push_str(parent_path);
                        node.full_path.push(self.config.separator);
                    }
                    node.full_path.push_str(child.name);
                }
            }
            node.parent = parent;
            ids.push(id);
        }
        ids
    }
}
