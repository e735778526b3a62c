use std::fmt;

/// What a node stands for in the reconstructed hierarchy.
///
/// The declaration order is the display order: sentinels first, then
/// directories, then files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum NodeKind {
    /// Synthetic `..` entry leading one level up.
    GoBack,
    Directory,
    File,
}

/// Handle to a node slot in a [`crate::pool::NodePool`].
///
/// The generation changes every time the slot is released, so a handle kept
/// past a reset no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// One segment of an archive path.
///
/// Only the builder and the pool mutate nodes; everyone else reads them
/// through the accessors below.
#[derive(Debug, Clone)]
pub struct PathNode {
    pub(crate) kind: NodeKind,
    pub(crate) display_name: String,
    pub(crate) full_path: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) discovered: bool,
}

impl PathNode {
    pub(crate) fn blank() -> Self {
        PathNode {
            kind: NodeKind::File,
            display_name: String::new(),
            full_path: String::new(),
            parent: None,
            children: Vec::new(),
            discovered: false,
        }
    }

    /// Back to the blank state. Buffers keep their capacity for the next use.
    pub(crate) fn clear(&mut self) {
        self.kind = NodeKind::File;
        self.display_name.clear();
        self.full_path.clear();
        self.parent = None;
        self.children.clear();
        self.discovered = false;
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Discovered children, empty until discovery ran for this directory.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether discovery has populated this node since its last reset.
    pub fn is_discovered(&self) -> bool {
        self.discovered
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}
