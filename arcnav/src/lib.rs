//! Archive path hierarchies
//! -----------------------
//!
//! Archives list their contents as a flat sequence of paths such as
//! `Meshes\Armor\iron.nif`. There are no directory records: the hierarchy only
//! exists implicitly in the separators. This crate rebuilds it as a tree one
//! level at a time, so a browser only pays for the directories a user actually
//! opens.
//!
//! Nodes live in a [`pool::NodePool`] and are addressed through
//! [`node::NodeId`] handles. Returning a tree to the pool keeps every slot (and
//! its string buffers) around for the next archive, so switching archives or
//! resetting the view does not reallocate.
//!
//! ```rust
//! use arcnav::{HierarchyConfig, NodeKind, PathTree};
//!
//! let entries = ["Meshes\\a.nif", "Meshes\\Sub\\b.nif", "Textures\\c.dds"];
//! let mut tree = PathTree::new(HierarchyConfig::default()).unwrap();
//! tree.load(&entries);
//!
//! let meshes = tree.roots()[0];
//! let children = tree.expand(meshes, &entries).unwrap().to_vec();
//! assert_eq!(tree.node(children[0]).kind(), NodeKind::File);
//! assert_eq!(tree.node(children[0]).full_path(), "Meshes\\a.nif");
//! ```

#[macro_use]
extern crate serde_derive;

pub mod builder;
pub mod config;
pub mod error;
pub mod node;
pub mod pool;
pub mod sorter;
pub mod tree;

pub use builder::HierarchyBuilder;
pub use config::{Collation, HierarchyConfig};
pub use error::{Error, Result};
pub use node::{NodeId, NodeKind, PathNode};
pub use pool::{NodePool, PoolStats};
pub use sorter::Sorter;
pub use tree::{NodeSnapshot, PathTree};
