//! Tree engine for the tree VM
//!
//! This crate owns node existence, structural links and per-node
//! attribute collections. It provides:
//! - The [`Backend`] trait, the whole contract a storage backend satisfies
//! - [`ArenaTree`], the reference backend: nodes in an arena addressed by
//!   stable [`NodeId`](core_types::NodeId)s
//! - [`AttributeSet`], an insertion-ordered attribute collection
//! - [`TreeConfig`] for capacity limits
//!
//! # Example
//!
//! ```
//! use core_types::{AttributeId, AttributeValue, Position};
//! use tree_engine::{ArenaTree, Backend};
//!
//! let mut tree = ArenaTree::new();
//! let root = tree.create_node().unwrap();
//! let child = tree.create_node().unwrap();
//!
//! tree.insert_child(root, child, Position::Append).unwrap();
//! tree.set_attribute(child, AttributeId(1), AttributeValue::from("hi")).unwrap();
//!
//! assert_eq!(tree.parent(child).unwrap(), Some(root));
//! assert_eq!(tree.attribute(child, AttributeId(1)).unwrap().as_text(), Ok("hi"));
//!
//! // Removal destroys the whole subtree
//! tree.remove_child(root, child).unwrap();
//! assert!(!tree.contains(child));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod arena;
pub mod attributes;
pub mod backend;
pub mod config;

pub use arena::ArenaTree;
pub use attributes::AttributeSet;
pub use backend::Backend;
pub use config::TreeConfig;
