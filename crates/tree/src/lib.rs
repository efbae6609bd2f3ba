//! modetree-tree — tagged configuration trees.
//!
//! A tree is an ordered string-keyed map whose values are either nested
//! trees ([`Node::Map`]), terminal values ([`Node::Leaf`]), or opaque tagged
//! records ([`Node::Descriptor`]). On top of that model this crate provides:
//!
//! - [`apply`] — in-place deep merge of a sparse [`Patch`] into a tree,
//! - [`flatten`] / [`unflatten`] — bidirectional transform between nested
//!   trees and flat path→value maps,
//! - [`derive_addresses`] — a shape-preserving rewrite where every terminal
//!   holds its own joined path string.
//!
//! # Example
//!
//! ```
//! use modetree_tree::{apply, flatten, tree_from_json, Leaf, Node};
//! use serde_json::json;
//!
//! let mut state = tree_from_json(json!({"user": {"name": "ada", "age": 36}})).unwrap();
//! let patch = tree_from_json(json!({"user": {"age": 37}})).unwrap();
//! apply(&mut state, &patch);
//!
//! let flat = flatten(&state, "/");
//! assert_eq!(flat["user/name"], Node::Leaf(Leaf::Str("ada".into())));
//! assert_eq!(flat["user/age"], Node::Leaf(Leaf::Num(37.into())));
//! ```

pub mod addresses;
pub mod codec;
pub mod node;
pub mod reconcile;

pub use addresses::derive_addresses;
pub use codec::{flatten, unflatten, CodecError, DEFAULT_SEPARATOR};
pub use node::{tree_from_json, Descriptor, FuncRef, Leaf, Map, Node, Patch};
pub use reconcile::{apply, apply_opt, apply_strict, ReconcileError};
