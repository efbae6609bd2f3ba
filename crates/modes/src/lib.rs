//! modetree-modes — path-addressed hierarchical mode graphs.
//!
//! A purely categorical tree (every leaf the null sentinel) defines a finite
//! set of *modes*: the joined paths of its leaves. [`ModeGraph`] derives the
//! runtime metadata for that set (per-node paths and ordered child keys)
//! and exposes the operators the view layer drives:
//!
//! - [`ModeGraph::macro_modes`] / [`ModeGraph::sub_modes`] — prefix/suffix
//!   grouping and transition over mode strings,
//! - [`ModeGraph::mode_options`] — projection of a full mode down to the
//!   child segment at chosen anchor nodes.
//!
//! A graph is built once and never mutated; any number of readers can share
//! it.
//!
//! # Example
//!
//! ```
//! use modetree_modes::ModeGraph;
//! use modetree_tree::tree_from_json;
//! use serde_json::json;
//!
//! let tree = tree_from_json(json!({
//!     "auth": {"login": null, "register": null},
//!     "app": {"dashboard": null},
//! }))
//! .unwrap();
//! let graph = ModeGraph::build(&tree, "/").unwrap();
//!
//! assert_eq!(graph.modes(), ["auth/login", "auth/register", "app/dashboard"]);
//!
//! let auth = graph.macro_modes("auth");
//! assert!(auth.matches("auth/login"));
//! assert!(!auth.matches("app/dashboard"));
//!
//! let screen = graph.sub_modes("login");
//! assert_eq!(screen.next("register", "auth/login"), "auth/register");
//! ```

pub mod graph;
pub mod options;
pub mod transition;

pub use graph::{ModeBranch, ModeGraph, ModeGraphError, ModeLeaf, ModeNode};
pub use options::ModeOptions;
pub use transition::{MacroModes, SubModes, TransitionError};
