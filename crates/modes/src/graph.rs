//! Mode graph construction and metadata.

use indexmap::IndexMap;
use modetree_tree::{derive_addresses, Leaf, Map, Node};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModeGraphError {
    /// The input tree is not purely categorical: a leaf holds something
    /// other than the null sentinel.
    #[error("mode tree leaf at \"{path}\" is not the null sentinel")]
    NonCategoricalLeaf { path: String },
}

/// A node of the mode graph metadata tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeNode {
    Branch(ModeBranch),
    Leaf(ModeLeaf),
}

impl ModeNode {
    /// The joined path of this node.
    pub fn path(&self) -> &str {
        match self {
            ModeNode::Branch(branch) => branch.path(),
            ModeNode::Leaf(leaf) => leaf.path(),
        }
    }

    pub fn as_branch(&self) -> Option<&ModeBranch> {
        match self {
            ModeNode::Branch(branch) => Some(branch),
            ModeNode::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&ModeLeaf> {
        match self {
            ModeNode::Leaf(leaf) => Some(leaf),
            ModeNode::Branch(_) => None,
        }
    }
}

/// An internal node: its own path plus the ordered keys of its direct
/// children. The root branch has the empty path.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeBranch {
    path: String,
    opts: Vec<String>,
    children: IndexMap<String, ModeNode>,
}

impl ModeBranch {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Ordered keys of the direct children, following input key order.
    pub fn opts(&self) -> &[String] {
        &self.opts
    }

    pub fn child(&self, key: &str) -> Option<&ModeNode> {
        self.children.get(key)
    }

    /// A direct child that is itself a branch.
    pub fn branch(&self, key: &str) -> Option<&ModeBranch> {
        self.children.get(key)?.as_branch()
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &ModeNode)> {
        self.children.iter().map(|(key, node)| (key.as_str(), node))
    }
}

/// A terminal of the mode graph. Its path is one mode; its value is the
/// null sentinel and is not represented.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeLeaf {
    path: String,
}

impl ModeLeaf {
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A finite, immutable set of modes derived from a categorical tree.
///
/// Built once; the mode set, the metadata tree, and the address tree are
/// all fixed for the graph's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeGraph {
    separator: String,
    root: ModeBranch,
    addresses: Map,
    modes: Vec<String>,
}

impl ModeGraph {
    /// Builds a graph from a purely categorical tree.
    ///
    /// # Errors
    ///
    /// [`ModeGraphError::NonCategoricalLeaf`] when any leaf holds something
    /// other than [`Leaf::Null`] (descriptors included).
    pub fn build(tree: &Map, separator: &str) -> Result<ModeGraph, ModeGraphError> {
        let root = build_branch(tree, String::new(), separator)?;
        let mut modes = Vec::new();
        collect_modes(&root, &mut modes);
        Ok(ModeGraph {
            separator: separator.to_string(),
            addresses: derive_addresses(tree, separator),
            root,
            modes,
        })
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// The root of the metadata tree. Its path is empty and its opts are
    /// the top-level keys.
    pub fn root(&self) -> &ModeBranch {
        &self.root
    }

    /// A tree of identical shape to the input whose every leaf holds its
    /// own path string: the symbolic handles callers use instead of
    /// hand-written mode literals.
    pub fn addresses(&self) -> &Map {
        &self.addresses
    }

    /// Every mode, in document order.
    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    pub fn contains(&self, mode: &str) -> bool {
        self.modes.iter().any(|m| m == mode)
    }

    /// Looks a node up by its joined path.
    pub fn node(&self, path: &str) -> Option<&ModeNode> {
        let mut segments = path.split(self.separator.as_str());
        let first = segments.next()?;
        let mut current = self.root.child(first)?;
        for segment in segments {
            current = current.as_branch()?.child(segment)?;
        }
        Some(current)
    }

    /// Looks a branch up by its joined path; the empty path is the root.
    pub fn branch(&self, path: &str) -> Option<&ModeBranch> {
        if path.is_empty() {
            return Some(&self.root);
        }
        self.node(path)?.as_branch()
    }
}

fn build_branch(level: &Map, path: String, separator: &str) -> Result<ModeBranch, ModeGraphError> {
    let opts: Vec<String> = level.keys().cloned().collect();
    let mut children = IndexMap::new();
    for (key, node) in level {
        let child_path = if path.is_empty() {
            key.clone()
        } else {
            let mut joined = String::with_capacity(path.len() + separator.len() + key.len());
            joined.push_str(&path);
            joined.push_str(separator);
            joined.push_str(key);
            joined
        };
        let child = match node {
            Node::Map(map) => ModeNode::Branch(build_branch(map, child_path, separator)?),
            Node::Leaf(Leaf::Null) => ModeNode::Leaf(ModeLeaf { path: child_path }),
            _ => return Err(ModeGraphError::NonCategoricalLeaf { path: child_path }),
        };
        children.insert(key.clone(), child);
    }
    Ok(ModeBranch {
        path,
        opts,
        children,
    })
}

fn collect_modes(branch: &ModeBranch, modes: &mut Vec<String>) {
    for (_, child) in branch.children() {
        match child {
            ModeNode::Branch(next) => collect_modes(next, modes),
            ModeNode::Leaf(leaf) => modes.push(leaf.path().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modetree_tree::tree_from_json;
    use serde_json::json;

    fn graph() -> ModeGraph {
        let tree = tree_from_json(json!({
            "auth": {"login": null, "register": null},
            "app": {"dashboard": null},
        }))
        .unwrap();
        ModeGraph::build(&tree, "/").unwrap()
    }

    #[test]
    fn mode_set_is_the_leaf_paths() {
        let graph = graph();
        assert_eq!(
            graph.modes(),
            ["auth/login", "auth/register", "app/dashboard"]
        );
        assert!(graph.contains("auth/login"));
        assert!(!graph.contains("auth"));
        assert!(!graph.contains("auth/logout"));
    }

    #[test]
    fn root_metadata() {
        let graph = graph();
        assert_eq!(graph.root().path(), "");
        assert_eq!(graph.root().opts(), ["auth", "app"]);
    }

    #[test]
    fn branch_metadata_and_lookup() {
        let graph = graph();
        let auth = graph.branch("auth").unwrap();
        assert_eq!(auth.path(), "auth");
        assert_eq!(auth.opts(), ["login", "register"]);

        let login = graph.node("auth/login").unwrap();
        assert_eq!(login.path(), "auth/login");
        assert!(login.as_leaf().is_some());

        assert!(graph.node("auth/logout").is_none());
        assert!(graph.branch("auth/login").is_none());
        assert_eq!(graph.branch("").unwrap().path(), "");
    }

    #[test]
    fn opts_follow_input_order() {
        let tree = tree_from_json(json!({"z": {"c": null, "a": null}, "b": null})).unwrap();
        let graph = ModeGraph::build(&tree, "/").unwrap();
        assert_eq!(graph.root().opts(), ["z", "b"]);
        assert_eq!(graph.branch("z").unwrap().opts(), ["c", "a"]);
        assert_eq!(graph.modes(), ["z/c", "z/a", "b"]);
    }

    #[test]
    fn addresses_tree_mirrors_shape() {
        let graph = graph();
        let expected = tree_from_json(json!({
            "auth": {"login": "auth/login", "register": "auth/register"},
            "app": {"dashboard": "app/dashboard"},
        }))
        .unwrap();
        assert_eq!(graph.addresses(), &expected);
    }

    #[test]
    fn rejects_non_categorical_leaf() {
        let tree = tree_from_json(json!({"auth": {"login": 1}})).unwrap();
        let err = ModeGraph::build(&tree, "/").unwrap_err();
        assert_eq!(
            err,
            ModeGraphError::NonCategoricalLeaf {
                path: "auth/login".to_string()
            }
        );
    }

    #[test]
    fn custom_separator() {
        let tree = tree_from_json(json!({"auth": {"login": null}})).unwrap();
        let graph = ModeGraph::build(&tree, ".").unwrap();
        assert_eq!(graph.modes(), ["auth.login"]);
        assert_eq!(graph.node("auth.login").unwrap().path(), "auth.login");
    }
}
