//! Address derivation: rewrite every terminal to its own path.
//!
//! Used by the mode layer to hand callers a tree of symbolic path handles
//! in place of hand-written literals.

use crate::node::{Leaf, Map, Node};

/// Produces a tree of identical shape where every terminal's value is that
/// terminal's own joined path string. Internal structure is preserved
/// exactly, including empty levels; descriptors count as terminals and are
/// replaced by their path like any leaf. The input is not mutated.
///
/// ```
/// use modetree_tree::{derive_addresses, tree_from_json, Leaf, Node};
/// use serde_json::json;
///
/// let tree = tree_from_json(json!({"auth": {"login": null}})).unwrap();
/// let addresses = derive_addresses(&tree, "/");
/// let auth = match &addresses["auth"] {
///     Node::Map(map) => map,
///     _ => unreachable!(),
/// };
/// assert_eq!(auth["login"], Node::Leaf(Leaf::Str("auth/login".into())));
/// ```
pub fn derive_addresses(tree: &Map, separator: &str) -> Map {
    let mut out = Map::new();
    // (joined path, segments, node), popped in document order.
    let mut stack: Vec<(String, Vec<String>, &Node)> = tree
        .iter()
        .rev()
        .map(|(key, node)| (key.clone(), vec![key.clone()], node))
        .collect();
    while let Some((path, segments, node)) = stack.pop() {
        match node {
            Node::Map(children) if !children.is_empty() => {
                for (key, child) in children.iter().rev() {
                    let mut child_path =
                        String::with_capacity(path.len() + separator.len() + key.len());
                    child_path.push_str(&path);
                    child_path.push_str(separator);
                    child_path.push_str(key);
                    let mut child_segments = segments.clone();
                    child_segments.push(key.clone());
                    stack.push((child_path, child_segments, child));
                }
            }
            Node::Map(_) => insert_at(&mut out, &segments, Node::Map(Map::new())),
            _ => insert_at(&mut out, &segments, Node::Leaf(Leaf::Str(path))),
        }
    }
    out
}

fn insert_at(root: &mut Map, segments: &[String], value: Node) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let mut level = root;
    for segment in parents {
        let slot = level
            .entry(segment.clone())
            .or_insert_with(|| Node::Map(Map::new()));
        match slot {
            Node::Map(next) => level = next,
            // Cannot occur for paths coming out of a well-formed walk.
            _ => return,
        }
    }
    level.insert(last.clone(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::tree_from_json;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> Map {
        tree_from_json(value).unwrap()
    }

    #[test]
    fn replaces_leaves_with_their_paths() {
        let source = tree(json!({"auth": {"login": null, "register": null}, "app": null}));
        let addresses = derive_addresses(&source, "/");
        assert_eq!(
            addresses,
            tree(json!({
                "auth": {"login": "auth/login", "register": "auth/register"},
                "app": "app",
            }))
        );
    }

    #[test]
    fn preserves_shape_and_order() {
        let source = tree(json!({"z": {"b": 1, "a": 2}, "m": true}));
        let addresses = derive_addresses(&source, "/");
        let keys: Vec<&str> = addresses.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "m"]);
        let inner = match &addresses["z"] {
            Node::Map(map) => map,
            other => panic!("expected map, got {other:?}"),
        };
        let inner_keys: Vec<&str> = inner.keys().map(String::as_str).collect();
        assert_eq!(inner_keys, ["b", "a"]);
    }

    #[test]
    fn keeps_empty_levels_empty() {
        let source = tree(json!({"a": {}, "b": null}));
        let addresses = derive_addresses(&source, "/");
        assert_eq!(addresses, tree(json!({"a": {}, "b": "b"})));
    }

    #[test]
    fn descriptor_is_an_addressable_terminal() {
        let source = tree(json!({"ops": {"go": {"kind": "navigate", "to": "x"}}}));
        let addresses = derive_addresses(&source, "/");
        assert_eq!(addresses, tree(json!({"ops": {"go": "ops/go"}})));
    }

    #[test]
    fn custom_separator() {
        let source = tree(json!({"a": {"b": null}}));
        let addresses = derive_addresses(&source, ".");
        assert_eq!(addresses, tree(json!({"a": {"b": "a.b"}})));
    }

    #[test]
    fn input_is_untouched() {
        let source = tree(json!({"a": {"b": 1}}));
        let before = source.clone();
        let _ = derive_addresses(&source, "/");
        assert_eq!(source, before);
    }
}
