//! Path codec: nested trees ⇄ flat path→value maps.
//!
//! [`flatten`] walks a tree depth-first and emits one entry per terminal,
//! keyed by the joined path of that terminal. Recursion halts at leaves and
//! at descriptors: a descriptor is emitted whole under a single path even
//! though it is structurally map-like. [`unflatten`] is the inverse and is
//! the only fallible operation in this crate's codec: reconstruction fails
//! when one position would have to serve both as an internal level and as an
//! assigned terminal.
//!
//! Round trip: `unflatten(flatten(t, sep), sep)` reproduces `t` exactly for
//! any tree free of empty map levels (empty levels flatten to nothing).
//! Both directions run on explicit stacks rather than the call stack.

use indexmap::IndexMap;
use thiserror::Error;

use crate::node::{Map, Node};

/// Separator used by callers that do not need a custom one.
pub const DEFAULT_SEPARATOR: &str = "/";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A flat key requires a position to be both a branch and a terminal.
    /// Carries the joined path prefix of the offending position.
    #[error("Conflict at path \"{path}\"")]
    PathConflict { path: String },
}

/// Flattens `tree` into a map from joined path to terminal value.
///
/// Entries appear in document order. Keys must not contain `separator`;
/// separators are never escaped.
///
/// ```
/// use modetree_tree::{flatten, tree_from_json, Leaf, Node};
/// use serde_json::json;
///
/// let tree = tree_from_json(json!({
///     "auth": {"login": null},
///     "op": {"kind": "navigate", "to": "app"},
/// }))
/// .unwrap();
/// let flat = flatten(&tree, "/");
/// assert_eq!(flat["auth/login"], Node::Leaf(Leaf::Null));
/// // The descriptor is one opaque unit under a single path.
/// assert!(matches!(flat["op"], Node::Descriptor(_)));
/// ```
pub fn flatten(tree: &Map, separator: &str) -> IndexMap<String, Node> {
    let mut flat = IndexMap::new();
    // Reversed so the first key of each level is popped first.
    let mut stack: Vec<(String, &Node)> = tree
        .iter()
        .rev()
        .map(|(key, node)| (key.clone(), node))
        .collect();
    while let Some((path, node)) = stack.pop() {
        match node {
            Node::Map(children) => {
                for (key, child) in children.iter().rev() {
                    let mut child_path =
                        String::with_capacity(path.len() + separator.len() + key.len());
                    child_path.push_str(&path);
                    child_path.push_str(separator);
                    child_path.push_str(key);
                    stack.push((child_path, child));
                }
            }
            terminal => {
                flat.insert(path, terminal.clone());
            }
        }
    }
    flat
}

/// Rebuilds a nested tree from a flat path→value map.
///
/// # Errors
///
/// [`CodecError::PathConflict`] when a key's prefix lands on an already
/// assigned terminal, or a key's full path lands on an already created
/// branch.
///
/// ```
/// use modetree_tree::{flatten, unflatten, tree_from_json};
/// use serde_json::json;
///
/// let tree = tree_from_json(json!({"a": {"b": 1, "c": 2}})).unwrap();
/// let rebuilt = unflatten(&flatten(&tree, "/"), "/").unwrap();
/// assert_eq!(rebuilt, tree);
/// ```
pub fn unflatten(flat: &IndexMap<String, Node>, separator: &str) -> Result<Map, CodecError> {
    let mut tree = Map::new();
    for (path, value) in flat {
        let parts: Vec<&str> = path.split(separator).collect();
        let (last, parents) = match parts.split_last() {
            Some(split) => split,
            None => continue,
        };
        let mut level = &mut tree;
        for (i, part) in parents.iter().enumerate() {
            let slot = level
                .entry((*part).to_string())
                .or_insert_with(|| Node::Map(Map::new()));
            match slot {
                Node::Map(next) => level = next,
                _ => {
                    return Err(CodecError::PathConflict {
                        path: parts[..=i].join(separator),
                    })
                }
            }
        }
        if matches!(level.get(*last), Some(Node::Map(_))) {
            return Err(CodecError::PathConflict { path: path.clone() });
        }
        level.insert((*last).to_string(), value.clone());
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{tree_from_json, Leaf};
    use serde_json::json;

    fn tree(value: serde_json::Value) -> Map {
        tree_from_json(value).unwrap()
    }

    #[test]
    fn flattens_nested_tree_in_document_order() {
        let tree = tree(json!({"a": {"b": 1, "c": {"d": 2}}, "e": 3}));
        let flat = flatten(&tree, DEFAULT_SEPARATOR);
        let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a/b", "a/c/d", "e"]);
        assert_eq!(flat["a/b"], Node::Leaf(Leaf::Num(1.into())));
    }

    #[test]
    fn flatten_halts_at_descriptor() {
        let tree = tree(json!({"ops": {"go": {"kind": "navigate", "to": {"deep": 1}}}}));
        let flat = flatten(&tree, "/");
        assert_eq!(flat.len(), 1);
        assert!(matches!(flat["ops/go"], Node::Descriptor(_)));
    }

    #[test]
    fn flatten_skips_empty_levels() {
        let tree = tree(json!({"a": {}, "b": 1}));
        let flat = flatten(&tree, "/");
        let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b"]);
    }

    #[test]
    fn flatten_with_custom_separator() {
        let tree = tree(json!({"a": {"b": {"c": 1}}}));
        let flat = flatten(&tree, ".");
        assert!(flat.contains_key("a.b.c"));
    }

    #[test]
    fn unflatten_rebuilds_tree() {
        let mut flat = IndexMap::new();
        flat.insert("a/b".to_string(), Node::Leaf(Leaf::Num(1.into())));
        flat.insert("a/c/d".to_string(), Node::Leaf(Leaf::Str("x".into())));
        flat.insert("e".to_string(), Node::Leaf(Leaf::Null));
        let rebuilt = unflatten(&flat, "/").unwrap();
        assert_eq!(rebuilt, tree(json!({"a": {"b": 1, "c": {"d": "x"}}, "e": null})));
    }

    #[test]
    fn unflatten_conflict_terminal_then_branch() {
        let mut flat = IndexMap::new();
        flat.insert("a".to_string(), Node::Leaf(Leaf::Num(1.into())));
        flat.insert("a/b".to_string(), Node::Leaf(Leaf::Num(2.into())));
        let err = unflatten(&flat, "/").unwrap_err();
        assert_eq!(
            err,
            CodecError::PathConflict {
                path: "a".to_string()
            }
        );
    }

    #[test]
    fn unflatten_conflict_branch_then_terminal() {
        let mut flat = IndexMap::new();
        flat.insert("a/b".to_string(), Node::Leaf(Leaf::Num(1.into())));
        flat.insert("a".to_string(), Node::Leaf(Leaf::Num(2.into())));
        let err = unflatten(&flat, "/").unwrap_err();
        assert_eq!(
            err,
            CodecError::PathConflict {
                path: "a".to_string()
            }
        );
    }

    #[test]
    fn unflatten_conflict_names_deep_prefix() {
        let mut flat = IndexMap::new();
        flat.insert("a/b".to_string(), Node::Leaf(Leaf::Num(1.into())));
        flat.insert("a/b/c/d".to_string(), Node::Leaf(Leaf::Num(2.into())));
        let err = unflatten(&flat, "/").unwrap_err();
        assert_eq!(
            err,
            CodecError::PathConflict {
                path: "a/b".to_string()
            }
        );
    }

    #[test]
    fn round_trip_preserves_descriptors() {
        let tree = tree(json!({
            "cfg": {"op": {"kind": "dispatch", "payload": {"n": 1}}, "x": true}
        }));
        let rebuilt = unflatten(&flatten(&tree, "/"), "/").unwrap();
        assert_eq!(rebuilt, tree);
    }

    #[test]
    fn round_trip_preserves_key_order() {
        let tree = tree(json!({"z": {"q": 1, "a": 2}, "b": 3}));
        let rebuilt = unflatten(&flatten(&tree, "/"), "/").unwrap();
        let keys: Vec<&str> = rebuilt.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "b"]);
        let inner = match &rebuilt["z"] {
            Node::Map(map) => map,
            other => panic!("expected map, got {other:?}"),
        };
        let inner_keys: Vec<&str> = inner.keys().map(String::as_str).collect();
        assert_eq!(inner_keys, ["q", "a"]);
    }

    #[test]
    fn deep_tree_does_not_overflow() {
        let mut node = Node::Leaf(Leaf::Bool(true));
        for i in (0..5_000).rev() {
            let mut level = Map::new();
            level.insert(format!("k{i}"), node);
            node = Node::Map(level);
        }
        let tree = match node {
            Node::Map(map) => map,
            _ => unreachable!(),
        };
        let flat = flatten(&tree, "/");
        assert_eq!(flat.len(), 1);
        let rebuilt = unflatten(&flat, "/").unwrap();
        assert_eq!(rebuilt, tree);
    }

    mod properties {
        use super::*;
        use crate::node::Descriptor;
        use proptest::prelude::*;

        fn arb_node() -> impl Strategy<Value = Node> {
            let terminal = prop_oneof![
                Just(Node::Leaf(Leaf::Null)),
                any::<bool>().prop_map(|b| Node::Leaf(Leaf::Bool(b))),
                any::<i64>().prop_map(|n| Node::Leaf(Leaf::Num(n.into()))),
                "[a-z]{0,8}".prop_map(|s| Node::Leaf(Leaf::Str(s))),
                "[a-z]{1,6}".prop_map(|kind| {
                    let mut body = Map::new();
                    body.insert("arg".to_string(), Node::Leaf(Leaf::Num(1.into())));
                    Node::Descriptor(Descriptor::new(kind, body))
                }),
            ];
            terminal.prop_recursive(4, 48, 4, |inner| {
                // Non-empty levels only: empty maps flatten to nothing.
                prop::collection::btree_map("[a-z]{1,6}", inner, 1..4)
                    .prop_map(|level| Node::Map(level.into_iter().collect()))
            })
        }

        fn arb_tree() -> impl Strategy<Value = Map> {
            prop::collection::btree_map("[a-z]{1,6}", arb_node(), 1..5)
                .prop_map(|level| level.into_iter().collect())
        }

        proptest! {
            #[test]
            fn flatten_unflatten_round_trip(tree in arb_tree()) {
                let flat = flatten(&tree, "/");
                let rebuilt = unflatten(&flat, "/").unwrap();
                prop_assert_eq!(rebuilt, tree);
            }
        }
    }
}
