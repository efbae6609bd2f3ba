//! Sparse patch reconciliation.
//!
//! [`apply`] deep-merges a patch into a mutable tree, one level at a time:
//! leaf-shaped patch values replace the target position wholesale, map
//! values descend (reinitializing a stale leaf to an empty level first),
//! and keys absent from the patch are untouched. There is no deletion
//! primitive; writing [`Leaf::Undefined`] is the only way to blank a field.
//!
//! The merge is implemented with an explicit work stack so arbitrarily deep
//! configuration trees cannot overflow the call stack.

use thiserror::Error;

use crate::node::{Map, Node, Patch};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Strict mode only: the patch descends through a position the target
    /// holds a leaf or descriptor at, which lenient [`apply`] would discard.
    #[error("cannot merge into leaf at \"{path}\"")]
    LeafCollision { path: String },
}

/// Applies `patch` into `target` in place.
///
/// For each key present in the patch:
///
/// - leaf values and descriptors are assigned directly (arrays, dates and
///   descriptors are swapped wholesale, never merged element-wise);
/// - map values descend recursively; if the target position is absent or
///   leaf-shaped it is reinitialized to an empty level first.
///
/// Never errors: missing keys are sparse no-ops and shape mismatches
/// reinitialize silently. Reapplying the same patch is idempotent, since
/// every terminal is assigned rather than accumulated. See [`apply_strict`]
/// for the hardened variant.
///
/// ```
/// use modetree_tree::{apply, tree_from_json, Leaf, Node};
/// use serde_json::json;
///
/// let mut target = tree_from_json(json!({"a": 5})).unwrap();
/// let patch = tree_from_json(json!({"a": {"b": 1}})).unwrap();
/// apply(&mut target, &patch);
/// // The stale leaf is discarded, not merged into.
/// assert_eq!(target["a"], Node::Map(tree_from_json(json!({"b": 1})).unwrap()));
/// ```
pub fn apply(target: &mut Map, patch: &Patch) {
    let mut work: Vec<(Vec<String>, &Patch)> = vec![(Vec::new(), patch)];
    while let Some((path, updates)) = work.pop() {
        let Some(level) = descend_mut(target, &path) else {
            continue;
        };
        for (key, update) in updates {
            match update {
                Node::Map(child) => {
                    if !matches!(level.get(key), Some(Node::Map(_))) {
                        level.insert(key.clone(), Node::Map(Map::new()));
                    }
                    let mut child_path = path.clone();
                    child_path.push(key.clone());
                    work.push((child_path, child));
                }
                // Leaf or descriptor: direct wholesale assignment.
                other => {
                    level.insert(key.clone(), other.clone());
                }
            }
        }
    }
}

/// Like [`apply`], but a missing patch is a no-op.
pub fn apply_opt(target: &mut Map, patch: Option<&Patch>) {
    if let Some(patch) = patch {
        apply(target, patch);
    }
}

/// Hardened [`apply`]: instead of silently reinitializing a leaf-shaped
/// target position that the patch descends through, fails with the joined
/// path of the collision and leaves `target` untouched.
///
/// Creating structure where the target has none is still permitted; only
/// positions where lenient application would discard existing terminal data
/// are rejected.
pub fn apply_strict(target: &mut Map, patch: &Patch) -> Result<(), ReconcileError> {
    check_collisions(target, patch)?;
    apply(target, patch);
    Ok(())
}

fn check_collisions(target: &Map, patch: &Patch) -> Result<(), ReconcileError> {
    let mut work: Vec<(Vec<String>, &Patch, Option<&Map>)> =
        vec![(Vec::new(), patch, Some(target))];
    while let Some((path, updates, level)) = work.pop() {
        for (key, update) in updates {
            let Node::Map(child) = update else { continue };
            let mut child_path = path.clone();
            child_path.push(key.clone());
            match level.and_then(|map| map.get(key)) {
                Some(Node::Map(next)) => work.push((child_path, child, Some(next))),
                None => work.push((child_path, child, None)),
                Some(_) => {
                    return Err(ReconcileError::LeafCollision {
                        path: child_path.join("/"),
                    })
                }
            }
        }
    }
    Ok(())
}

fn descend_mut<'a>(root: &'a mut Map, path: &[String]) -> Option<&'a mut Map> {
    let mut level = root;
    for key in path {
        match level.get_mut(key) {
            Some(Node::Map(next)) => level = next,
            _ => return None,
        }
    }
    Some(level)
}
