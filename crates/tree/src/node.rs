//! The tagged tree data model.
//!
//! Every position in a tree is one of three explicit variants; nothing is
//! ever inferred from the shape of a record at runtime. The one place a
//! "does this record carry a `kind` field?" check exists is the
//! [`Node::from_json`] boundary, where incoming JSON objects tagged with a
//! string `"kind"` become [`Descriptor`]s.

use indexmap::IndexMap;
use serde_json::Value;

/// One level of a tree: an ordered map from key to [`Node`].
///
/// Keys are unique per level and must not contain the path separator used
/// by the codec (separators are never escaped).
pub type Map = IndexMap<String, Node>;

/// A sparse set of writes. Structurally a [`Map`]; sparseness is expressed
/// by key absence, so there is no deletion primitive; assigning
/// [`Leaf::Undefined`] is the only way to blank a field.
pub type Patch = Map;

/// A position in a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A nested tree level. The only variant recursed into.
    Map(Map),
    /// A terminal value.
    Leaf(Leaf),
    /// An opaque tagged record. Structurally map-like, but the codec and
    /// reconciler treat it as a single unit regardless of its contents.
    Descriptor(Descriptor),
}

/// A terminal, non-recursable value.
///
/// Arrays may contain arbitrary nodes but are swapped wholesale, never
/// merged element-wise. Dates are epoch milliseconds; regexes are kept as
/// pattern sources and never compiled or executed here.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    Undefined,
    Null,
    Bool(bool),
    Num(serde_json::Number),
    Str(String),
    BigInt(i128),
    Symbol(String),
    Date(i64),
    Regex(String),
    Array(Vec<Node>),
    Func(FuncRef),
}

/// A named handle to a callable registered by the host layer. Compared and
/// assigned by name only; this crate never invokes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FuncRef(pub String);

impl FuncRef {
    pub fn new(name: impl Into<String>) -> Self {
        FuncRef(name.into())
    }
}

/// A record carrying the reserved discriminator tag.
///
/// Upstream callers embed structured operation descriptors inside otherwise
/// tree-shaped configuration; the codec emits them whole instead of
/// decomposing them, and the reconciler replaces them wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub kind: String,
    pub body: Map,
}

impl Descriptor {
    pub fn new(kind: impl Into<String>, body: Map) -> Self {
        Descriptor {
            kind: kind.into(),
            body,
        }
    }
}

/// The reserved discriminator field recognized by [`Node::from_json`].
pub const DISCRIMINANT_FIELD: &str = "kind";

impl Node {
    /// The leaf classifier: `true` for terminal values, `false` for map
    /// levels and descriptors.
    ///
    /// Descriptors are *not* classifier-leaves: treating them as opaque is
    /// a codec-level override, not a property of the value itself.
    ///
    /// ```
    /// use modetree_tree::{Leaf, Map, Node};
    ///
    /// assert!(Node::Leaf(Leaf::Null).is_leaf());
    /// assert!(Node::Leaf(Leaf::Array(vec![])).is_leaf());
    /// assert!(!Node::Map(Map::new()).is_leaf());
    /// ```
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Converts a JSON value into a node.
    ///
    /// Objects carrying a string [`DISCRIMINANT_FIELD`] become
    /// [`Node::Descriptor`]; all other objects become [`Node::Map`]. This is
    /// the only place descriptor-ness is inferred structurally.
    ///
    /// ```
    /// use modetree_tree::Node;
    /// use serde_json::json;
    ///
    /// let node = Node::from_json(json!({"kind": "navigate", "to": "app"}));
    /// assert!(matches!(node, Node::Descriptor(_)));
    /// ```
    pub fn from_json(value: Value) -> Node {
        match value {
            Value::Null => Node::Leaf(Leaf::Null),
            Value::Bool(b) => Node::Leaf(Leaf::Bool(b)),
            Value::Number(n) => Node::Leaf(Leaf::Num(n)),
            Value::String(s) => Node::Leaf(Leaf::Str(s)),
            Value::Array(items) => {
                Node::Leaf(Leaf::Array(items.into_iter().map(Node::from_json).collect()))
            }
            Value::Object(map) => {
                if matches!(map.get(DISCRIMINANT_FIELD), Some(Value::String(_))) {
                    let mut kind = String::new();
                    let mut body = Map::new();
                    for (key, value) in map {
                        if key == DISCRIMINANT_FIELD {
                            if let Value::String(s) = value {
                                kind = s;
                            }
                        } else {
                            body.insert(key, Node::from_json(value));
                        }
                    }
                    Node::Descriptor(Descriptor { kind, body })
                } else {
                    Node::Map(
                        map.into_iter()
                            .map(|(key, value)| (key, Node::from_json(value)))
                            .collect(),
                    )
                }
            }
        }
    }

    /// Converts a node back to JSON. Lossy for non-JSON terminals:
    /// `Undefined` becomes null, `Date` its millisecond count,
    /// `BigInt`/`Symbol`/`Regex`/`Func` their string forms.
    pub fn to_json(&self) -> Value {
        match self {
            Node::Map(map) => Value::Object(
                map.iter()
                    .map(|(key, node)| (key.clone(), node.to_json()))
                    .collect(),
            ),
            Node::Descriptor(descriptor) => {
                let mut obj = serde_json::Map::new();
                obj.insert(
                    DISCRIMINANT_FIELD.to_string(),
                    Value::String(descriptor.kind.clone()),
                );
                for (key, node) in &descriptor.body {
                    obj.insert(key.clone(), node.to_json());
                }
                Value::Object(obj)
            }
            Node::Leaf(leaf) => leaf.to_json(),
        }
    }
}

impl Leaf {
    pub fn to_json(&self) -> Value {
        match self {
            Leaf::Undefined | Leaf::Null => Value::Null,
            Leaf::Bool(b) => Value::Bool(*b),
            Leaf::Num(n) => Value::Number(n.clone()),
            Leaf::Str(s) => Value::String(s.clone()),
            Leaf::BigInt(v) => Value::String(v.to_string()),
            Leaf::Symbol(s) => Value::String(s.clone()),
            Leaf::Date(ms) => Value::Number((*ms).into()),
            Leaf::Regex(src) => Value::String(src.clone()),
            Leaf::Array(items) => Value::Array(items.iter().map(Node::to_json).collect()),
            Leaf::Func(f) => Value::String(f.0.clone()),
        }
    }
}

/// Converts a JSON object into a tree level.
///
/// Returns `None` when `value` is not a plain object (including
/// descriptor-shaped objects, which convert to a single opaque node).
///
/// ```
/// use modetree_tree::tree_from_json;
/// use serde_json::json;
///
/// assert!(tree_from_json(json!({"a": 1})).is_some());
/// assert!(tree_from_json(json!([1, 2])).is_none());
/// ```
pub fn tree_from_json(value: Value) -> Option<Map> {
    match Node::from_json(value) {
        Node::Map(map) => Some(map),
        _ => None,
    }
}
