//! Mode option extraction.
//!
//! An *option* projects a full mode path down to the child segment at one
//! of its declared anchor branches: "which direct child of this node does
//! the current mode sit under?". Anchors are tried in declaration order and
//! an unresolvable option is `None`, never an error; most options are
//! simply not meaningful for most modes.

use indexmap::IndexMap;

use crate::graph::{ModeBranch, ModeGraph};

/// A set of named option projections over one [`ModeGraph`].
///
/// Built by [`ModeGraph::mode_options`].
#[derive(Debug, Clone)]
pub struct ModeOptions<'g> {
    separator: &'g str,
    options: IndexMap<String, Vec<&'g ModeBranch>>,
}

impl ModeGraph {
    /// Declares named options over this graph.
    ///
    /// The selector receives the root of the metadata tree and returns, per
    /// option name, the ordered anchor branches to try.
    ///
    /// ```
    /// use indexmap::IndexMap;
    /// use modetree_modes::ModeGraph;
    /// use modetree_tree::tree_from_json;
    /// use serde_json::json;
    ///
    /// let tree = tree_from_json(json!({
    ///     "auth": {"login": null},
    ///     "app": {"dashboard": null},
    /// }))
    /// .unwrap();
    /// let graph = ModeGraph::build(&tree, "/").unwrap();
    ///
    /// let options = graph.mode_options(|root| {
    ///     let mut config = IndexMap::new();
    ///     config.insert("section".to_string(), vec![root]);
    ///     config
    /// });
    /// assert_eq!(options.resolve("section", "auth/login"), Some("auth"));
    /// ```
    pub fn mode_options<'g, F>(&'g self, selector: F) -> ModeOptions<'g>
    where
        F: FnOnce(&'g ModeBranch) -> IndexMap<String, Vec<&'g ModeBranch>>,
    {
        ModeOptions {
            separator: self.separator(),
            options: selector(self.root()),
        }
    }
}

impl<'g> ModeOptions<'g> {
    /// Resolves `option` for `mode`.
    ///
    /// Tries each declared anchor in order and accepts the first whose path
    /// is a strict prefix of `mode` (the empty root path prefixes every
    /// mode) *and* whose declared child keys contain the path segment
    /// immediately following the anchor. `None` when no anchor applies or
    /// the option name is unknown.
    pub fn resolve(&self, option: &str, mode: &str) -> Option<&'g str> {
        let anchors = self.options.get(option)?;
        for anchor in anchors.iter().copied() {
            let rest = if anchor.path().is_empty() {
                mode
            } else {
                let Some(tail) = mode.strip_prefix(anchor.path()) else {
                    continue;
                };
                let Some(tail) = tail.strip_prefix(self.separator) else {
                    continue;
                };
                tail
            };
            let segment = rest.split(self.separator).next().unwrap_or(rest);
            if let Some(opt) = anchor.opts().iter().find(|opt| opt.as_str() == segment) {
                return Some(opt.as_str());
            }
        }
        None
    }

    /// The declared option names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }
}
