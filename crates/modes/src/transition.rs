//! Macro/sub mode grouping and transition operators.
//!
//! Both operators match on segment boundaries but *transition* by literal
//! substring substitution: a target prefix/suffix outside the mode set is a
//! design-time contract the caller upholds, and [`MacroModes::next`] /
//! [`SubModes::next`] do not re-verify membership. [`MacroModes::try_next`]
//! / [`SubModes::try_next`] are the opt-in checked variants for callers
//! that want the runtime membership guarantee instead.

use thiserror::Error;

use crate::graph::ModeGraph;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The substituted mode string is not in the graph's mode set.
    #[error("mode \"{mode}\" is not in the mode set")]
    UnknownMode { mode: String },
}

/// Groups the modes sharing a common leading path prefix.
///
/// Obtained from [`ModeGraph::macro_modes`].
#[derive(Debug, Clone)]
pub struct MacroModes<'g> {
    graph: &'g ModeGraph,
    prefix: String,
}

/// Groups the modes sharing a common trailing path suffix.
///
/// Obtained from [`ModeGraph::sub_modes`].
#[derive(Debug, Clone)]
pub struct SubModes<'g> {
    graph: &'g ModeGraph,
    suffix: String,
}

impl ModeGraph {
    /// Prefix grouping operator for `prefix`.
    pub fn macro_modes(&self, prefix: impl Into<String>) -> MacroModes<'_> {
        MacroModes {
            graph: self,
            prefix: prefix.into(),
        }
    }

    /// Suffix grouping operator for `suffix`.
    pub fn sub_modes(&self, suffix: impl Into<String>) -> SubModes<'_> {
        SubModes {
            graph: self,
            suffix: suffix.into(),
        }
    }
}

impl MacroModes<'_> {
    /// True iff `mode` equals the prefix or starts with it at a segment
    /// boundary.
    pub fn matches(&self, mode: &str) -> bool {
        match mode.strip_prefix(self.prefix.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with(self.graph.separator()),
            None => false,
        }
    }

    /// Replaces the leading prefix of `mode` with `new_prefix`, literally.
    ///
    /// Valid only when every mode reachable under the old prefix has a
    /// structural counterpart under the new one; that rule is not enforced
    /// here. A mode that does not start with the prefix is returned
    /// unchanged.
    pub fn next(&self, new_prefix: &str, mode: &str) -> String {
        match mode.strip_prefix(self.prefix.as_str()) {
            Some(rest) => {
                let mut next = String::with_capacity(new_prefix.len() + rest.len());
                next.push_str(new_prefix);
                next.push_str(rest);
                next
            }
            None => mode.to_string(),
        }
    }

    /// [`Self::next`] plus a membership check of the result against the
    /// graph's mode set.
    pub fn try_next(&self, new_prefix: &str, mode: &str) -> Result<String, TransitionError> {
        let next = self.next(new_prefix, mode);
        if self.graph.contains(&next) {
            Ok(next)
        } else {
            Err(TransitionError::UnknownMode { mode: next })
        }
    }
}

impl SubModes<'_> {
    /// True iff `mode` equals the suffix or ends with it at a segment
    /// boundary.
    pub fn matches(&self, mode: &str) -> bool {
        match mode.strip_suffix(self.suffix.as_str()) {
            Some("") => true,
            Some(rest) => rest.ends_with(self.graph.separator()),
            None => false,
        }
    }

    /// Replaces the first occurrence of the suffix within `mode` with
    /// `new_suffix`, literally.
    ///
    /// Valid only when the new suffix is reachable under every prefix the
    /// current suffix is reachable under; not enforced here.
    pub fn next(&self, new_suffix: &str, mode: &str) -> String {
        mode.replacen(self.suffix.as_str(), new_suffix, 1)
    }

    /// [`Self::next`] plus a membership check of the result against the
    /// graph's mode set.
    pub fn try_next(&self, new_suffix: &str, mode: &str) -> Result<String, TransitionError> {
        let next = self.next(new_suffix, mode);
        if self.graph.contains(&next) {
            Ok(next)
        } else {
            Err(TransitionError::UnknownMode { mode: next })
        }
    }
}
