//! Registry inheritance.
//!
//! A child registry starts as a verbatim copy of its parent (ids included)
//! and then registers its own definitions with fresh ids. Parent entries
//! always win: a child definition whose character or word is already taken
//! loses that form, and is dropped entirely if nothing is left.
//!
//! # Example
//!
//! ```
//! use getopt_core::SpecRegistry;
//!
//! let parent = SpecRegistry::new("v", ["verbose"]);
//! let child = parent.inherit("v:o:", ["verbose=", "output="]);
//!
//! assert!(!child.lookup('v').unwrap().takes_parameter());
//! assert!(!child.lookup("verbose").unwrap().takes_parameter());
//! assert!(child.lookup('o').unwrap().takes_parameter());
//! assert_eq!(child.len(), 4);
//! ```

use crate::registry::SpecRegistry;
use crate::types::OptionSpec;

impl SpecRegistry {
    /// Derives a registry that adds the given mini-language definitions.
    ///
    /// The parent is left untouched and the child keeps its strictness.
    pub fn inherit<I, S>(&self, shortopts: &str, longopts: I) -> SpecRegistry
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut child = self.clone();
        child.register_short_spec(shortopts);
        child.register_long_specs(longopts);
        child
    }

    /// Derives a registry that adds explicit specs, with the same precedence
    /// rules as [`inherit`](SpecRegistry::inherit).
    pub fn inherit_options<I>(&self, specs: I) -> SpecRegistry
    where
        I: IntoIterator<Item = OptionSpec>,
    {
        let mut child = self.clone();
        for spec in specs {
            child.register(spec);
        }
        child
    }
}

/// Merges two registries, with `parent` taking precedence.
///
/// The result keeps the parent's specs, ids and strictness, and appends the
/// child's specs in the child's order under fresh ids.
///
/// # Examples
///
/// ```
/// use getopt_core::{SpecRegistry, merge_registries};
///
/// let parent = SpecRegistry::new("ab", ["all"]);
/// let child = SpecRegistry::strict("bc:", ["all=", "count="]);
///
/// let merged = merge_registries(&parent, &child);
/// assert_eq!(merged.len(), 5);
/// assert!(!merged.is_strict());
/// assert!(!merged.lookup("all").unwrap().takes_parameter());
/// assert!(merged.lookup('c').unwrap().takes_parameter());
/// ```
pub fn merge_registries(parent: &SpecRegistry, child: &SpecRegistry) -> SpecRegistry {
    parent.inherit_options(child.specs().iter().cloned())
}
