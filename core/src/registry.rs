//! The option registry and its two mini-languages.
//!
//! Short options are declared as a string of characters, where a `:` after a
//! character means the option takes a parameter (`"abX:"`). Long options are
//! declared as a list of words, where a trailing `=` means the option takes a
//! parameter (`["alpha", "xtras="]`). In both languages the first definition
//! of a character or word wins; later ones are ignored.
//!
//! # Examples
//!
//! ```
//! use getopt_core::SpecRegistry;
//!
//! let registry = SpecRegistry::new("abX:", ["alpha", "beta", "xtras="]);
//! assert_eq!(registry.len(), 6);
//! assert!(registry.lookup('X').unwrap().takes_parameter());
//! assert!(!registry.lookup("alpha").unwrap().takes_parameter());
//! assert!(registry.lookup("xtras").unwrap().takes_parameter());
//! assert!(registry.lookup('z').is_none());
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::types::{OptionId, OptionKey, OptionSpec};

/// Parses a short-option spec string into option specs.
///
/// A `:` that does not directly follow an option character is skipped.
///
/// # Examples
///
/// ```
/// use getopt_core::parse_short_spec;
///
/// let specs = parse_short_spec("vn:");
/// assert_eq!(specs.len(), 2);
/// assert_eq!(specs[1].short_form(), Some('n'));
/// assert!(specs[1].takes_parameter());
/// ```
pub fn parse_short_spec(spec: &str) -> Vec<OptionSpec> {
    let mut specs = Vec::new();
    let mut chars = spec.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' {
            continue;
        }
        let mut option = OptionSpec::short(c);
        if chars.next_if_eq(&':').is_some() {
            option = option.with_parameter();
        }
        specs.push(option);
    }

    specs
}

/// Parses one long-option word (`"name"` or `"name="`) into an option spec.
///
/// Returns `None` for words that are empty once dashes and the `=` marker
/// are removed.
///
/// # Examples
///
/// ```
/// use getopt_core::parse_long_spec;
///
/// let xtras = parse_long_spec("xtras=").unwrap();
/// assert_eq!(xtras.long_form(), Some("xtras"));
/// assert!(xtras.takes_parameter());
/// assert!(parse_long_spec("=").is_none());
/// ```
pub fn parse_long_spec(word: &str) -> Option<OptionSpec> {
    let (word, takes_parameter) = match word.strip_suffix('=') {
        Some(stripped) => (stripped, true),
        None => (word, false),
    };

    let option = OptionSpec::long(word);
    if option.is_unnamed() {
        return None;
    }

    Some(if takes_parameter {
        option.with_parameter()
    } else {
        option
    })
}

/// Ordered, immutable collection of option specs.
///
/// Short and long forms are indexed separately; both indexes point into the
/// same ordered sequence. A registry is either *strict* (unknown options are
/// errors) or *lenient* (unknown options are skipped).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecRegistry {
    specs: Vec<OptionSpec>,
    by_short: HashMap<char, OptionId>,
    by_long: HashMap<String, OptionId>,
    strict: bool,
}

impl SpecRegistry {
    /// Builds a lenient registry from the two mini-languages.
    pub fn new<I, S>(shortopts: &str, longopts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::builder()
            .short_spec(shortopts)
            .long_spec(longopts)
            .build()
    }

    /// Builds a strict registry from the two mini-languages.
    pub fn strict<I, S>(shortopts: &str, longopts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(shortopts, longopts).with_strict(true)
    }

    /// Starts an empty lenient registry builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Returns the same registry with the given strictness.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// All specs in registration order.
    pub fn specs(&self) -> &[OptionSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Spec with the given id.
    pub fn spec(&self, id: OptionId) -> Option<&OptionSpec> {
        self.specs.get(id.0)
    }

    /// Finds a spec by short or long form, ignoring strictness.
    pub fn lookup<'k>(&self, key: impl Into<OptionKey<'k>>) -> Option<&OptionSpec> {
        let id = match key.into() {
            OptionKey::Short(c) => self.by_short.get(&c),
            OptionKey::Long(w) => self.by_long.get(w),
        };
        id.and_then(|id| self.spec(*id))
    }

    /// Finds a spec by short or long form, honoring strictness.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UndefinedOption`] when the key is unknown and
    /// the registry is strict. A lenient registry returns `Ok(None)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use getopt_core::{ParseError, SpecRegistry};
    ///
    /// let lenient = SpecRegistry::new("v", ["verbose"]);
    /// assert!(lenient.get("quiet").unwrap().is_none());
    ///
    /// let strict = lenient.with_strict(true);
    /// assert_eq!(
    ///     strict.get("quiet"),
    ///     Err(ParseError::UndefinedOption { option: "--quiet".into() })
    /// );
    /// ```
    pub fn get<'k>(&self, key: impl Into<OptionKey<'k>>) -> Result<Option<&OptionSpec>> {
        let key = key.into();
        match self.lookup(key) {
            Some(spec) => Ok(Some(spec)),
            None if self.strict => Err(ParseError::UndefinedOption {
                option: key.to_string(),
            }),
            None => Ok(None),
        }
    }

    /// Specs marked as required, in registration order.
    pub fn required_specs(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter().filter(|spec| spec.is_required())
    }

    /// Registers a spec, keeping only the forms not already taken.
    ///
    /// Returns the new id, or `None` if every form of the spec was already
    /// registered (or it had none).
    pub(crate) fn register(&mut self, mut spec: OptionSpec) -> Option<OptionId> {
        if let Some(c) = spec.short.filter(|c| self.by_short.contains_key(c)) {
            debug!(option = %format!("-{c}"), "short option already defined, keeping first");
            spec.short = None;
        }
        if let Some(word) = spec.long.take() {
            if self.by_long.contains_key(&word) {
                debug!(option = %format!("--{word}"), "long option already defined, keeping first");
            } else {
                spec.long = Some(word);
            }
        }
        if spec.is_unnamed() {
            return None;
        }

        let id = OptionId(self.specs.len());
        spec.id = id;
        if let Some(c) = spec.short {
            self.by_short.insert(c, id);
        }
        if let Some(word) = &spec.long {
            self.by_long.insert(word.clone(), id);
        }
        self.specs.push(spec);
        Some(id)
    }

    pub(crate) fn register_short_spec(&mut self, shortopts: &str) {
        for spec in parse_short_spec(shortopts) {
            self.register(spec);
        }
    }

    pub(crate) fn register_long_specs<I, S>(&mut self, longopts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in longopts {
            match parse_long_spec(word.as_ref()) {
                Some(spec) => {
                    self.register(spec);
                }
                None => debug!(word = word.as_ref(), "ignoring empty long option"),
            }
        }
    }
}

/// Incremental builder for a [`SpecRegistry`].
///
/// Definitions are registered in call order, so earlier calls take
/// precedence over later ones for the same character or word.
///
/// # Examples
///
/// ```
/// use getopt_core::{OptionSpec, SpecRegistry};
///
/// let registry = SpecRegistry::builder()
///     .option(OptionSpec::short('n').with_parameter().required())
///     .option(OptionSpec::both('i', "input").with_parameter())
///     .option(OptionSpec::long("hardmode"))
///     .short_spec("ab")
///     .strict(true)
///     .build();
///
/// assert!(registry.is_strict());
/// assert_eq!(registry.lookup('i'), registry.lookup("input"));
/// assert_eq!(registry.required_specs().count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    registry: SpecRegistry,
}

impl RegistryBuilder {
    /// Adds short options from the short mini-language.
    pub fn short_spec(mut self, shortopts: &str) -> Self {
        self.registry.register_short_spec(shortopts);
        self
    }

    /// Adds long options from the long mini-language.
    pub fn long_spec<I, S>(mut self, longopts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.registry.register_long_specs(longopts);
        self
    }

    /// Adds an explicit spec, possibly linking a short and a long form.
    pub fn option(mut self, spec: OptionSpec) -> Self {
        self.registry.register(spec);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.registry.strict = strict;
        self
    }

    pub fn build(self) -> SpecRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_spec_first_definition_wins() {
        let registry = SpecRegistry::new("vv:", Vec::<String>::new());
        assert_eq!(registry.len(), 1);
        assert!(!registry.lookup('v').unwrap().takes_parameter());
    }

    #[test]
    fn test_short_spec_skips_stray_colons() {
        let specs = parse_short_spec(":a::b");
        let forms: Vec<_> = specs.iter().filter_map(|s| s.short_form()).collect();
        assert_eq!(forms, vec!['a', 'b']);
        assert!(specs[0].takes_parameter());
        assert!(!specs[1].takes_parameter());
    }

    #[test]
    fn test_long_spec_first_definition_wins() {
        let registry = SpecRegistry::new("", ["name=", "name", "other"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.lookup("name").unwrap().takes_parameter());
    }

    #[test]
    fn test_long_spec_strips_dashes_and_ignores_empty() {
        let registry = SpecRegistry::new("", ["--output=", "", "="]);
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("output").unwrap().takes_parameter());
    }

    #[test]
    fn test_ids_follow_registration_order() {
        let registry = SpecRegistry::new("ab", ["gamma"]);
        let ids: Vec<_> = registry.specs().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![OptionId(0), OptionId(1), OptionId(2)]);
        assert_eq!(registry.spec(OptionId(2)).unwrap().long_form(), Some("gamma"));
    }

    #[test]
    fn test_separate_mini_languages_do_not_link() {
        let registry = SpecRegistry::new("i:", ["input="]);
        assert_ne!(
            registry.lookup('i').unwrap().id(),
            registry.lookup("input").unwrap().id()
        );
    }

    #[test]
    fn test_linked_spec_keeps_free_form_on_collision() {
        let registry = SpecRegistry::builder()
            .short_spec("i")
            .option(OptionSpec::both('i', "input").with_parameter())
            .build();

        assert_eq!(registry.len(), 2);
        assert!(!registry.lookup('i').unwrap().takes_parameter());
        let input = registry.lookup("input").unwrap();
        assert_eq!(input.short_form(), None);
        assert_eq!(input.display_name(), "--input");
    }

    #[test]
    fn test_fully_shadowed_spec_is_dropped() {
        let mut registry = SpecRegistry::new("v", ["verbose"]);
        assert_eq!(registry.register(OptionSpec::both('v', "verbose")), None);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_get_respects_strictness() {
        let registry = SpecRegistry::new("a", ["alpha"]);
        assert!(registry.get('z').unwrap().is_none());

        let strict = registry.with_strict(true);
        assert_eq!(
            strict.get('z'),
            Err(ParseError::UndefinedOption {
                option: "-z".to_string()
            })
        );
        assert!(strict.get("alpha").unwrap().is_some());
    }
}
