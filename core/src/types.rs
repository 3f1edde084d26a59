//! Option descriptors and lookup keys.
//!
//! An [`OptionSpec`] describes one logical option: its short form (`-v`),
//! its long form (`--verbose`), or both, whether it consumes a parameter, and
//! whether it must be present. Specs get their [`OptionId`] when they are
//! registered in a [`SpecRegistry`](crate::SpecRegistry).

use std::fmt;

/// Stable identity of a registered option.
///
/// Assigned in registration order. A short and long form that belong to the
/// same [`OptionSpec`] share one id, so their counts and parameters merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(pub usize);

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Descriptor of one logical option.
///
/// Long forms are stored without leading dashes; a long form that is empty
/// once stripped is discarded, so `OptionSpec::long("--")` has no form at
/// all. A registry never registers such a spec.
///
/// # Examples
///
/// ```
/// use getopt_core::OptionSpec;
///
/// let input = OptionSpec::both('i', "input").with_parameter().required();
/// assert_eq!(input.short_form(), Some('i'));
/// assert_eq!(input.long_form(), Some("input"));
/// assert!(input.takes_parameter());
/// assert!(input.is_required());
/// assert_eq!(input.display_name(), "-i/--input");
///
/// let verbose = OptionSpec::long("--verbose");
/// assert_eq!(verbose.long_form(), Some("verbose"));
/// assert_eq!(verbose.display_name(), "--verbose");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub(crate) id: OptionId,
    pub(crate) short: Option<char>,
    pub(crate) long: Option<String>,
    takes_parameter: bool,
    required: bool,
}

impl OptionSpec {
    /// Creates a short-only option (`-c`).
    pub fn short(c: char) -> Self {
        Self::from_parts(Some(c), None)
    }

    /// Creates a long-only option (`--word`).
    pub fn long(word: &str) -> Self {
        Self::from_parts(None, Some(word))
    }

    /// Creates an option reachable through both `-c` and `--word`.
    pub fn both(c: char, word: &str) -> Self {
        Self::from_parts(Some(c), Some(word))
    }

    fn from_parts(short: Option<char>, long: Option<&str>) -> Self {
        Self {
            id: OptionId(0),
            short,
            long: long
                .map(|w| w.trim_start_matches('-').to_string())
                .filter(|w| !w.is_empty()),
            takes_parameter: false,
            required: false,
        }
    }

    /// Marks the option as consuming one parameter per occurrence.
    pub fn with_parameter(mut self) -> Self {
        self.takes_parameter = true;
        self
    }

    /// Marks the option as mandatory for [`validate_required`](crate::validate_required).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Registry-assigned identity. `OptionId(0)` until registered.
    pub fn id(&self) -> OptionId {
        self.id
    }

    pub fn short_form(&self) -> Option<char> {
        self.short
    }

    pub fn long_form(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn takes_parameter(&self) -> bool {
        self.takes_parameter
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Human-readable form: `-x`, `--xyz`, or `-x/--xyz`.
    pub fn display_name(&self) -> String {
        match (self.short, self.long.as_deref()) {
            (Some(c), Some(w)) => format!("-{c}/--{w}"),
            (Some(c), None) => format!("-{c}"),
            (None, Some(w)) => format!("--{w}"),
            (None, None) => "?".to_string(),
        }
    }

    /// Checks whether `key` names this option through either form.
    pub fn matches(&self, key: OptionKey<'_>) -> bool {
        match key {
            OptionKey::Short(c) => self.short == Some(c),
            OptionKey::Long(w) => self.long.as_deref() == Some(w),
        }
    }

    /// True when neither form survived construction, e.g. `long("--")`.
    pub(crate) fn is_unnamed(&self) -> bool {
        self.short.is_none() && self.long.is_none()
    }
}

impl fmt::Display for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())?;
        if self.takes_parameter {
            f.write_str(" <param>")?;
        }
        Ok(())
    }
}

/// A query key: either a short character or a long word.
///
/// Accessors take `impl Into<OptionKey>`, so `'v'`, `"verbose"` and
/// `&String` all work directly.
///
/// # Examples
///
/// ```
/// use getopt_core::OptionKey;
///
/// assert_eq!(OptionKey::from('v').to_string(), "-v");
/// assert_eq!(OptionKey::from("verbose").to_string(), "--verbose");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey<'a> {
    Short(char),
    Long(&'a str),
}

impl From<char> for OptionKey<'_> {
    fn from(c: char) -> Self {
        OptionKey::Short(c)
    }
}

impl<'a> From<&'a str> for OptionKey<'a> {
    fn from(w: &'a str) -> Self {
        OptionKey::Long(w)
    }
}

impl<'a> From<&'a String> for OptionKey<'a> {
    fn from(w: &'a String) -> Self {
        OptionKey::Long(w.as_str())
    }
}

impl fmt::Display for OptionKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKey::Short(c) => write!(f, "-{c}"),
            OptionKey::Long(w) => write!(f, "--{w}"),
        }
    }
}
