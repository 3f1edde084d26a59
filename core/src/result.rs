//! Parse results and their query accessors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ParseError, Result};
use crate::registry::SpecRegistry;
use crate::types::{OptionId, OptionKey, OptionSpec};

/// Outcome of one [`Parser::parse`](crate::Parser::parse) call.
///
/// Holds the program name, the free arguments in encounter order, and for
/// every option id its occurrence count and ordered parameter list. The
/// result borrows the registry it was parsed against so queries can be made
/// by short or long form.
///
/// # Examples
///
/// ```
/// use getopt_core::SpecRegistry;
///
/// let registry = SpecRegistry::new("vo:", ["output="]);
/// let result = registry.parse(["prog", "-vv", "-o", "a.txt", "file"]).unwrap();
///
/// assert_eq!(result.program_name(), "prog");
/// assert_eq!(result.count('v'), 2);
/// assert_eq!(result.parameter('o'), Some("a.txt"));
/// assert_eq!(result.free_args(), ["file"]);
/// assert!(!result.check("output"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult<'r> {
    registry: &'r SpecRegistry,
    program_name: String,
    free_args: Vec<String>,
    counts: HashMap<OptionId, usize>,
    parameters: HashMap<OptionId, Vec<String>>,
}

impl<'r> ParseResult<'r> {
    pub(crate) fn new(registry: &'r SpecRegistry, program_name: String) -> Self {
        Self {
            registry,
            program_name,
            free_args: Vec::new(),
            counts: HashMap::new(),
            parameters: HashMap::new(),
        }
    }

    pub(crate) fn record(&mut self, spec: &OptionSpec, parameter: Option<String>) {
        trace!(option = %spec.display_name(), ?parameter, "option occurrence");
        *self.counts.entry(spec.id()).or_insert(0) += 1;
        if let Some(parameter) = parameter {
            self.parameters.entry(spec.id()).or_default().push(parameter);
        }
    }

    pub(crate) fn push_free_arg(&mut self, arg: String) {
        self.free_args.push(arg);
    }

    pub(crate) fn extend_free_args(&mut self, args: impl IntoIterator<Item = String>) {
        self.free_args.extend(args);
    }

    /// The registry this result was parsed against.
    pub fn registry(&self) -> &'r SpecRegistry {
        self.registry
    }

    /// Token 0 of the parsed argument vector.
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// Free (positional) arguments in encounter order.
    pub fn free_args(&self) -> &[String] {
        &self.free_args
    }

    /// Occurrences of the option with the given id.
    pub fn count_id(&self, id: OptionId) -> usize {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Parameters recorded for the option with the given id.
    pub fn parameter_list_id(&self, id: OptionId) -> &[String] {
        self.parameters.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Occurrences of an option; 0 when it is undefined or never seen.
    pub fn count<'k>(&self, key: impl Into<OptionKey<'k>>) -> usize {
        self.registry
            .lookup(key)
            .map_or(0, |spec| self.count_id(spec.id()))
    }

    /// Whether the option occurred at least once.
    pub fn check<'k>(&self, key: impl Into<OptionKey<'k>>) -> bool {
        self.count(key) > 0
    }

    /// The last parameter given to an option, if any.
    pub fn parameter<'k>(&self, key: impl Into<OptionKey<'k>>) -> Option<&str> {
        self.parameter_list(key).last().map(String::as_str)
    }

    /// Every parameter given to an option, in encounter order.
    pub fn parameter_list<'k>(&self, key: impl Into<OptionKey<'k>>) -> &[String] {
        self.registry
            .lookup(key)
            .map(|spec| self.parameter_list_id(spec.id()))
            .unwrap_or(&[])
    }

    /// The last parameter given to an option.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingParameter`] when no parameter was
    /// recorded for the option.
    pub fn require_parameter<'k>(&self, key: impl Into<OptionKey<'k>>) -> Result<&str> {
        let key = key.into();
        self.parameter(key).ok_or_else(|| ParseError::MissingParameter {
            option: self
                .registry
                .lookup(key)
                .map_or_else(|| key.to_string(), OptionSpec::display_name),
        })
    }

    /// Sum of the counts of a long and a short form.
    ///
    /// Meant for registries built from the two mini-languages, where `-i` and
    /// `--input` are independent specs.
    pub fn count_either(&self, long: &str, short: char) -> usize {
        self.count(long) + self.count(short)
    }

    pub fn check_either(&self, long: &str, short: char) -> bool {
        self.check(long) || self.check(short)
    }

    /// The long form's last parameter if the long form was given, otherwise
    /// the short form's last parameter.
    pub fn parameter_either(&self, long: &str, short: char) -> Option<&str> {
        if self.check(long) {
            self.parameter(long)
        } else {
            self.parameter(short)
        }
    }

    /// Parameters of a long and a short form combined, long-form values
    /// first.
    ///
    /// # Examples
    ///
    /// ```
    /// use getopt_core::SpecRegistry;
    ///
    /// let registry = SpecRegistry::new("i:", ["input="]);
    /// let result = registry
    ///     .parse(["prog", "-i", "inputA.txt", "--input", "inputB.txt"])
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     result.parameter_list_either("input", 'i'),
    ///     ["inputB.txt", "inputA.txt"]
    /// );
    /// ```
    pub fn parameter_list_either(&self, long: &str, short: char) -> Vec<String> {
        self.parameter_list(long)
            .iter()
            .chain(self.parameter_list(short))
            .cloned()
            .collect()
    }

    /// Occurring options in registration order, with their counts.
    pub fn occurrences(&self) -> impl Iterator<Item = (&'r OptionSpec, usize)> + '_ {
        self.registry
            .specs()
            .iter()
            .map(move |spec| (spec, self.count_id(spec.id())))
            .filter(|(_, count)| *count > 0)
    }

    /// Checks that every required option occurred.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingRequiredOption`] for the first required
    /// option, in registration order, that never occurred.
    pub fn validate_required(&self) -> Result<()> {
        crate::validate::validate_required(self.registry, self)
    }

    /// Serializable snapshot of this result.
    pub fn summary(&self) -> ParseSummary {
        ParseSummary {
            program: self.program_name.clone(),
            free_args: self.free_args.clone(),
            options: self
                .occurrences()
                .map(|(spec, count)| OptionUsage {
                    option: spec.display_name(),
                    count,
                    parameters: self.parameter_list_id(spec.id()).to_vec(),
                })
                .collect(),
        }
    }
}

/// Registry-independent view of a [`ParseResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSummary {
    /// Program name (token 0).
    pub program: String,
    /// Free arguments in encounter order.
    pub free_args: Vec<String>,
    /// Options that occurred, in registration order.
    pub options: Vec<OptionUsage>,
}

/// One occurring option within a [`ParseSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionUsage {
    /// Display form, e.g. `-x/--xtras`.
    pub option: String,
    /// Number of occurrences.
    pub count: usize,
    /// Parameters in encounter order; empty for flag options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}
