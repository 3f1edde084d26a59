//! Option definitions loaded from YAML or JSON.
//!
//! # Example YAML
//!
//! ```yaml
//! strict: false
//! short: "abX:"
//! long:
//!   - alpha
//!   - xtras=
//! options:
//!   - short: i
//!     long: input
//!     parameter: true
//!     required: true
//! inherit:
//!   - short: "v"
//!     long: [verbose]
//! ```
//!
//! Definitions are registered in this order: `options`, `short`, `long`,
//! then each `inherit` layer. The first definition of a character or word
//! wins, so later sources can add options but never redefine them.

use std::io::{BufReader, BufWriter};
use std::path::Path;

use getopt_core::{OptionSpec, SpecRegistry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// One explicit option, optionally linking a short and a long form.
///
/// # Examples
///
/// ```
/// # use getopt_config::OptionEntry;
/// let entry = OptionEntry {
///     short: Some('o'),
///     long: Some("output".into()),
///     parameter: true,
///     required: false,
/// };
/// let spec = entry.to_spec().unwrap();
/// assert_eq!(spec.display_name(), "-o/--output");
/// assert!(spec.takes_parameter());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    /// Short form character, without the dash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Long form word, without the dashes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Whether the option consumes a parameter.
    #[serde(default)]
    pub parameter: bool,
    /// Whether the option must be present.
    #[serde(default)]
    pub required: bool,
}

impl OptionEntry {
    /// Converts the entry into an option spec.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the entry has no form, its
    /// short form is `-`, `:` or whitespace, or its long form is empty or
    /// contains whitespace or `=`.
    pub fn to_spec(&self) -> Result<OptionSpec> {
        let short = self.short.map(validate_short).transpose()?;
        let long = self.long.as_deref().map(validate_long).transpose()?;

        let spec = match (short, long) {
            (Some(c), Some(word)) => OptionSpec::both(c, word),
            (Some(c), None) => OptionSpec::short(c),
            (None, Some(word)) => OptionSpec::long(word),
            (None, None) => {
                return Err(ConfigError::InvalidOption(
                    "option must define a short or long form".to_string(),
                ));
            }
        };

        let spec = if self.parameter { spec.with_parameter() } else { spec };
        Ok(if self.required { spec.required() } else { spec })
    }
}

impl From<&OptionSpec> for OptionEntry {
    fn from(spec: &OptionSpec) -> Self {
        Self {
            short: spec.short_form(),
            long: spec.long_form().map(String::from),
            parameter: spec.takes_parameter(),
            required: spec.is_required(),
        }
    }
}

fn validate_short(c: char) -> Result<char> {
    if c == '-' || c == ':' || c.is_whitespace() {
        return Err(ConfigError::InvalidOption(format!(
            "invalid short form {c:?}"
        )));
    }
    Ok(c)
}

fn validate_long(word: &str) -> Result<&str> {
    let stripped = word.trim_start_matches('-');
    if stripped.is_empty() || stripped.contains('=') || stripped.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidOption(format!(
            "invalid long form {word:?}"
        )));
    }
    Ok(stripped)
}

/// Mini-language string as accepted in `short` fields; `:` markers are skipped.
fn validate_short_string(shortopts: &str) -> Result<()> {
    shortopts
        .chars()
        .filter(|&c| c != ':')
        .try_for_each(|c| validate_short(c).map(|_| ()))
}

/// Mini-language word as accepted in `long` lists: `name` or `name=`.
fn validate_long_word(word: &str) -> Result<()> {
    validate_long(word.strip_suffix('=').unwrap_or(word)).map(|_| ())
}

/// Definitions added on top of the base registry, with parent precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InheritLayer {
    /// Short-option mini-language string.
    pub short: String,
    /// Long-option mini-language words.
    pub long: Vec<String>,
    /// Explicit option entries.
    pub options: Vec<OptionEntry>,
}

/// Top-level option definition.
///
/// Every field is optional in the file; an empty document describes an
/// empty lenient registry.
///
/// # Examples
///
/// ```no_run
/// use getopt_config::OptionsConfig;
///
/// let config = OptionsConfig::load_path("options.yaml").unwrap();
/// let registry = config.to_registry().unwrap();
/// let args = registry.parse_env().unwrap();
/// println!("{} free arguments", args.free_args().len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    /// Reject unknown options instead of skipping them.
    pub strict: bool,
    /// Short-option mini-language string (e.g. `"abX:"`).
    pub short: String,
    /// Long-option mini-language words (e.g. `["alpha", "xtras="]`).
    pub long: Vec<String>,
    /// Explicit option entries.
    pub options: Vec<OptionEntry>,
    /// Layers applied in order with registry inheritance.
    pub inherit: Vec<InheritLayer>,
}

impl OptionsConfig {
    /// Flattens a registry into explicit entries, in registration order.
    ///
    /// Building the result with [`to_registry`](Self::to_registry) gives
    /// back an equal registry.
    pub fn from_registry(registry: &SpecRegistry) -> Self {
        Self {
            strict: registry.is_strict(),
            options: registry.specs().iter().map(OptionEntry::from).collect(),
            ..Default::default()
        }
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a definition from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// or [`YamlError`](ConfigError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), "loaded YAML option definition");
        Ok(config)
    }

    /// Loads a definition from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// or [`JsonError`](ConfigError::JsonError) if parsing fails.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), "loaded JSON option definition");
        Ok(config)
    }

    /// Loads a definition, picking the format from the file extension
    /// (`.yaml`/`.yml` or `.json`).
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormat`](ConfigError::UnsupportedFormat) for any
    /// other extension, plus the errors of [`load`](Self::load) and
    /// [`load_json`](Self::load_json).
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::load(path),
            Some("json") => Self::load_json(path),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Saves the definition as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be
    /// written, or [`YamlError`](ConfigError::YamlError) if serialization
    /// fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Checks every entry and long word without building a registry.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidOption`](ConfigError::InvalidOption) found.
    pub fn validate(&self) -> Result<()> {
        let layers = std::iter::once((&self.short, &self.long, &self.options)).chain(
            self.inherit
                .iter()
                .map(|layer| (&layer.short, &layer.long, &layer.options)),
        );

        for (short, long, options) in layers {
            validate_short_string(short)?;
            for word in long {
                validate_long_word(word)?;
            }
            for entry in options {
                entry.to_spec()?;
            }
        }
        Ok(())
    }

    /// Builds the registry this definition describes.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOption`](ConfigError::InvalidOption) if any entry,
    /// short string or long word is malformed.
    pub fn to_registry(&self) -> Result<SpecRegistry> {
        self.validate()?;

        let mut builder = SpecRegistry::builder().strict(self.strict);
        for entry in &self.options {
            builder = builder.option(entry.to_spec()?);
        }
        let mut registry = builder.short_spec(&self.short).long_spec(&self.long).build();

        for layer in &self.inherit {
            let specs = layer
                .options
                .iter()
                .map(OptionEntry::to_spec)
                .collect::<Result<Vec<_>>>()?;
            registry = registry
                .inherit_options(specs)
                .inherit(&layer.short, &layer.long);
        }

        debug!(options = registry.len(), strict = registry.is_strict(), "built option registry");
        Ok(registry)
    }
}
