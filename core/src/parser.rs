//! The argument-vector state machine.
//!
//! Every token after the program name is scanned character by character,
//! starting in `Init`:
//!
//! - `Init`: a leading `-` on a token longer than one character enters
//!   `ShortOpt`; anything else is a free argument (`Argument`).
//! - `ShortOpt`: a `-` in second position switches to `LongOpt`. Otherwise
//!   each character is a short option. Flags are counted and scanning goes
//!   on through the bundle; a parameter-accepting option takes the rest of
//!   the token, or the next token when nothing is left, and ends the token.
//!   An option in the middle of a bundle only gets the rest of the token
//!   when another token follows; otherwise it has no parameter.
//! - `LongOpt`: the rest of the token is the option word, resolved when the
//!   token ends. A parameter-accepting long option takes the next token.
//!
//! A token that is exactly `--` turns every remaining token into a free
//! argument.

use std::iter::Peekable;

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::registry::SpecRegistry;
use crate::result::ParseResult;
use crate::types::{OptionKey, OptionSpec};

/// Token that ends option parsing.
pub const TERMINATOR: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Init,
    Argument,
    ShortOpt,
    LongOpt,
}

/// Parses argument vectors against a shared registry.
///
/// A parser holds no state of its own between calls; every
/// [`parse`](Parser::parse) builds a fresh [`ParseResult`].
///
/// # Examples
///
/// ```
/// use getopt_core::{Parser, SpecRegistry};
///
/// let registry = SpecRegistry::new("abn:", Vec::<&str>::new());
/// let parser = Parser::new(&registry);
/// let result = parser.parse(["prog", "-abbbn", "12"]).unwrap();
///
/// assert_eq!(result.count('a'), 1);
/// assert_eq!(result.count('b'), 3);
/// assert_eq!(result.count('n'), 1);
/// assert_eq!(result.parameter('n'), Some("12"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Parser<'r> {
    registry: &'r SpecRegistry,
}

impl<'r> Parser<'r> {
    pub fn new(registry: &'r SpecRegistry) -> Self {
        Self { registry }
    }

    /// Parses a full argument vector; element 0 is the program name.
    ///
    /// # Errors
    ///
    /// - [`ParseError::InvalidInvocation`] if `argv` is empty.
    /// - [`ParseError::MissingParameter`] if a parameter-accepting option has
    ///   nothing left to consume.
    /// - [`ParseError::UndefinedOption`] for unknown options when the
    ///   registry is strict.
    pub fn parse<I, S>(&self, argv: I) -> Result<ParseResult<'r>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = argv.into_iter().map(Into::<String>::into).peekable();
        let program_name = tokens.next().ok_or(ParseError::InvalidInvocation)?;
        let mut result = ParseResult::new(self.registry, program_name);

        while let Some(token) = tokens.next() {
            if token == TERMINATOR {
                result.extend_free_args(tokens.by_ref());
                break;
            }
            self.parse_token(&token, &mut tokens, &mut result)?;
        }

        Ok(result)
    }

    fn parse_token(
        &self,
        token: &str,
        rest: &mut Peekable<impl Iterator<Item = String>>,
        result: &mut ParseResult<'r>,
    ) -> Result<()> {
        let mut mode = Mode::Init;
        let mut text = String::new();

        for (pos, (offset, c)) in token.char_indices().enumerate() {
            match mode {
                Mode::Init => {
                    if c == '-' && token.len() > 1 {
                        mode = Mode::ShortOpt;
                    } else {
                        mode = Mode::Argument;
                        text.push(c);
                    }
                }
                Mode::Argument | Mode::LongOpt => text.push(c),
                Mode::ShortOpt if pos == 1 && c == '-' => mode = Mode::LongOpt,
                Mode::ShortOpt => {
                    let Some(spec) = self.resolve(OptionKey::Short(c))? else {
                        continue;
                    };
                    if !spec.takes_parameter() {
                        result.record(spec, None);
                        continue;
                    }
                    let remainder = &token[offset + c.len_utf8()..];
                    let parameter = if remainder.is_empty() {
                        next_parameter(spec, rest)?
                    } else if rest.peek().is_some() {
                        remainder.to_string()
                    } else {
                        return Err(missing_parameter(spec));
                    };
                    result.record(spec, Some(parameter));
                    return Ok(());
                }
            }
        }

        match mode {
            // Init only survives an empty token, which is still a free argument.
            Mode::Init | Mode::Argument => result.push_free_arg(text),
            Mode::ShortOpt => {}
            Mode::LongOpt => {
                if let Some(spec) = self.resolve(OptionKey::Long(&text))? {
                    let parameter = if spec.takes_parameter() {
                        Some(next_parameter(spec, rest)?)
                    } else {
                        None
                    };
                    result.record(spec, parameter);
                }
            }
        }

        Ok(())
    }

    fn resolve(&self, key: OptionKey<'_>) -> Result<Option<&'r OptionSpec>> {
        let spec = self.registry.get(key)?;
        if spec.is_none() {
            debug!(option = %key, "skipping undefined option");
        }
        Ok(spec)
    }
}

fn next_parameter(spec: &OptionSpec, rest: &mut impl Iterator<Item = String>) -> Result<String> {
    rest.next().ok_or_else(|| missing_parameter(spec))
}

fn missing_parameter(spec: &OptionSpec) -> ParseError {
    ParseError::MissingParameter {
        option: spec.display_name(),
    }
}

impl SpecRegistry {
    /// Parses `argv` against this registry.
    ///
    /// Shorthand for `Parser::new(self).parse(argv)`.
    pub fn parse<I, S>(&self, argv: I) -> Result<ParseResult<'_>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Parser::new(self).parse(argv)
    }

    /// Parses the current process's arguments against this registry.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    pub fn parse_env(&self) -> Result<ParseResult<'_>> {
        self.parse(std::env::args_os().map(|arg| arg.to_string_lossy().into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SpecRegistry {
        SpecRegistry::new("abX:", ["alpha", "beta", "xtras="])
    }

    #[test]
    fn test_counts_repeated_short_options() {
        let registry = registry();
        let result = registry.parse(["prog", "-a", "-b", "-a", "-X", "1"]).unwrap();

        assert_eq!(result.count('a'), 2);
        assert_eq!(result.count('b'), 1);
        assert_eq!(result.count('X'), 1);
        assert_eq!(result.parameter('X'), Some("1"));
        assert!(result.free_args().is_empty());
    }

    #[test]
    fn test_parameter_from_token_remainder() {
        let registry = registry();
        let result = registry.parse(["prog", "-aX12", "free"]).unwrap();

        assert_eq!(result.count('a'), 1);
        assert_eq!(result.parameter('X'), Some("12"));
        assert_eq!(result.free_args(), ["free"]);
    }

    #[test]
    fn test_mid_bundle_parameter_needs_following_token() {
        let registry = registry();
        assert_eq!(
            registry.parse(["prog", "-Xab"]),
            Err(ParseError::MissingParameter {
                option: "-X".to_string()
            })
        );

        let registry = SpecRegistry::new("aX:", Vec::<&str>::new());
        assert_eq!(
            registry.parse(["prog", "-Xa"]),
            Err(ParseError::MissingParameter {
                option: "-X".to_string()
            })
        );
    }

    #[test]
    fn test_mid_bundle_parameter_takes_remainder_when_followed() {
        let registry = registry();
        let result = registry.parse(["prog", "-Xab", "next"]).unwrap();

        assert_eq!(result.parameter('X'), Some("ab"));
        assert_eq!(result.count('a'), 0);
        assert_eq!(result.count('b'), 0);
        assert_eq!(result.free_args(), ["next"]);
    }

    #[test]
    fn test_long_option_with_parameter() {
        let registry = registry();
        let result = registry
            .parse(["prog", "--xtras", "one", "--alpha", "--xtras", "two"])
            .unwrap();

        assert_eq!(result.count("xtras"), 2);
        assert_eq!(result.parameter_list("xtras"), ["one", "two"]);
        assert_eq!(result.count("alpha"), 1);
    }

    #[test]
    fn test_parameter_may_look_like_an_option() {
        let registry = registry();
        let result = registry.parse(["prog", "-X", "-a", "--xtras", "--"]).unwrap();

        assert_eq!(result.parameter('X'), Some("-a"));
        assert_eq!(result.parameter("xtras"), Some("--"));
        assert_eq!(result.count('a'), 0);
    }

    #[test]
    fn test_missing_parameters() {
        let registry = registry();
        assert_eq!(
            registry.parse(["prog", "-X"]),
            Err(ParseError::MissingParameter {
                option: "-X".to_string()
            })
        );
        assert_eq!(
            registry.parse(["prog", "-abX"]),
            Err(ParseError::MissingParameter {
                option: "-X".to_string()
            })
        );
        assert_eq!(
            registry.parse(["prog", "--xtras"]),
            Err(ParseError::MissingParameter {
                option: "--xtras".to_string()
            })
        );
    }

    #[test]
    fn test_lone_dash_and_empty_token_are_free_arguments() {
        let registry = registry();
        let result = registry.parse(["prog", "-", "", "plain"]).unwrap();
        assert_eq!(result.free_args(), ["-", "", "plain"]);
    }

    #[test]
    fn test_terminator_stops_option_parsing() {
        let registry = registry();
        let result = registry
            .parse(["prog", "-a", "--", "-x", "--y", "--", "-a"])
            .unwrap();

        assert_eq!(result.count('a'), 1);
        assert_eq!(result.free_args(), ["-x", "--y", "--", "-a"]);
    }

    #[test]
    fn test_lenient_mode_skips_unknown_options() {
        let registry = registry();
        let result = registry
            .parse(["prog", "-azb", "--unknown", "--beta"])
            .unwrap();

        assert_eq!(result.count('a'), 1);
        assert_eq!(result.count('b'), 1);
        assert_eq!(result.count('z'), 0);
        assert_eq!(result.count("unknown"), 0);
        assert_eq!(result.count("beta"), 1);
        assert!(result.free_args().is_empty());
    }

    #[test]
    fn test_strict_mode_rejects_unknown_options() {
        let registry = registry().with_strict(true);
        assert_eq!(
            registry.parse(["prog", "-az"]),
            Err(ParseError::UndefinedOption {
                option: "-z".to_string()
            })
        );
        assert_eq!(
            registry.parse(["prog", "--gamma"]),
            Err(ParseError::UndefinedOption {
                option: "--gamma".to_string()
            })
        );
    }

    #[test]
    fn test_empty_argv_is_invalid() {
        let registry = registry();
        assert_eq!(
            registry.parse(Vec::<String>::new()),
            Err(ParseError::InvalidInvocation)
        );
    }

    #[test]
    fn test_program_name_only() {
        let registry = registry();
        let result = registry.parse(["-a"]).unwrap();

        assert_eq!(result.program_name(), "-a");
        assert_eq!(result.count('a'), 0);
        assert!(result.free_args().is_empty());
    }

    #[test]
    fn test_linked_spec_merges_short_and_long() {
        let registry = SpecRegistry::builder()
            .option(OptionSpec::both('i', "input").with_parameter())
            .build();
        let result = registry
            .parse(["prog", "-i", "a.txt", "--input", "b.txt", "-ic.txt", "rest"])
            .unwrap();

        assert_eq!(result.count('i'), 3);
        assert_eq!(result.count("input"), 3);
        assert_eq!(result.parameter_list('i'), ["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_non_ascii_short_options() {
        let registry = SpecRegistry::new("éλ:", Vec::<&str>::new());
        let result = registry.parse(["prog", "-éλπ", "rest"]).unwrap();

        assert_eq!(result.count('é'), 1);
        assert_eq!(result.parameter('λ'), Some("π"));
    }
}
