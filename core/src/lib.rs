//! Short/long option parsing for command-line programs.
//!
//! This crate turns an argument vector into a queryable [`ParseResult`]:
//!
//! - [`OptionSpec`]: one logical option with a short form (`-v`), a long
//!   form (`--verbose`), or both, and whether it takes a parameter or is
//!   required.
//! - [`SpecRegistry`]: the ordered set of specs, built from the short
//!   mini-language (`"abX:"`), the long mini-language (`["alpha", "xtras="]`)
//!   and explicit specs. Registries can be derived with
//!   [`inherit`](SpecRegistry::inherit), where parent definitions always win.
//! - [`Parser`]: the state machine that scans bundled short options, long
//!   options, parameters and the `--` terminator.
//! - [`ParseResult`]: counts, parameters and free arguments, plus
//!   [`validate_required`] for mandatory options.
//!
//! Unknown options are skipped by a lenient registry and rejected with
//! [`ParseError::UndefinedOption`] by a strict one.
//!
//! # Example
//!
//! ```
//! use getopt_core::*;
//!
//! let registry = SpecRegistry::builder()
//!     .short_spec("ab")
//!     .option(OptionSpec::short('n').with_parameter().required())
//!     .option(OptionSpec::both('i', "input").with_parameter())
//!     .long_spec(["hardmode", "easymode"])
//!     .build();
//!
//! let args = registry
//!     .parse(["test", "-abbbn", "12", "--input", "input.txt", "--hardmode", "out"])
//!     .unwrap();
//!
//! assert_eq!(args.count('b'), 3);
//! assert_eq!(args.parameter('n'), Some("12"));
//! assert_eq!(args.parameter('i'), Some("input.txt"));
//! assert!(args.check("hardmode"));
//! assert!(!args.check("easymode"));
//! assert_eq!(args.free_args(), ["out"]);
//! assert!(args.validate_required().is_ok());
//! ```

mod error;
mod merge;
mod parser;
mod registry;
mod result;
mod types;
mod validate;

pub use error::{ParseError, Result};
pub use merge::merge_registries;
pub use parser::{Parser, TERMINATOR};
pub use registry::{RegistryBuilder, SpecRegistry, parse_long_spec, parse_short_spec};
pub use result::{OptionUsage, ParseResult, ParseSummary};
pub use types::*;
pub use validate::{missing_required, validate_required};
