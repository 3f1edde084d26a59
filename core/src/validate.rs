//! Post-parse validation of required options.
//!
//! The parser itself never looks at the `required` marker; this pass runs
//! afterwards against the registry. Because inheritance preserves ids, a
//! result parsed against a child registry can also be validated against any
//! of its ancestors.
//!
//! # Examples
//!
//! ```
//! use getopt_core::*;
//!
//! let registry = SpecRegistry::builder()
//!     .option(OptionSpec::both('i', "input").with_parameter().required())
//!     .option(OptionSpec::short('v'))
//!     .build();
//!
//! let ok = registry.parse(["prog", "--input", "a.txt"]).unwrap();
//! assert!(validate_required(&registry, &ok).is_ok());
//!
//! let missing = registry.parse(["prog", "-v"]).unwrap();
//! assert_eq!(
//!     missing.validate_required(),
//!     Err(ParseError::MissingRequiredOption { option: "-i/--input".into() })
//! );
//! ```

use crate::error::{ParseError, Result};
use crate::registry::SpecRegistry;
use crate::result::ParseResult;

/// Fails on the first required option of `registry` that never occurred in
/// `result`.
///
/// # Errors
///
/// Returns [`ParseError::MissingRequiredOption`] naming the option's display
/// form.
pub fn validate_required(registry: &SpecRegistry, result: &ParseResult<'_>) -> Result<()> {
    match missing_required(registry, result).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Collects an error for every required option that never occurred, in
/// registration order.
pub fn missing_required(registry: &SpecRegistry, result: &ParseResult<'_>) -> Vec<ParseError> {
    registry
        .required_specs()
        .filter(|spec| result.count_id(spec.id()) == 0)
        .map(|spec| ParseError::MissingRequiredOption {
            option: spec.display_name(),
        })
        .collect()
}
