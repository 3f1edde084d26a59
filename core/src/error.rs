//! Error types for option parsing and validation.

use thiserror::Error;

/// Errors raised while parsing an argument vector or validating the result.
///
/// Every variant that concerns a specific option carries its display form
/// (`-x`, `--xtras`, or `-x/--xtras`) so callers can report it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Strict mode met an option that is not in the registry.
    #[error("option '{option}' is undefined")]
    UndefinedOption { option: String },

    /// A parameter-accepting option had nothing left to consume.
    #[error("no parameter specified for option '{option}'")]
    MissingParameter { option: String },

    /// A required option never occurred.
    #[error("required option not provided: {option}")]
    MissingRequiredOption { option: String },

    /// The token sequence did not even contain a program name.
    #[error("argv must have at least one entry (program name)")]
    InvalidInvocation,
}

impl ParseError {
    /// The option this error refers to, if any.
    pub fn option(&self) -> Option<&str> {
        match self {
            ParseError::UndefinedOption { option }
            | ParseError::MissingParameter { option }
            | ParseError::MissingRequiredOption { option } => Some(option),
            ParseError::InvalidInvocation => None,
        }
    }
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_option() {
        let err = ParseError::MissingParameter {
            option: "-x/--xtras".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no parameter specified for option '-x/--xtras'"
        );
        assert_eq!(err.option(), Some("-x/--xtras"));
        assert_eq!(ParseError::InvalidInvocation.option(), None);
    }
}
