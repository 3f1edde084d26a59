//! File-based option definitions for [`getopt_core`] registries.
//!
//! An [`OptionsConfig`] describes a registry the same way code would: a
//! short-option mini-language string, a list of long-option words, explicit
//! entries linking a short and long form, and inheritance layers. It loads
//! from YAML or JSON and builds a [`SpecRegistry`](getopt_core::SpecRegistry).
//!
//! # Quick start
//!
//! ```
//! use getopt_config::OptionsConfig;
//!
//! let yaml = r#"
//! strict: true
//! short: "ab"
//! long: ["hardmode"]
//! options:
//!   - { short: "n", parameter: true, required: true }
//!   - { short: "i", long: "input", parameter: true }
//! "#;
//!
//! let config = OptionsConfig::from_yaml_str(yaml).unwrap();
//! let registry = config.to_registry().unwrap();
//! assert!(registry.is_strict());
//!
//! let args = registry.parse(["prog", "-abn", "3", "--input", "in.txt"]).unwrap();
//! assert_eq!(args.parameter('n'), Some("3"));
//! assert_eq!(args.parameter('i'), Some("in.txt"));
//! ```

mod config;
mod error;

pub use config::{InheritLayer, OptionEntry, OptionsConfig};
pub use error::{ConfigError, Result};
