mod output;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use getopt_config::{ConfigError, OptionsConfig};
use getopt_core::{ParseError, SpecRegistry};
use output::{OutputFormat, format_registry, format_summary};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "getopt-dump", version)]
#[command(about = "Parse argument vectors against short/long option definitions")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Overrides RUST_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an argument vector and print what was recognized.
    Parse(ParseArgs),
    /// Print the resolved options of a definition file.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Short-option string, e.g. "abX:" (":" marks a parameter).
    #[arg(long, value_name = "SPEC", allow_hyphen_values = true)]
    short: Option<String>,
    /// Long-option word, e.g. "xtras=" ("=" marks a parameter). Repeatable.
    #[arg(long = "long", value_name = "WORD", allow_hyphen_values = true)]
    long: Vec<String>,
    /// YAML or JSON definition file; --short/--long are layered on top.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Reject undefined options.
    #[arg(long)]
    strict: bool,
    /// Fail when a required option is missing.
    #[arg(long)]
    validate: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Argument vector to parse, program name first.
    #[arg(last = true, value_name = "ARGV")]
    argv: Vec<String>,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// YAML or JSON definition file.
    #[arg(long)]
    config: PathBuf,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Output(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Parse(_) | Self::Output(_) => 1,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Show(args) => run_show(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), CliError> {
    let base = match &args.config {
        Some(path) => OptionsConfig::load_path(path)?.to_registry()?,
        None => SpecRegistry::default(),
    };
    let mut registry = base.inherit(args.short.as_deref().unwrap_or_default(), &args.long);
    if args.strict {
        registry = registry.with_strict(true);
    }
    debug!(
        options = registry.len(),
        strict = registry.is_strict(),
        "resolved option registry"
    );

    let result = registry.parse(args.argv)?;
    if args.validate {
        result.validate_required()?;
    }

    let rendered = format_summary(&result.summary(), args.format).map_err(CliError::Output)?;
    print!("{}", with_newline(rendered));
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<(), CliError> {
    let registry = OptionsConfig::load_path(&args.config)?.to_registry()?;
    let rendered = format_registry(&registry, args.format).map_err(CliError::Output)?;
    print!("{}", with_newline(rendered));
    Ok(())
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
