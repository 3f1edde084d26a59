//! Output formatting for parse summaries and option tables.

use getopt_config::OptionsConfig;
use getopt_core::{ParseSummary, SpecRegistry};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Formats the summary of one parse in the requested output format.
pub fn format_summary(summary: &ParseSummary, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(summary)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(summary).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(summary_to_table(summary)),
    }
}

/// Formats the resolved options of a registry.
///
/// JSON and YAML output is a flat definition that loads back into the same
/// registry.
pub fn format_registry(registry: &SpecRegistry, format: OutputFormat) -> Result<String, String> {
    let definition = OptionsConfig::from_registry(registry);
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&definition)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(&definition)
            .map_err(|e| format!("YAML serialization failed: {e}")),
        OutputFormat::Table => Ok(registry_to_table(registry)),
    }
}

fn summary_to_table(summary: &ParseSummary) -> String {
    let mut out = format!("Program: {}\n", summary.program);

    if !summary.options.is_empty() {
        out.push_str("\nOptions:\n");
        let width = summary
            .options
            .iter()
            .map(|usage| usage.option.len())
            .max()
            .unwrap_or(6);

        for usage in &summary.options {
            let line = format!(
                "  {:<width$}  x{}  {}",
                usage.option,
                usage.count,
                usage.parameters.join(" "),
            );
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    if !summary.free_args.is_empty() {
        out.push_str("\nFree arguments:\n");
        for arg in &summary.free_args {
            out.push_str(&format!("  {arg}\n"));
        }
    }

    out
}

fn registry_to_table(registry: &SpecRegistry) -> String {
    let mode = if registry.is_strict() { "strict" } else { "lenient" };
    let mut out = format!("Options: {}  Mode: {mode}\n", registry.len());

    if registry.is_empty() {
        return out;
    }

    out.push('\n');
    let width = registry
        .specs()
        .iter()
        .map(|spec| spec.display_name().len())
        .max()
        .unwrap_or(6);

    for spec in registry.specs() {
        let mut flags = Vec::new();
        if spec.takes_parameter() {
            flags.push("parameter");
        }
        if spec.is_required() {
            flags.push("required");
        }
        let line = format!(
            "  {:<width$}  {}",
            spec.display_name(),
            flags.join(", "),
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}
