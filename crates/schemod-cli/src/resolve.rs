//! # Resolve Subcommand
//!
//! Loads a schema document, resolves it, and renders the model graph.
//!
//! Configuration is layered: defaults, then `--config` (JSON or YAML),
//! then the `--prefix` and `--root-name` flags.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::Value;

use schemod_core::{ModelMap, ResolveConfig};
use schemod_schema::resolve_models;

/// Output encodings for rendered results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the resolve subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Schema document (`.json`, `.yaml` or `.yml`).
    pub schema: PathBuf,

    /// Naming configuration file (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Class prefix for every model name. Overrides the config file.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Base name of the root model. Overrides the config file.
    #[arg(long)]
    pub root_name: Option<String>,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Execute the resolve subcommand.
pub fn run_resolve(args: &ResolveArgs) -> anyhow::Result<()> {
    let config = build_config(args)?;
    let schema = load_schema(&args.schema)?;
    let models = resolve_document(&schema, &config)
        .with_context(|| format!("failed to resolve {}", args.schema.display()))?;

    tracing::info!(
        schema = %args.schema.display(),
        models = models.len(),
        "resolved schema"
    );

    let rendered = render(&models, args.format)?;
    write_output(&rendered, args.output.as_deref())
}

/// Merge the config file (if any) with command-line overrides.
pub fn build_config(args: &ResolveArgs) -> anyhow::Result<ResolveConfig> {
    let mut config = match &args.config {
        Some(path) => ResolveConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ResolveConfig::default(),
    };
    if let Some(prefix) = &args.prefix {
        config.class_prefix = prefix.clone();
    }
    if let Some(root_name) = &args.root_name {
        config.root_name = root_name.clone();
    }
    tracing::debug!(?config, "effective configuration");
    Ok(config)
}

/// Read and parse a schema document, choosing the parser by extension.
pub fn load_schema(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("invalid JSON in {}", path.display())),
        Some("yaml" | "yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("invalid YAML in {}", path.display())),
        _ => bail!(
            "cannot infer schema format of {} (expected .json, .yaml or .yml)",
            path.display()
        ),
    }
}

/// Run the engine over a parsed document.
pub fn resolve_document(schema: &Value, config: &ResolveConfig) -> anyhow::Result<ModelMap> {
    Ok(resolve_models(schema, config)?)
}

/// Serialize `value` in the requested format, newline-terminated.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    let mut text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).context("failed to encode JSON")?,
        OutputFormat::Yaml => serde_yaml::to_string(value).context("failed to encode YAML")?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

/// Write rendered output to `path`, or to stdout when `None`.
pub fn write_output(text: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")
        }
    }
}
