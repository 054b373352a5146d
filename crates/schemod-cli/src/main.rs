//! # schemod CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Resolve JSON-Schema-like documents into typed model graphs.
#[derive(Parser, Debug)]
#[command(name = "schemod", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Resolve a schema document and print its models.
    Resolve(schemod_cli::resolve::ResolveArgs),
    /// List the property tags models can carry.
    Tags(schemod_cli::tags::TagsArgs),
}

fn main() -> anyhow::Result<()> {
    // Diagnostics on stderr; stdout carries the rendered models.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve(args) => schemod_cli::resolve::run_resolve(&args),
        Commands::Tags(args) => schemod_cli::tags::run_tags(&args),
    }
}
