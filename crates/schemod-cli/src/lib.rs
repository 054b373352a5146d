//! # schemod-cli: Schema Model Resolution from the Command Line
//!
//! Wraps the `schemod-schema` engine in a `schemod` binary. The CLI owns
//! everything the engine deliberately does not: reading files, parsing
//! JSON or YAML text, merging configuration sources, and printing results.
//!
//! ## Subcommands
//!
//! - `resolve`: resolve a schema document into its model graph
//! - `tags`: list the property tags the engine can produce
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live in modules here.
//! - Handlers return `anyhow::Result` with context on every I/O step.
//! - Output goes to stdout (or `--output`); diagnostics go to stderr.

pub mod resolve;
pub mod tags;
