//! # Tags Subcommand
//!
//! Prints the closed set of property tags, with whether each needs
//! reference semantics in generated code.

use clap::Args;
use serde::Serialize;

use schemod_core::PropertyTag;

use crate::resolve::{render, write_output, OutputFormat};

/// Arguments for the tags subcommand.
#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// One row of the tag listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagInfo {
    /// The tag itself.
    pub tag: PropertyTag,
    /// See [`PropertyTag::is_reference_like`].
    pub reference_like: bool,
}

/// Every tag in declaration order.
pub fn tag_table() -> Vec<TagInfo> {
    PropertyTag::all_tags()
        .iter()
        .map(|&tag| TagInfo {
            tag,
            reference_like: tag.is_reference_like(),
        })
        .collect()
}

/// Execute the tags subcommand.
pub fn run_tags(args: &TagsArgs) -> anyhow::Result<()> {
    let rendered = render(&tag_table(), args.format)?;
    write_output(&rendered, None)
}
