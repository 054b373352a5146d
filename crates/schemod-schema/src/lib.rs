//! # schemod-schema: Schema-to-Model Resolution
//!
//! Turns a JSON-Schema-like document (already parsed into a
//! [`serde_json::Value`]) into a [`ModelMap`](schemod_core::ModelMap): named
//! models, each an ordered list of typed properties, linked to one another
//! by name.
//!
//! ## Pipeline
//!
//! - [`resolve`]: follows `$ref` chains through `definitions`, rejecting
//!   missing targets and cycles.
//! - [`infer`]: collapses `type`, type unions, and `enum` literals into a
//!   [`PropertyTag`](schemod_core::PropertyTag) and an optionality flag.
//! - [`naming`]: derives model names (override, then `$ref` segment, then
//!   declaring property) and property names.
//! - [`registry`]: arena of models, reserving each name before its model
//!   is built and rejecting name collisions between distinct shapes.
//! - [`builder`]: the driver tying the four together; entry point
//!   [`resolve_models`].
//!
//! ## Crate Policy
//!
//! - Depends only on `schemod-core` internally.
//! - Single-threaded and synchronous; no I/O.
//! - Every error is fatal to the run. Permissive tags (`dynamic`) are kept
//!   for well-formed heterogeneous schemas, never for malformed ones.

pub mod builder;
pub mod infer;
pub mod naming;
pub mod registry;
pub mod resolve;

pub use builder::{resolve_models, ModelBuilder};
pub use infer::infer_tag;
pub use naming::NamingStrategy;
pub use registry::{ModelRegistry, Reservation};
pub use resolve::{RefResolver, Resolved};
