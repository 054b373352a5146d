//! # schemod-core: Foundational Types for schemod
//!
//! This crate defines the vocabulary shared by the resolution engine and its
//! consumers. It depends on nothing internal.
//!
//! ## Contents
//!
//! 1. **The model graph.** [`PropertyTag`] is the closed set of canonical
//!    property classifications. [`Property`] and [`Model`] describe one
//!    generated record type, and [`ModelMap`] is the ordered, name-unique
//!    output of a resolution run.
//!
//! 2. **The error taxonomy.** [`ResolveError`] enumerates every way a schema
//!    can be rejected. All variants are fatal to a run; nothing is silently
//!    downgraded to a default type.
//!
//! 3. **Configuration.** [`ResolveConfig`] carries the class prefix, the
//!    root model's base name, and the name-override extension key.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `schemod-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod model;

// Re-export primary types for ergonomic imports.
pub use config::{ResolveConfig, DEFAULT_NAME_OVERRIDE_KEY};
pub use error::{ConfigError, ResolveError};
pub use model::{Model, ModelId, ModelMap, Property, PropertyTag};
