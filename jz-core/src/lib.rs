//! Core utilities and types for the jsonzod schema compiler.
//!
//! This crate provides the fundamental types shared by every stage of the
//! pipeline: the target [`Dialect`], compilation [`Options`], schema paths
//! used for diagnostics and post-processing, identifier helpers for the
//! generated JavaScript, and output file handling.

mod dialect;
mod file;
mod naming;
mod options;
mod path;
mod utils;

pub use dialect::Dialect;
pub use file::{OutputFile, WriteResult};
pub use naming::{JS_RESERVED_WORDS, is_reserved, safe_identifier};
pub use options::{Options, WrapMode};
pub use path::{PathSegment, SchemaPath};
pub use utils::{is_identifier, js_string, to_camel_case};
