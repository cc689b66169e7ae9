//! Zod module emission for jsonzod.
//!
//! This crate wraps the validator expressions produced by `jsonzod-codegen`
//! into complete JavaScript/TypeScript modules: the host library import,
//! namespace imports of other project documents, `const` bindings, type
//! aliases and the export statements of the selected wrap mode.
//!
//! # Module Organization
//!
//! - [`ast`] - Import, export, const and type alias builders
//! - [`emitter`] - Module text for single documents and project documents
//! - [`generator`] - [`Generator`] and project file generation

pub mod ast;
mod code_builder;
mod code_file;
pub mod emitter;
pub mod generator;

pub use code_builder::{CodeBuilder, Renderable};
pub use code_file::{CodeFile, RawCode};
pub use emitter::{emit_document, emit_project_document, host_import};
pub use generator::{Generator, ProjectFiles, extension, generate_project, write_files};
