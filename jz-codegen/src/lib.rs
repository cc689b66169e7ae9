//! Schema compiler for jsonzod.
//!
//! This crate turns parsed schema documents into validator builders.
//!
//! # Module Organization
//!
//! - [`compile`] - Single-document compiler (dispatch, keyword compilers, sessions)
//! - [`postprocess`] - Path-aware rewrite rules applied to every compiled node
//! - [`project`] - Multi-document resolver with cross-document references

pub mod compile;
mod error;
pub mod postprocess;
pub mod project;

pub use compile::{
    CompilationContext, Compiler, CompilerKind, CompilerRegistry, ParserOverride,
    ReferenceResolver, Resolution, SchemaCompiler, Session, validate_options,
};
pub use error::{Error, Result};
pub use project::{
    DependencyEdge, DependencyGraph, DocumentImport, DocumentOutput, ExportOutput, Project,
    ProjectOutput,
};
