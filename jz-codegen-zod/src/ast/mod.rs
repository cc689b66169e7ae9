//! JavaScript module syntax builders.
//!
//! These provide a small API for the statements a generated validator module
//! needs, rendered through [`CodeBuilder`](crate::CodeBuilder).

mod consts;
mod exports;
mod imports;

pub use consts::{Const, TypeAlias};
pub use exports::Export;
pub use imports::Import;

/// Module system of the generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleSyntax {
    /// `import` / `export` statements.
    #[default]
    Esm,
    /// `require` / `module.exports`.
    CommonJs,
}
