//! Validator expression IR for jsonzod.
//!
//! The compiler lowers schema nodes into [`Builder`] trees: a base
//! expression ([`BuilderKind`]) plus an ordered list of [`Modifier`]s. The
//! tree is dialect independent; [`Renderer`] turns it into Zod source text
//! for one [`Dialect`](jsonzod_core::Dialect).
//!
//! # Architecture
//!
//! ```text
//! SchemaNode → compile (jsonzod-codegen) → Builder → Renderer → "z.string().min(1)"
//! ```
//!
//! Structurally equal trees always render to identical text.

mod builder;
mod chain;
mod render;
pub mod z;

pub use builder::{
    Additional, Builder, BuilderKind, Check, Constraint, Modifier, ObjectType, Property,
    RefTarget, StringFormat,
};
pub use chain::MethodChain;
pub use render::Renderer;
