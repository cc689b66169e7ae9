//! `$ref` resolution hook.

use jsonzod_ir::Builder;

use super::CompilationContext;
use crate::{Error, Result};

/// Outcome of resolving one `$ref`.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The reference compiles to this builder (an import or a lazy ref).
    Builder(Builder),
    /// Compile the schema at this pointer of the current document in place.
    Inline(String),
}

/// Decides what a `$ref` compiles to.
///
/// Standalone compilation uses [`LocalReferences`]; projects plug in a
/// resolver that knows about other documents.
pub trait ReferenceResolver {
    fn resolve(&mut self, reference: &str, ctx: &CompilationContext) -> Result<Resolution>;
}

/// Resolver for a single document: every reference is inlined.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalReferences;

impl ReferenceResolver for LocalReferences {
    fn resolve(&mut self, reference: &str, ctx: &CompilationContext) -> Result<Resolution> {
        let (document, fragment) = split_reference(reference);
        if !document.is_empty() {
            return Err(Error::unresolvable(reference, ctx.path()));
        }
        Ok(Resolution::Inline(fragment.to_string()))
    }
}

/// Split `<document>#<fragment>`. A reference without `#` names a document.
pub fn split_reference(reference: &str) -> (&str, &str) {
    reference.split_once('#').unwrap_or((reference, ""))
}

/// The definition name addressed by `/$defs/<name>` or `/definitions/<name>`.
pub fn definition_name(fragment: &str) -> Option<String> {
    let name = fragment
        .strip_prefix("/$defs/")
        .or_else(|| fragment.strip_prefix("/definitions/"))?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some(name.replace("~1", "/").replace("~0", "~"))
}
