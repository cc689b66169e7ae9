//! Per-call compilation state.

use jsonzod_core::{Dialect, Options, PathSegment, SchemaPath};

/// State threaded through one recursive descent.
///
/// Contexts are never mutated in place: each step derives a copy so sibling
/// branches do not observe each other's path suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationContext {
    path: SchemaPath,
    dialect: Dialect,
    apply_defaults: bool,
    suppress_default: bool,
    document: Option<String>,
}

impl CompilationContext {
    pub fn new(options: &Options) -> Self {
        Self {
            path: SchemaPath::root(),
            dialect: options.dialect,
            apply_defaults: options.apply_defaults,
            suppress_default: false,
            document: None,
        }
    }

    /// Root context for a document of a project.
    pub fn for_document(options: &Options, id: impl Into<String>) -> Self {
        Self {
            document: Some(id.into()),
            ..Self::new(options)
        }
    }

    /// Context for a nested schema one segment below this one.
    ///
    /// Default suppression applies to a single node and is not inherited.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        Self {
            path: self.path.join(segment),
            suppress_default: false,
            ..self.clone()
        }
    }

    /// Context two segments down, e.g. `properties` then the property name.
    pub fn descend(
        &self,
        keyword: impl Into<PathSegment>,
        segment: impl Into<PathSegment>,
    ) -> Self {
        self.child(keyword).child(segment)
    }

    /// Same location with the node's own `default` ignored.
    pub fn with_suppressed_default(&self) -> Self {
        Self {
            suppress_default: true,
            ..self.clone()
        }
    }

    pub fn path(&self) -> &SchemaPath {
        &self.path
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Whether the node's `default` keyword should be applied.
    pub fn defaults_enabled(&self) -> bool {
        self.apply_defaults && !self.suppress_default
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_extends_path_by_copy() {
        let root = CompilationContext::new(&Options::default());
        let child = root.descend("properties", "user");
        assert_eq!(child.path().to_string(), "$.properties.user");
        assert!(root.path().is_root());
    }

    #[test]
    fn test_suppressed_default_not_inherited() {
        let ctx = CompilationContext::new(&Options::default()).with_suppressed_default();
        assert!(!ctx.defaults_enabled());
        assert!(ctx.child("items").defaults_enabled());
    }

    #[test]
    fn test_defaults_disabled_by_options() {
        let ctx = CompilationContext::new(&Options::default().without_defaults());
        assert!(!ctx.defaults_enabled());
    }

    #[test]
    fn test_document_context() {
        let ctx = CompilationContext::for_document(&Options::default(), "user");
        assert_eq!(ctx.document(), Some("user"));
        assert_eq!(ctx.child(0usize).document(), Some("user"));
    }
}
