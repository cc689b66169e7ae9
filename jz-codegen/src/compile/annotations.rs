//! Annotation keywords shared by every node.

use jsonzod_ir::Builder;
use jsonzod_schema::SchemaObject;

use super::CompilationContext;

/// Apply `nullable`, `readOnly`, `description` and `default`.
pub(super) fn apply(mut builder: Builder, schema: &SchemaObject, ctx: &CompilationContext) -> Builder {
    if schema.nullable == Some(true) {
        builder = builder.nullable();
    }
    if schema.read_only == Some(true) {
        builder = builder.readonly();
    }
    if let Some(description) = &schema.description {
        builder = builder.describe(description.clone());
    }
    if let Some(default) = schema.default.as_ref().filter(|_| ctx.defaults_enabled()) {
        builder = builder.default_value(default.clone());
    }
    builder
}

#[cfg(test)]
mod tests {
    use jsonzod_core::Options;
    use jsonzod_ir::{Modifier, z};
    use serde_json::json;

    use super::*;

    fn schema(value: serde_json::Value) -> SchemaObject {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_applies_annotations() {
        let ctx = CompilationContext::new(&Options::default());
        let out = apply(
            z::string(),
            &schema(json!({ "nullable": true, "readOnly": true, "description": "d", "default": "x" })),
            &ctx,
        );
        assert_eq!(
            out.modifiers,
            vec![
                Modifier::Nullable,
                Modifier::Readonly,
                Modifier::Describe("d".into()),
                Modifier::Default(json!("x")),
            ]
        );
    }

    #[test]
    fn test_default_respects_context() {
        let s = schema(json!({ "default": null }));

        let ctx = CompilationContext::new(&Options::default());
        assert!(apply(z::any(), &s, &ctx).has_default());
        assert!(!apply(z::any(), &s, &ctx.with_suppressed_default()).has_default());

        let ctx = CompilationContext::new(&Options::default().without_defaults());
        assert!(!apply(z::any(), &s, &ctx).has_default());
    }
}
