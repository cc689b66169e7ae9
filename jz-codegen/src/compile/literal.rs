//! `enum` and `const`.

use jsonzod_ir::{Builder, z};
use jsonzod_schema::SchemaObject;
use serde_json::Value;

pub(super) fn enumeration(schema: &SchemaObject) -> Builder {
    let values = schema.enum_values.as_deref().unwrap_or_default();
    match values {
        [] => z::never(),
        [single] => literal_of(single, schema),
        _ => {
            let strings: Option<Vec<&str>> = values.iter().map(Value::as_str).collect();
            match strings {
                Some(strings) => z::enumeration(strings),
                None => z::union(values.iter().map(|v| literal_of(v, schema)).collect()),
            }
        }
    }
}

pub(super) fn constant(schema: &SchemaObject) -> Builder {
    match &schema.const_value {
        Some(value) => literal_of(value, schema),
        None => z::any(),
    }
}

/// A primitive becomes `z.literal`; arrays and objects compare structurally.
fn literal_of(value: &Value, schema: &SchemaObject) -> Builder {
    match value {
        Value::Array(_) | Value::Object(_) => {
            let message = schema
                .error_message("const")
                .or_else(|| schema.error_message("enum"))
                .map(str::to_string);
            z::any().refine(
                format!("(value) => JSON.stringify(value) === JSON.stringify({})", value),
                message,
            )
        }
        primitive => z::literal(primitive.clone()),
    }
}

#[cfg(test)]
mod tests {
    use jsonzod_core::Dialect;
    use jsonzod_ir::Renderer;
    use serde_json::json;

    use super::*;

    fn schema(value: Value) -> SchemaObject {
        serde_json::from_value(value).unwrap()
    }

    fn render(builder: &Builder) -> String {
        Renderer::new(Dialect::V4).render(builder)
    }

    #[test]
    fn test_enum_shapes() {
        assert_eq!(render(&enumeration(&schema(json!({ "enum": [] })))), "z.never()");
        assert_eq!(render(&enumeration(&schema(json!({ "enum": ["a"] })))), "z.literal(\"a\")");
        assert_eq!(
            render(&enumeration(&schema(json!({ "enum": ["a", "b"] })))),
            "z.enum([\"a\", \"b\"])"
        );
        assert_eq!(
            render(&enumeration(&schema(json!({ "enum": ["a", 1, null] })))),
            "z.union([z.literal(\"a\"), z.literal(1), z.literal(null)])"
        );
    }

    #[test]
    fn test_structural_const() {
        let out = constant(&schema(json!({
            "const": { "a": [1, 2] },
            "errorMessage": { "const": "must match" }
        })));
        assert_eq!(
            render(&out),
            "z.any().refine((value) => JSON.stringify(value) === JSON.stringify({\"a\":[1,2]}), { error: \"must match\" })"
        );
    }

    #[test]
    fn test_null_const() {
        assert_eq!(render(&constant(&schema(json!({ "const": null })))), "z.literal(null)");
    }
}
