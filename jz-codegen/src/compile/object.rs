//! `object` schemas.

use jsonzod_ir::{Additional, Builder, Property, z};
use jsonzod_schema::{SchemaNode, SchemaObject};

use super::{CompilationContext, Session};
use crate::Result;

pub(super) fn compile(
    session: &mut Session<'_>,
    schema: &SchemaObject,
    ctx: &CompilationContext,
) -> Result<Builder> {
    let base = match &schema.properties {
        None => record(session, schema, ctx)?,
        Some(properties) => {
            let mut members = Vec::with_capacity(properties.len());
            for (key, child) in properties {
                let child_ctx = ctx.descend("properties", key.as_str());
                let mut value = session.compile_raw(child, &child_ctx)?;
                if !schema.is_required(key) && !value.has_default() {
                    value = value.optional();
                }
                let value = session.post_process(value, &child_ctx);
                let description = child.as_object().and_then(|c| c.description.clone());
                members.push(Property::new(key.clone(), value).description(description));
            }
            let additional = additional(session, schema, ctx)?;
            z::object_with(members, additional)
        }
    };

    if !schema.has_composition() {
        return Ok(base);
    }
    let mut composed = base;
    if schema.all_of.is_some() {
        composed = z::intersection(composed, super::composition::all_of(session, schema, ctx)?);
    }
    if schema.any_of.is_some() {
        composed = z::intersection(composed, super::composition::any_of(session, schema, ctx)?);
    }
    if schema.one_of.is_some() {
        composed = z::intersection(composed, super::composition::one_of(session, schema, ctx)?);
    }
    Ok(composed)
}

/// A property-less object is a string-keyed map. Only a schema-valued
/// `additionalProperties` constrains the values.
fn record(
    session: &mut Session<'_>,
    schema: &SchemaObject,
    ctx: &CompilationContext,
) -> Result<Builder> {
    match schema.additional_properties.as_deref() {
        Some(values @ SchemaNode::Object(_)) => {
            let values = session.compile(values, &ctx.child("additionalProperties"))?;
            Ok(z::record(values))
        }
        _ => Ok(z::record(z::any())),
    }
}

fn additional(
    session: &mut Session<'_>,
    schema: &SchemaObject,
    ctx: &CompilationContext,
) -> Result<Additional> {
    Ok(match schema.additional_properties.as_deref() {
        None => Additional::Strip,
        Some(SchemaNode::Bool(false)) => Additional::Strict,
        Some(SchemaNode::Bool(true)) => Additional::Passthrough,
        Some(values) => {
            let values = session.compile(values, &ctx.child("additionalProperties"))?;
            Additional::Catchall(Box::new(values))
        }
    })
}

#[cfg(test)]
mod tests {
    use jsonzod_core::{Dialect, Options};
    use serde_json::{Value, json};

    use crate::Compiler;

    fn v3(value: Value) -> String {
        let node = jsonzod_schema::from_value(value).unwrap();
        Compiler::new(Options::default().dialect(Dialect::V3))
            .compile(&node)
            .unwrap()
    }

    fn v4(value: Value) -> String {
        let node = jsonzod_schema::from_value(value).unwrap();
        Compiler::default().compile(&node).unwrap()
    }

    #[test]
    fn test_required_and_optional_members() {
        let schema = json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "display-name": { "type": "string" },
                "active": { "type": "boolean", "default": true }
            },
            "required": ["id"]
        });
        assert_eq!(
            v4(schema),
            "z.object({\n  id: z.int(),\n  \"display-name\": z.string().optional(),\n  active: z.boolean().default(true)\n})"
        );
    }

    #[test]
    fn test_additional_properties_policies() {
        assert_eq!(
            v3(json!({ "properties": { "a": true }, "additionalProperties": false })),
            "z.object({\n  a: z.any().optional()\n}).strict()"
        );
        assert_eq!(
            v3(json!({ "properties": { "a": true }, "additionalProperties": true })),
            "z.object({\n  a: z.any().optional()\n}).passthrough()"
        );
        assert_eq!(
            v4(json!({ "properties": { "a": true }, "additionalProperties": true })),
            "z.object({\n  a: z.any().optional()\n}).loose()"
        );
        assert_eq!(
            v4(json!({ "properties": {}, "additionalProperties": { "type": "number" } })),
            "z.object({}).catchall(z.number())"
        );
    }

    #[test]
    fn test_record_without_properties() {
        assert_eq!(
            v4(json!({ "type": "object", "additionalProperties": { "type": "string" } })),
            "z.record(z.string(), z.string())"
        );
        assert_eq!(v4(json!({ "type": "object" })), "z.record(z.string(), z.any())");
        assert_eq!(
            v4(json!({ "type": "object", "additionalProperties": false })),
            "z.record(z.string(), z.any())"
        );
    }

    #[test]
    fn test_nested_objects_indent() {
        let schema = json!({
            "type": "object",
            "properties": {
                "user": {
                    "type": "object",
                    "properties": { "name": { "type": "string" } },
                    "required": ["name"]
                }
            },
            "required": ["user"]
        });
        assert_eq!(
            v4(schema),
            "z.object({\n  user: z.object({\n    name: z.string()\n  })\n})"
        );
    }

    #[test]
    fn test_jsdoc_descriptions() {
        let node = jsonzod_schema::from_value(json!({
            "properties": { "name": { "type": "string", "description": "Full name" } },
            "required": ["name"]
        }))
        .unwrap();
        let out = Compiler::new(Options::default().with_jsdocs()).compile(&node).unwrap();
        assert_eq!(
            out,
            "z.object({\n  /** Full name */\n  name: z.string().describe(\"Full name\")\n})"
        );
    }

    #[test]
    fn test_object_with_composition() {
        let schema = json!({
            "type": "object",
            "properties": { "a": { "type": "string" } },
            "required": ["a"],
            "allOf": [{ "properties": { "b": { "type": "number" } }, "required": ["b"] }]
        });
        assert_eq!(
            v4(schema),
            "z.intersection(z.object({\n  a: z.string()\n}), z.object({\n  b: z.number()\n}))"
        );
    }
}
