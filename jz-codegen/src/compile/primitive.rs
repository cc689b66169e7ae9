//! `string`, `number`, `integer`, `boolean` and `null`.

use jsonzod_ir::{Builder, BuilderKind, Check, Constraint, StringFormat, z};
use jsonzod_schema::{ExclusiveBound, SchemaObject};
use serde_json::Number;

use super::{CompilerKind, literal};

pub(super) fn compile(kind: CompilerKind<'_>, schema: &SchemaObject) -> Builder {
    // A typed literal is still a literal.
    if schema.enum_values.is_some() {
        return literal::enumeration(schema);
    }
    if schema.const_value.is_some() {
        return literal::constant(schema);
    }

    match kind {
        CompilerKind::String => string(schema),
        CompilerKind::Number => number(schema, false),
        CompilerKind::Integer => number(schema, true),
        CompilerKind::Boolean => z::boolean(),
        CompilerKind::Null => z::null(),
        _ => z::any(),
    }
}

fn string(schema: &SchemaObject) -> Builder {
    let format = match schema.format.as_deref().and_then(StringFormat::from_keyword) {
        Some(format) => Some(format),
        None if schema.content_encoding.as_deref() == Some("base64") => Some(StringFormat::Base64),
        None => None,
    };
    let format_message = format.and_then(|_| schema.error_message("format").map(str::to_string));

    let mut checks = Vec::new();
    if let Some(pattern) = &schema.pattern {
        checks.push(constraint(schema, Check::Regex(pattern.clone()), "pattern"));
    }
    if let Some(min) = schema.min_length {
        checks.push(constraint(schema, Check::Min(min), "minLength"));
    }
    if let Some(max) = schema.max_length {
        checks.push(constraint(schema, Check::Max(max), "maxLength"));
    }

    BuilderKind::String {
        format,
        format_message,
        checks,
    }
    .into()
}

fn number(schema: &SchemaObject, integer: bool) -> Builder {
    let mut integer = integer;
    let mut checks = Vec::new();

    if let Some(step) = &schema.multiple_of {
        if is_one(step) {
            integer = true;
        } else {
            checks.push(constraint(schema, Check::MultipleOf(step.clone()), "multipleOf"));
        }
    }

    // A draft-4 boolean flag turns the plain bound exclusive; a numeric
    // exclusive bound is a separate check.
    match (&schema.exclusive_minimum, &schema.minimum) {
        (Some(ExclusiveBound::Flag(true)), Some(min)) => {
            checks.push(constraint(schema, Check::Gt(min.clone()), "exclusiveMinimum"));
        }
        (_, Some(min)) => checks.push(constraint(schema, Check::Gte(min.clone()), "minimum")),
        _ => {}
    }
    if let Some(ExclusiveBound::Value(bound)) = &schema.exclusive_minimum {
        checks.push(constraint(schema, Check::Gt(bound.clone()), "exclusiveMinimum"));
    }

    match (&schema.exclusive_maximum, &schema.maximum) {
        (Some(ExclusiveBound::Flag(true)), Some(max)) => {
            checks.push(constraint(schema, Check::Lt(max.clone()), "exclusiveMaximum"));
        }
        (_, Some(max)) => checks.push(constraint(schema, Check::Lte(max.clone()), "maximum")),
        _ => {}
    }
    if let Some(ExclusiveBound::Value(bound)) = &schema.exclusive_maximum {
        checks.push(constraint(schema, Check::Lt(bound.clone()), "exclusiveMaximum"));
    }

    let integer_message = integer
        .then(|| schema.error_message("type").map(str::to_string))
        .flatten();

    BuilderKind::Number {
        integer,
        integer_message,
        checks,
    }
    .into()
}

fn constraint(schema: &SchemaObject, check: Check, keyword: &str) -> Constraint {
    Constraint::new(check).with_message(schema.error_message(keyword))
}

fn is_one(n: &Number) -> bool {
    n.as_u64() == Some(1) || n.as_f64() == Some(1.0)
}
