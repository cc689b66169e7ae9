//! Builder constructors named after the library API they render to.
//!
//! ```
//! use jsonzod_ir::z;
//!
//! let user = z::object(vec![("name", z::string())]);
//! assert!(user.as_object().is_some());
//! ```

use serde_json::Value;

use crate::{Additional, Builder, BuilderKind, ObjectType, Property, RefTarget, StringFormat};

pub fn any() -> Builder {
    BuilderKind::Any.into()
}

pub fn unknown() -> Builder {
    BuilderKind::Unknown.into()
}

pub fn never() -> Builder {
    BuilderKind::Never.into()
}

pub fn boolean() -> Builder {
    BuilderKind::Boolean.into()
}

pub fn null() -> Builder {
    BuilderKind::Null.into()
}

pub fn string() -> Builder {
    BuilderKind::String {
        format: None,
        format_message: None,
        checks: Vec::new(),
    }
    .into()
}

pub fn string_format(format: StringFormat) -> Builder {
    BuilderKind::String {
        format: Some(format),
        format_message: None,
        checks: Vec::new(),
    }
    .into()
}

pub fn number() -> Builder {
    BuilderKind::Number {
        integer: false,
        integer_message: None,
        checks: Vec::new(),
    }
    .into()
}

pub fn int() -> Builder {
    BuilderKind::Number {
        integer: true,
        integer_message: None,
        checks: Vec::new(),
    }
    .into()
}

pub fn literal(value: Value) -> Builder {
    BuilderKind::Literal(value).into()
}

/// `z.enum` over string members.
pub fn enumeration<I, S>(values: I) -> Builder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    BuilderKind::Enum(values.into_iter().map(Into::into).collect()).into()
}

pub fn object<K: Into<String>>(properties: Vec<(K, Builder)>) -> Builder {
    object_with(
        properties
            .into_iter()
            .map(|(key, value)| Property::new(key, value))
            .collect(),
        Additional::Strip,
    )
}

pub fn object_with(properties: Vec<Property>, additional: Additional) -> Builder {
    BuilderKind::Object(ObjectType {
        properties,
        additional,
    })
    .into()
}

pub fn array(items: Builder) -> Builder {
    BuilderKind::Array {
        items: Box::new(items),
        checks: Vec::new(),
    }
    .into()
}

pub fn tuple(items: Vec<Builder>) -> Builder {
    BuilderKind::Tuple { items, rest: None }.into()
}

pub fn record(values: Builder) -> Builder {
    BuilderKind::Record(Box::new(values)).into()
}

pub fn union(members: Vec<Builder>) -> Builder {
    BuilderKind::Union(members).into()
}

pub fn xor(members: Vec<Builder>) -> Builder {
    BuilderKind::Xor(members).into()
}

pub fn intersection(left: Builder, right: Builder) -> Builder {
    BuilderKind::Intersection(Box::new(left), Box::new(right)).into()
}

/// Direct reference to an already initialized validator.
pub fn reference(expr: impl Into<String>) -> Builder {
    BuilderKind::Reference(RefTarget {
        expr: expr.into(),
        deferred: false,
    })
    .into()
}

/// Reference wrapped in `z.lazy` for targets initialized later.
pub fn lazy(expr: impl Into<String>) -> Builder {
    BuilderKind::Reference(RefTarget {
        expr: expr.into(),
        deferred: true,
    })
    .into()
}

pub fn custom(expr: impl Into<String>) -> Builder {
    BuilderKind::Custom(expr.into()).into()
}
