//! Compiler selection.
//!
//! Built-in compilers form the closed [`CompilerKind`] set. Third-party
//! compilers implement [`SchemaCompiler`] and are added to a
//! [`CompilerRegistry`], keyed by the `type` string they handle.

use std::fmt;

use indexmap::IndexMap;
use jsonzod_ir::Builder;
use jsonzod_schema::SchemaObject;

use super::{CompilationContext, Session};
use crate::{Error, Result};

/// `type` names handled by the built-in compilers.
pub const BUILTIN_TYPES: &[&str] = &["object", "array", "string", "number", "integer", "boolean", "null"];

/// A compiler for a custom schema shape.
///
/// # Example
///
/// ```
/// use jsonzod_codegen::{CompilationContext, Result, SchemaCompiler, Session};
/// use jsonzod_ir::{Builder, z};
/// use jsonzod_schema::SchemaObject;
///
/// struct BigInt;
///
/// impl SchemaCompiler for BigInt {
///     fn discriminator(&self) -> &str {
///         "bigint"
///     }
///
///     fn parse(&self, _: &SchemaObject, _: &CompilationContext, _: &mut Session<'_>) -> Result<Builder> {
///         Ok(z::custom("z.bigint()"))
///     }
/// }
/// ```
pub trait SchemaCompiler {
    /// The `type` value this compiler handles.
    fn discriminator(&self) -> &str;

    /// Compile a node whose `type` equals the discriminator.
    ///
    /// Nested schemas are compiled through `session`.
    fn parse(
        &self,
        schema: &SchemaObject,
        ctx: &CompilationContext,
        session: &mut Session<'_>,
    ) -> Result<Builder>;
}

/// Open extension table of custom compilers.
#[derive(Default)]
pub struct CompilerRegistry {
    compilers: IndexMap<String, Box<dyn SchemaCompiler>>,
}

impl fmt::Debug for CompilerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.compilers.keys()).finish()
    }
}

impl CompilerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a compiler.
    ///
    /// Fails when the discriminator is empty, names a built-in type, or is
    /// already bound.
    pub fn register(&mut self, compiler: Box<dyn SchemaCompiler>) -> Result<()> {
        let discriminator = compiler.discriminator().to_string();
        let reason = if discriminator.trim().is_empty() {
            Some("discriminator must not be empty")
        } else if BUILTIN_TYPES.contains(&discriminator.as_str()) {
            Some("discriminator names a built-in type")
        } else if self.compilers.contains_key(&discriminator) {
            Some("discriminator is already bound")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(Box::new(Error::InvalidCompiler {
                discriminator,
                reason: reason.to_string(),
            }));
        }
        self.compilers.insert(discriminator, compiler);
        Ok(())
    }

    pub fn get(&self, discriminator: &str) -> Option<&dyn SchemaCompiler> {
        self.compilers.get(discriminator).map(|c| c.as_ref())
    }

    pub fn contains(&self, discriminator: &str) -> bool {
        self.compilers.contains_key(discriminator)
    }

    pub fn len(&self) -> usize {
        self.compilers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compilers.is_empty()
    }
}

/// The compiler chosen for one schema node.
#[derive(Clone, Copy)]
pub enum CompilerKind<'a> {
    Custom(&'a dyn SchemaCompiler),
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
    Enum,
    Const,
    AllOf,
    AnyOf,
    OneOf,
    Not,
    Conditional,
    MultiType,
    Reference,
    Any,
}

impl fmt::Debug for CompilerKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilerKind::Custom(c) => write!(f, "Custom({})", c.discriminator()),
            other => f.write_str(other.name()),
        }
    }
}

impl CompilerKind<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            CompilerKind::Custom(_) => "custom",
            CompilerKind::Object => "object",
            CompilerKind::Array => "array",
            CompilerKind::String => "string",
            CompilerKind::Number => "number",
            CompilerKind::Integer => "integer",
            CompilerKind::Boolean => "boolean",
            CompilerKind::Null => "null",
            CompilerKind::Enum => "enum",
            CompilerKind::Const => "const",
            CompilerKind::AllOf => "allOf",
            CompilerKind::AnyOf => "anyOf",
            CompilerKind::OneOf => "oneOf",
            CompilerKind::Not => "not",
            CompilerKind::Conditional => "if",
            CompilerKind::MultiType => "multi-type",
            CompilerKind::Reference => "$ref",
            CompilerKind::Any => "any",
        }
    }
}

/// Select the compiler for an object-form schema. First match wins.
pub fn select<'a>(schema: &SchemaObject, registry: &'a CompilerRegistry) -> CompilerKind<'a> {
    let ty = schema.single_type();

    if let Some(custom) = ty.and_then(|t| registry.get(t)) {
        return CompilerKind::Custom(custom);
    }

    let untyped = schema.ty.is_none();
    if ty == Some("object")
        || (untyped && (schema.properties.is_some() || schema.additional_properties.is_some()))
    {
        return CompilerKind::Object;
    }
    if ty == Some("array") || (untyped && (schema.items.is_some() || schema.prefix_items.is_some())) {
        return CompilerKind::Array;
    }

    match ty {
        Some("string") => return CompilerKind::String,
        Some("number") => return CompilerKind::Number,
        Some("integer") => return CompilerKind::Integer,
        Some("boolean") => return CompilerKind::Boolean,
        Some("null") => return CompilerKind::Null,
        _ => {}
    }

    if schema.enum_values.is_some() {
        return CompilerKind::Enum;
    }
    if schema.const_value.is_some() {
        return CompilerKind::Const;
    }

    if schema.all_of.is_some() {
        CompilerKind::AllOf
    } else if schema.any_of.is_some() {
        CompilerKind::AnyOf
    } else if schema.one_of.is_some() {
        CompilerKind::OneOf
    } else if schema.not.is_some() {
        CompilerKind::Not
    } else if schema.if_schema.is_some()
        || schema.then_schema.is_some()
        || schema.else_schema.is_some()
    {
        CompilerKind::Conditional
    } else if schema.types().len() > 1 {
        CompilerKind::MultiType
    } else if schema.reference.is_some() {
        CompilerKind::Reference
    } else {
        CompilerKind::Any
    }
}
