//! Built-in post-processing rules.

use jsonzod_core::PathSegment;
use jsonzod_ir::{Additional, Builder, BuilderKind, Check, Constraint};

use super::{PostContext, PostProcessor};

/// Reject unknown keys on every object that does not already say otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictObjects;

impl PostProcessor for StrictObjects {
    fn name(&self) -> &str {
        "strict-objects"
    }

    fn process(&self, builder: &Builder, _: &PostContext<'_>) -> Option<Builder> {
        let obj = builder.as_object()?;
        if obj.additional != Additional::Strip {
            return None;
        }
        let mut out = builder.clone();
        if let Some(obj) = out.as_object_mut() {
            obj.additional = Additional::Strict;
        }
        Some(out)
    }
}

/// Require at least one element in every array.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyArrays;

impl PostProcessor for NonEmptyArrays {
    fn name(&self) -> &str {
        "non-empty-arrays"
    }

    fn process(&self, builder: &Builder, _: &PostContext<'_>) -> Option<Builder> {
        let BuilderKind::Array { checks, .. } = &builder.kind else {
            return None;
        };
        if checks
            .iter()
            .any(|c| matches!(c.check, Check::Min(n) if n >= 1))
        {
            return None;
        }
        let mut out = builder.clone();
        if let BuilderKind::Array { checks, .. } = &mut out.kind {
            checks.retain(|c| !matches!(c.check, Check::Min(_)));
            checks.insert(0, Constraint::new(Check::Min(1)));
        }
        Some(out)
    }
}

/// Brand every node whose last path segment is `field`.
#[derive(Debug, Clone)]
pub struct BrandField {
    field: String,
    brand: String,
}

impl BrandField {
    /// Brand `field` with its own name.
    pub fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            brand: field.clone(),
            field,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }
}

impl PostProcessor for BrandField {
    fn name(&self) -> &str {
        "brand-field"
    }

    fn process(&self, builder: &Builder, ctx: &PostContext<'_>) -> Option<Builder> {
        match ctx.path().last() {
            Some(PathSegment::Key(key)) if *key == self.field => {
                Some(builder.clone().brand(self.brand.clone()))
            }
            _ => None,
        }
    }
}

/// Mark path-matched nodes optional.
#[derive(Debug, Clone)]
pub struct ForceOptional {
    pattern: String,
}

impl ForceOptional {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl PostProcessor for ForceOptional {
    fn name(&self) -> &str {
        "force-optional"
    }

    fn process(&self, builder: &Builder, ctx: &PostContext<'_>) -> Option<Builder> {
        if builder.is_optional() || !ctx.match_path(&self.pattern) {
            return None;
        }
        Some(builder.clone().optional())
    }
}

/// Strip the optional marker from path-matched nodes.
#[derive(Debug, Clone)]
pub struct ForceRequired {
    pattern: String,
}

impl ForceRequired {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl PostProcessor for ForceRequired {
    fn name(&self) -> &str {
        "force-required"
    }

    fn process(&self, builder: &Builder, ctx: &PostContext<'_>) -> Option<Builder> {
        if !builder.is_optional() || !ctx.match_path(&self.pattern) {
            return None;
        }
        Some(builder.clone().required())
    }
}

#[cfg(test)]
mod tests {
    use jsonzod_core::SchemaPath;
    use jsonzod_ir::z;

    use super::*;
    use crate::postprocess::PatternCache;

    fn run(rule: &dyn PostProcessor, builder: Builder, path: &SchemaPath) -> Option<Builder> {
        let patterns = PatternCache::new();
        rule.process(&builder, &PostContext::new(path, &patterns))
    }

    #[test]
    fn test_strict_objects() {
        let root = SchemaPath::root();
        let out = run(&StrictObjects, z::object(vec![("a", z::any())]), &root).unwrap();
        assert_eq!(out.as_object().unwrap().additional, Additional::Strict);

        let loose = z::object_with(vec![], Additional::Passthrough);
        assert!(run(&StrictObjects, loose, &root).is_none());
        assert!(run(&StrictObjects, z::string(), &root).is_none());
    }

    #[test]
    fn test_non_empty_arrays() {
        let root = SchemaPath::root();
        let out = run(&NonEmptyArrays, z::array(z::string()), &root).unwrap();
        let BuilderKind::Array { checks, .. } = out.kind else {
            panic!("expected array");
        };
        assert_eq!(checks, vec![Constraint::new(Check::Min(1))]);
    }

    #[test]
    fn test_non_empty_arrays_keeps_stronger_minimum() {
        let mut arr = z::array(z::string());
        if let BuilderKind::Array { checks, .. } = &mut arr.kind {
            checks.push(Constraint::new(Check::Min(3)));
        }
        assert!(run(&NonEmptyArrays, arr, &SchemaPath::root()).is_none());
    }

    #[test]
    fn test_brand_field_matches_last_segment() {
        let path = SchemaPath::root().join("properties").join("userId");
        let out = run(&BrandField::new("userId"), z::string(), &path).unwrap();
        assert_eq!(out, z::string().brand("userId"));

        let other = SchemaPath::root().join("properties").join("id");
        assert!(run(&BrandField::new("userId"), z::string(), &other).is_none());
    }

    #[test]
    fn test_force_optional_and_required() {
        let path = SchemaPath::root().join("properties").join("email");

        let out = run(&ForceOptional::new("$..email"), z::string(), &path).unwrap();
        assert!(out.is_optional());

        let out = run(&ForceRequired::new("$.properties.*"), z::string().optional(), &path).unwrap();
        assert!(!out.is_optional());

        assert!(run(&ForceRequired::new("$"), z::string().optional(), &path).is_none());
    }
}
