//! Post-processing of compiled builders.
//!
//! Every node leaving the compiler passes through an ordered list of
//! [`PostProcessor`] rules. A rule sees the node and its location and either
//! returns a replacement or leaves the node alone; the output of one rule
//! feeds the next.
//!
//! # Example
//!
//! ```
//! use jsonzod_codegen::postprocess::{ForceOptional, PostPipeline, StrictObjects};
//!
//! let pipeline = PostPipeline::new()
//!     .rule(StrictObjects)
//!     .rule(ForceOptional::new("$..nickname"));
//! assert_eq!(pipeline.names(), vec!["strict-objects", "force-optional"]);
//! ```

mod pattern;
mod rules;

use jsonzod_core::SchemaPath;
use jsonzod_ir::Builder;
pub use pattern::{PathPattern, PatternCache};
pub use rules::{BrandField, ForceOptional, ForceRequired, NonEmptyArrays, StrictObjects};

/// Read-only view of where a node sits.
#[derive(Debug, Clone, Copy)]
pub struct PostContext<'a> {
    path: &'a SchemaPath,
    patterns: &'a PatternCache,
}

impl<'a> PostContext<'a> {
    pub fn new(path: &'a SchemaPath, patterns: &'a PatternCache) -> Self {
        Self { path, patterns }
    }

    pub fn path(&self) -> &SchemaPath {
        self.path
    }

    /// Test the current path against a pattern such as `$..email`.
    pub fn match_path(&self, pattern: &str) -> bool {
        self.patterns.matches(pattern, self.path.segments())
    }
}

/// A path-aware rewrite rule.
pub trait PostProcessor {
    /// The name of this rule (for debugging and removal).
    fn name(&self) -> &str;

    /// Return a replacement for `builder`, or `None` to keep it.
    fn process(&self, builder: &Builder, ctx: &PostContext<'_>) -> Option<Builder>;
}

/// Ordered, mutable list of rules.
#[derive(Default)]
pub struct PostPipeline {
    rules: Vec<Box<dyn PostProcessor>>,
}

impl std::fmt::Debug for PostPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl PostPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule (consuming API).
    pub fn rule(mut self, rule: impl PostProcessor + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn push(&mut self, rule: Box<dyn PostProcessor>) {
        self.rules.push(rule);
    }

    /// Insert a rule at `index`, clamped to the end of the list.
    pub fn insert(&mut self, index: usize, rule: Box<dyn PostProcessor>) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
    }

    /// Remove every rule with the given name. Returns whether any was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.name() != name);
        self.rules.len() != before
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order.
    pub fn run(&self, builder: Builder, ctx: &PostContext<'_>) -> Builder {
        self.rules.iter().fold(builder, |current, rule| {
            rule.process(&current, ctx).unwrap_or(current)
        })
    }
}

#[cfg(test)]
mod tests {
    use jsonzod_ir::z;

    use super::*;

    struct Describe(&'static str);

    impl PostProcessor for Describe {
        fn name(&self) -> &str {
            self.0
        }

        fn process(&self, builder: &Builder, _: &PostContext<'_>) -> Option<Builder> {
            Some(builder.clone().describe(self.0))
        }
    }

    #[test]
    fn test_rules_compose_in_order() {
        let patterns = PatternCache::new();
        let path = SchemaPath::root();
        let ctx = PostContext::new(&path, &patterns);

        let pipeline = PostPipeline::new().rule(Describe("first")).rule(Describe("second"));
        let out = pipeline.run(z::string(), &ctx);
        assert_eq!(out, z::string().describe("second"));
    }

    #[test]
    fn test_insert_and_remove() {
        let mut pipeline = PostPipeline::new().rule(Describe("a"));
        pipeline.insert(0, Box::new(Describe("b")));
        pipeline.insert(10, Box::new(Describe("c")));
        assert_eq!(pipeline.names(), vec!["b", "a", "c"]);

        assert!(pipeline.remove("a"));
        assert!(!pipeline.remove("a"));
        assert_eq!(pipeline.len(), 2);

        pipeline.clear();
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_context_matches_path() {
        let patterns = PatternCache::new();
        let path = SchemaPath::root().join("properties").join("email");
        let ctx = PostContext::new(&path, &patterns);
        assert!(ctx.match_path("$..email"));
        assert!(!ctx.match_path("$"));
    }
}
