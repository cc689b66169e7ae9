//! Single-document compiler.
//!
//! [`Compiler`] owns everything that outlives one compilation (options,
//! custom compilers, post-processing rules, the pattern cache). Each call
//! opens a [`Session`] that walks the document, selecting a compiler per
//! node through [`dispatch::select`].

mod annotations;
mod array;
mod composition;
mod context;
pub mod dispatch;
mod literal;
mod object;
mod primitive;
mod reference;

use std::{collections::HashSet, rc::Rc};

use jsonzod_core::{Options, WrapMode, safe_identifier};
use jsonzod_ir::{Builder, Renderer, z};
use jsonzod_schema::SchemaNode;
pub use context::CompilationContext;
pub use dispatch::{CompilerKind, CompilerRegistry, SchemaCompiler};
pub use reference::{LocalReferences, ReferenceResolver, Resolution, definition_name, split_reference};
use tracing::{trace, warn};

use crate::{
    Error, Result,
    postprocess::{PatternCache, PostContext, PostPipeline, PostProcessor},
};

/// User hook consulted before dispatch. Returning a builder skips dispatch.
pub type ParserOverride = dyn Fn(&SchemaNode, &CompilationContext) -> Option<Builder>;

/// Check option combinations that cannot produce a valid module.
pub fn validate_options(options: &Options) -> Result<()> {
    if options.type_alias.is_some() && options.name.is_none() {
        return Err(Error::config_conflict(
            "a type alias requires a name for the exported validator",
        ));
    }
    if options.type_alias.is_some() && options.wrap != WrapMode::Esm {
        return Err(Box::new(Error::ConfigConflict {
            message: format!("a type alias cannot be emitted with `{}` wrapping", options.wrap),
            help: Some("type aliases are only emitted for `esm` modules".to_string()),
        }));
    }
    if options.wrap == WrapMode::Const && options.name.is_none() {
        return Err(Error::config_conflict("`const` wrapping requires a name"));
    }
    Ok(())
}

/// Compiles schema nodes into builders.
///
/// # Example
///
/// ```
/// use jsonzod_codegen::Compiler;
/// use jsonzod_core::{Dialect, Options};
/// use serde_json::json;
///
/// let node = jsonzod_schema::from_value(json!({ "type": "integer", "minimum": 0 })).unwrap();
/// let compiler = Compiler::new(Options::default().dialect(Dialect::V3));
/// assert_eq!(compiler.compile(&node).unwrap(), "z.number().int().gte(0)");
/// ```
#[derive(Default)]
pub struct Compiler {
    options: Options,
    compilers: CompilerRegistry,
    postprocessors: PostPipeline,
    patterns: PatternCache,
    parser_override: Option<Box<ParserOverride>>,
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("options", &self.options)
            .field("compilers", &self.compilers)
            .field("postprocessors", &self.postprocessors)
            .field("parser_override", &self.parser_override.is_some())
            .finish()
    }
}

impl Compiler {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Renderer configured for the selected dialect.
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.options.dialect).with_jsdocs(self.options.jsdocs)
    }

    /// Register a custom compiler (mutable API).
    pub fn register(&mut self, compiler: Box<dyn SchemaCompiler>) -> Result<()> {
        self.compilers.register(compiler)
    }

    /// Register a custom compiler (consuming API).
    pub fn with_compiler(mut self, compiler: impl SchemaCompiler + 'static) -> Result<Self> {
        self.register(Box::new(compiler))?;
        Ok(self)
    }

    pub fn compilers(&self) -> &CompilerRegistry {
        &self.compilers
    }

    /// Append a post-processing rule.
    pub fn with_postprocessor(mut self, rule: impl PostProcessor + 'static) -> Self {
        self.postprocessors.push(Box::new(rule));
        self
    }

    pub fn postprocessors(&self) -> &PostPipeline {
        &self.postprocessors
    }

    pub fn postprocessors_mut(&mut self) -> &mut PostPipeline {
        &mut self.postprocessors
    }

    /// Install a hook that may take over compilation of any node.
    pub fn with_override(
        mut self,
        hook: impl Fn(&SchemaNode, &CompilationContext) -> Option<Builder> + 'static,
    ) -> Self {
        self.parser_override = Some(Box::new(hook));
        self
    }

    pub fn patterns(&self) -> &PatternCache {
        &self.patterns
    }

    /// Drop cached state shared between compilations.
    pub fn clear_caches(&self) {
        self.patterns.clear();
    }

    /// Compile a standalone document to a builder.
    ///
    /// `$ref`s must point inside the document.
    pub fn compile_builder(&self, node: &SchemaNode) -> Result<Builder> {
        validate_options(&self.options)?;
        let mut references = LocalReferences;
        let root = Rc::new(node.clone());
        let name = self.options.name.as_deref().map(safe_identifier);
        let mut session = Session::new(self, Rc::clone(&root), name, &mut references);
        session.compile_root(&CompilationContext::new(&self.options))
    }

    /// Compile a standalone document to expression text.
    pub fn compile(&self, node: &SchemaNode) -> Result<String> {
        let builder = self.compile_builder(node)?;
        Ok(self.renderer().render(&builder))
    }
}

/// One walk over a document.
///
/// Tracks the pointers being inlined, so a session must not outlive the
/// document it was opened for.
pub struct Session<'a> {
    compiler: &'a Compiler,
    root: Rc<SchemaNode>,
    root_name: Option<String>,
    in_progress: HashSet<String>,
    references: &'a mut dyn ReferenceResolver,
}

impl<'a> Session<'a> {
    pub fn new(
        compiler: &'a Compiler,
        root: Rc<SchemaNode>,
        root_name: Option<String>,
        references: &'a mut dyn ReferenceResolver,
    ) -> Self {
        Self {
            compiler,
            root,
            root_name,
            in_progress: HashSet::new(),
            references,
        }
    }

    pub fn options(&self) -> &Options {
        &self.compiler.options
    }

    pub fn renderer(&self) -> Renderer {
        self.compiler.renderer()
    }

    /// Render a builder to standalone expression text.
    pub fn render(&self, builder: &Builder) -> String {
        self.renderer().render(builder)
    }

    /// Compile the document root, guarding it against self references.
    pub fn compile_root(&mut self, ctx: &CompilationContext) -> Result<Builder> {
        let root = Rc::clone(&self.root);
        self.in_progress.insert(String::new());
        let result = self.compile(&root, ctx);
        self.in_progress.remove("");
        result
    }

    /// Compile a node and run post-processing on the result.
    pub fn compile(&mut self, node: &SchemaNode, ctx: &CompilationContext) -> Result<Builder> {
        let builder = self.compile_raw(node, ctx)?;
        Ok(self.post_process(builder, ctx))
    }

    /// Run the post-processing rules for the node at `ctx`.
    pub fn post_process(&self, builder: Builder, ctx: &CompilationContext) -> Builder {
        let post = PostContext::new(ctx.path(), &self.compiler.patterns);
        self.compiler.postprocessors.run(builder, &post)
    }

    /// Compile a node without post-processing.
    pub fn compile_raw(&mut self, node: &SchemaNode, ctx: &CompilationContext) -> Result<Builder> {
        let compiler = self.compiler;
        if let Some(builder) = compiler.parser_override.as_ref().and_then(|hook| hook(node, ctx)) {
            trace!(path = %ctx.path(), "override hook compiled node");
            return Ok(builder);
        }

        let schema = match node {
            SchemaNode::Bool(true) => return Ok(z::any()),
            SchemaNode::Bool(false) => return Ok(z::never()),
            SchemaNode::Object(schema) => &**schema,
        };

        let kind = dispatch::select(schema, &compiler.compilers);
        trace!(path = %ctx.path(), compiler = ?kind, "selected compiler");

        let builder = match kind {
            CompilerKind::Custom(custom) => custom.parse(schema, ctx, self)?,
            CompilerKind::Object => object::compile(self, schema, ctx)?,
            CompilerKind::Array => array::compile(self, schema, ctx)?,
            CompilerKind::String
            | CompilerKind::Number
            | CompilerKind::Integer
            | CompilerKind::Boolean
            | CompilerKind::Null => primitive::compile(kind, schema),
            CompilerKind::Enum => literal::enumeration(schema),
            CompilerKind::Const => literal::constant(schema),
            CompilerKind::AllOf => composition::all_of(self, schema, ctx)?,
            CompilerKind::AnyOf => composition::any_of(self, schema, ctx)?,
            CompilerKind::OneOf => composition::one_of(self, schema, ctx)?,
            CompilerKind::Not => composition::not(self, schema, ctx)?,
            CompilerKind::Conditional => composition::conditional(self, schema, ctx)?,
            CompilerKind::MultiType => composition::multi_type(self, schema, ctx)?,
            CompilerKind::Reference => match schema.reference.as_deref() {
                Some(reference) => self.resolve_reference(reference, ctx)?,
                None => z::any(),
            },
            CompilerKind::Any => z::any(),
        };

        Ok(annotations::apply(builder, schema, ctx))
    }

    /// Resolve a `$ref` through the session's reference resolver.
    pub fn resolve_reference(&mut self, reference: &str, ctx: &CompilationContext) -> Result<Builder> {
        match self.references.resolve(reference, ctx)? {
            Resolution::Builder(builder) => Ok(builder),
            Resolution::Inline(pointer) => self.inline(reference, &pointer, ctx),
        }
    }

    /// Compile the schema at `pointer` in place of the reference.
    ///
    /// The target is compiled afresh at every reference site and left raw;
    /// the site post-processes it once under its own path.
    fn inline(&mut self, reference: &str, pointer: &str, ctx: &CompilationContext) -> Result<Builder> {
        let key = normalize_pointer(pointer);
        if self.in_progress.contains(&key) {
            return Ok(self.recursion_fallback(&key, ctx));
        }

        let root = Rc::clone(&self.root);
        let target = root
            .pointer(&key)
            .ok_or_else(|| Error::unresolvable(reference, ctx.path()))?;

        self.in_progress.insert(key.clone());
        let result = self.compile_raw(target, ctx);
        self.in_progress.remove(&key);
        result
    }

    fn recursion_fallback(&self, key: &str, ctx: &CompilationContext) -> Builder {
        match (&self.root_name, key.is_empty()) {
            (Some(name), true) => z::lazy(name.clone()),
            _ => {
                warn!(
                    path = %ctx.path(),
                    pointer = key,
                    "recursive reference cannot be expressed inline, falling back to z.any()"
                );
                z::any()
            }
        }
    }
}

/// `#`, `#/`, `/` and the empty string all denote the document root.
fn normalize_pointer(pointer: &str) -> String {
    let pointer = pointer.strip_prefix('#').unwrap_or(pointer);
    if pointer == "/" {
        String::new()
    } else {
        pointer.to_string()
    }
}
