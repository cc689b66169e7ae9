//! Multi-document compilation.
//!
//! A [`Project`] holds a set of documents addressed by id. References take the
//! form `<document>#<fragment>`:
//!
//! - an empty fragment (or `/`) names the document's default export,
//! - `/$defs/<name>` or `/definitions/<name>` names an exported definition,
//! - any other pointer is inlined, and only inside the current document.
//!
//! References to a document that is still being compiled are emitted through
//! `z.lazy` and recorded as deferred edges. Everything else becomes a direct
//! reference to an already compiled binding.
//!
//! # Example
//!
//! ```
//! use jsonzod_codegen::Project;
//! use jsonzod_core::Options;
//! use jsonzod_schema::DocumentMeta;
//! use serde_json::json;
//!
//! let mut project = Project::new(Options::default());
//! let user = jsonzod_schema::from_value(json!({ "type": "string" })).unwrap();
//! let post = jsonzod_schema::from_value(json!({ "$ref": "user#" })).unwrap();
//! project.register("user", user, DocumentMeta::default()).unwrap();
//! project.register("post", post, DocumentMeta::default()).unwrap();
//!
//! let output = project.compile().unwrap();
//! let post = output.get("post").unwrap();
//! assert_eq!(post.default_export().unwrap().expression, "user.user");
//! ```

mod cache;
mod graph;
mod output;
mod registry;

use std::path::Path;

pub use cache::BuilderRegistry;
pub use graph::{DependencyEdge, DependencyGraph};
use indexmap::IndexMap;
use jsonzod_core::Options;
use jsonzod_ir::{Builder, z};
use jsonzod_schema::{DocumentMeta, Manifest, SchemaNode};
pub use output::{DocumentImport, DocumentOutput, ExportOutput, ImportCollector, ProjectOutput};
pub use registry::{DocumentState, Export, SchemaEntry, SchemaRegistry};
use tracing::debug;

use crate::{
    Error, Result,
    compile::{
        CompilationContext, Compiler, ReferenceResolver, Resolution, Session, definition_name,
        split_reference,
    },
};

/// A set of interlinked documents compiled together.
#[derive(Debug, Default)]
pub struct Project {
    compiler: Compiler,
    registry: SchemaRegistry,
    builders: BuilderRegistry,
    graph: DependencyGraph,
}

impl Project {
    pub fn new(options: Options) -> Self {
        Self::with_compiler(Compiler::new(options))
    }

    /// Use a preconfigured compiler (custom compilers, rules, hooks).
    pub fn with_compiler(compiler: Compiler) -> Self {
        Self {
            compiler,
            ..Default::default()
        }
    }

    /// Load every document listed in a manifest. Paths are relative to `base`.
    pub fn from_manifest(manifest: &Manifest, base: &Path) -> Result<Self> {
        let mut project = Self::new(manifest.project.clone());
        for (id, spec) in &manifest.documents {
            let node = jsonzod_schema::parse_file(base.join(&spec.path))?;
            project.register(id.clone(), node, spec.meta.clone())?;
        }
        Ok(project)
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    pub fn options(&self) -> &Options {
        self.compiler.options()
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Dependency graph of the last compile.
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn register(&mut self, id: impl Into<String>, node: SchemaNode, meta: DocumentMeta) -> Result<()> {
        self.registry.register(id, node, meta)
    }

    pub fn update(&mut self, id: &str, node: SchemaNode, meta: DocumentMeta) -> Result<()> {
        self.registry.update(id, node, meta)?;
        self.builders.invalidate(id);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<()> {
        self.registry.remove(id)?;
        self.builders.invalidate(id);
        Ok(())
    }

    /// Drop every document and cached result.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.builders.clear();
        self.graph.clear();
        self.compiler.clear_caches();
    }

    /// Compile every registered document.
    pub fn compile(&mut self) -> Result<ProjectOutput> {
        self.builders.clear();
        self.graph.clear();
        self.registry.reset_states();
        self.compiler.clear_caches();

        let ids = self.registry.ids();
        for id in &ids {
            self.graph.add_node(id.clone());
        }

        let mut resolver = Resolver {
            compiler: &self.compiler,
            registry: &mut self.registry,
            builders: &mut self.builders,
            graph: &mut self.graph,
            outputs: IndexMap::new(),
        };
        for id in &ids {
            if resolver.state(id) == Some(DocumentState::Registered) {
                resolver.compile_document(id)?;
            }
        }
        let mut outputs = resolver.outputs;

        let documents = self
            .graph
            .topological_order()
            .into_iter()
            .filter_map(|id| outputs.shift_remove(&id))
            .collect();

        Ok(ProjectOutput {
            documents,
            edges: self.graph.edges().to_vec(),
            cycles: self.graph.cycles(),
        })
    }
}

/// Reference resolution state for one project compile.
struct Resolver<'p> {
    compiler: &'p Compiler,
    registry: &'p mut SchemaRegistry,
    builders: &'p mut BuilderRegistry,
    graph: &'p mut DependencyGraph,
    outputs: IndexMap<String, DocumentOutput>,
}

impl Resolver<'_> {
    fn state(&self, id: &str) -> Option<DocumentState> {
        self.registry.get(id).map(SchemaEntry::state)
    }

    fn entry(&self, id: &str) -> Result<SchemaEntry> {
        self.registry
            .get(id)
            .cloned()
            .ok_or_else(|| Box::new(Error::UnknownDocument { id: id.to_string() }))
    }

    fn compile_document(&mut self, id: &str) -> Result<()> {
        let entry = self.entry(id)?;
        debug!(document = id, "compiling document");
        self.registry.set_state(id, DocumentState::Compiling);
        self.outputs
            .insert(id.to_string(), DocumentOutput::new(id, entry.alias(), entry.module()));

        for export in entry.exports() {
            self.compile_export(&entry, &export)?;
        }

        self.registry.set_state(id, DocumentState::Compiled);
        debug!(document = id, "compiled document");
        Ok(())
    }

    fn compile_export(&mut self, entry: &SchemaEntry, export: &Export) -> Result<Builder> {
        let id = entry.id();
        if let Some(builder) = self.builders.get(id, export) {
            return Ok(builder.clone());
        }

        let binding = entry.binding(export);
        let options = self.compiler.options();
        let root_ctx = CompilationContext::for_document(options, id);
        let ctx = match export {
            Export::Default => root_ctx,
            Export::Named(name) => {
                let keyword = match entry.node().as_object().and_then(|o| o.defs.as_ref()) {
                    Some(defs) if defs.contains_key(name) => "$defs",
                    _ => "definitions",
                };
                root_ctx.descend(keyword, name.as_str())
            }
        };
        let target = entry.target(export).ok_or_else(|| {
            let name = export.name().unwrap_or_default();
            Error::unresolvable(format!("{}#/$defs/{}", id, name), ctx.path())
        })?;

        debug!(document = id, export = %binding, "compiling export");
        self.builders.begin(id, export);

        let compiler = self.compiler;
        let builder = {
            let mut session = Session::new(
                compiler,
                std::rc::Rc::clone(entry.node()),
                Some(entry.default_binding()),
                &mut *self,
            );
            match export {
                Export::Default => session.compile_root(&ctx)?,
                Export::Named(_) => session.compile(target, &ctx)?,
            }
        };

        self.builders.finish(id, export, builder.clone());
        let expression = compiler.renderer().render(&builder);
        if let Some(output) = self.outputs.get_mut(id) {
            output.exports.push(ExportOutput {
                name: export.name().map(str::to_string),
                binding,
                expression,
                is_default: *export == Export::Default,
            });
        }
        Ok(builder)
    }

    fn add_import(&mut self, from: &str, target: &SchemaEntry) {
        if let Some(output) = self.outputs.get_mut(from) {
            output.imports.add(DocumentImport {
                id: target.id().to_string(),
                alias: target.alias().to_string(),
                module: target.module(),
            });
        }
    }
}

impl ReferenceResolver for Resolver<'_> {
    fn resolve(&mut self, reference: &str, ctx: &CompilationContext) -> Result<Resolution> {
        let current = ctx.document().unwrap_or_default().to_string();
        let (document, fragment) = split_reference(reference);
        let target_id = if document.is_empty() { current.as_str() } else { document };

        let Some(target) = self.registry.get(target_id).cloned() else {
            return Err(Error::unresolvable(reference, ctx.path()));
        };
        let export = match fragment {
            "" | "/" => Some(Export::Default),
            pointer => definition_name(pointer)
                .filter(|name| target.has_export(name))
                .map(Export::Named),
        };
        let Some(export) = export else {
            if target.id() == current {
                return Ok(Resolution::Inline(fragment.to_string()));
            }
            return Err(Error::unresolvable(reference, ctx.path()));
        };
        let binding = target.binding(&export);

        if target.id() == current {
            if self.builders.get(&current, &export).is_some() {
                return Ok(Resolution::Builder(z::reference(binding)));
            }
            if self.builders.is_compiling(&current, &export) {
                debug!(document = %current, export = %binding, path = %ctx.path(), "breaking cycle with z.lazy");
                return Ok(Resolution::Builder(z::lazy(binding)));
            }
            self.compile_export(&target, &export)?;
            return Ok(Resolution::Builder(z::reference(binding)));
        }

        self.add_import(&current, &target);
        let expr = format!("{}.{}", target.alias(), binding);
        let deferred = target.state() == DocumentState::Compiling;
        if target.state() == DocumentState::Registered {
            self.compile_document(target.id())?;
        }
        self.graph.add_edge(DependencyEdge {
            from: current.clone(),
            to: target.id().to_string(),
            export: export.name().map(str::to_string),
            deferred,
        });

        if deferred {
            debug!(from = %current, to = target.id(), path = %ctx.path(), "breaking cycle with z.lazy");
            Ok(Resolution::Builder(z::lazy(expr)))
        } else {
            Ok(Resolution::Builder(z::reference(expr)))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn node(value: Value) -> SchemaNode {
        jsonzod_schema::from_value(value).unwrap()
    }

    fn project(documents: Vec<(&str, Value)>) -> Project {
        let mut project = Project::new(Options::default());
        for (id, value) in documents {
            project.register(id, node(value), DocumentMeta::default()).unwrap();
        }
        project
    }

    fn expression<'a>(output: &'a ProjectOutput, id: &str, export: Option<&str>) -> &'a str {
        &output.get(id).unwrap().export(export).unwrap().expression
    }

    #[test]
    fn test_two_document_cycle_has_one_lazy_reference() {
        let mut project = project(vec![
            (
                "user",
                json!({ "type": "object", "properties": { "posts": { "type": "array", "items": { "$ref": "post#" } } } }),
            ),
            (
                "post",
                json!({ "type": "object", "properties": { "author": { "$ref": "user#" } }, "required": ["author"] }),
            ),
        ]);
        let output = project.compile().unwrap();

        let lazies: usize = output
            .documents
            .iter()
            .flat_map(|d| d.exports.iter())
            .map(|e| e.expression.matches("z.lazy").count())
            .sum();
        assert_eq!(lazies, 1);
        assert_eq!(output.deferred_edges(), 1);

        assert_eq!(
            expression(&output, "post", None),
            "z.object({\n  author: z.lazy(() => user.user)\n})"
        );
        assert_eq!(
            expression(&output, "user", None),
            "z.object({\n  posts: z.array(post.post).optional()\n})"
        );

        let order: Vec<&str> = output.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(order, vec!["post", "user"]);
        assert_eq!(output.cycles, vec![vec!["post".to_string(), "user".to_string()]]);
    }

    #[test]
    fn test_imports_are_collected() {
        let mut project = project(vec![
            ("address", json!({ "type": "string" })),
            ("order", json!({ "anyOf": [{ "$ref": "user#" }, { "$ref": "address#" }, { "$ref": "user#" }] })),
            ("user", json!({ "type": "object", "properties": { "home": { "$ref": "address#" } } })),
        ]);
        let output = project.compile().unwrap();

        let order = output.get("order").unwrap();
        let aliases: Vec<&str> = order.imports.iter().map(|i| i.alias.as_str()).collect();
        assert_eq!(aliases, vec!["address", "user"]);
        assert_eq!(
            expression(&output, "order", None),
            "z.union([user.user, address.address, user.user])"
        );

        let ids: Vec<&str> = output.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["address", "user", "order"]);
        assert!(output.cycles.is_empty());
    }

    #[test]
    fn test_named_exports_in_completion_order() {
        let mut project = project(vec![(
            "shapes",
            json!({
                "$ref": "#/$defs/Polygon",
                "$defs": {
                    "Polygon": { "type": "array", "items": { "$ref": "#/$defs/Point" } },
                    "Point": { "type": "array", "items": { "type": "number" } }
                }
            }),
        )]);
        let output = project.compile().unwrap();
        let shapes = output.get("shapes").unwrap();

        let bindings: Vec<&str> = shapes.exports.iter().map(|e| e.binding.as_str()).collect();
        assert_eq!(bindings, vec!["Point", "Polygon", "shapes"]);
        assert_eq!(expression(&output, "shapes", Some("Polygon")), "z.array(Point)");
        assert_eq!(expression(&output, "shapes", None), "Polygon");
        assert!(shapes.imports.is_empty());
    }

    #[test]
    fn test_self_referencing_definition_is_lazy() {
        let mut project = project(vec![(
            "tree",
            json!({
                "$defs": {
                    "Node": {
                        "type": "object",
                        "properties": { "children": { "type": "array", "items": { "$ref": "#/$defs/Node" } } }
                    }
                }
            }),
        )]);
        let output = project.compile().unwrap();
        assert_eq!(
            expression(&output, "tree", Some("Node")),
            "z.object({\n  children: z.array(z.lazy(() => Node)).optional()\n})"
        );
    }

    #[test]
    fn test_cross_document_named_export() {
        let mut project = project(vec![
            ("common", json!({ "$defs": { "Id": { "type": "string", "format": "uuid" } } })),
            ("user", json!({ "type": "object", "properties": { "id": { "$ref": "common#/$defs/Id" } }, "required": ["id"] })),
        ]);
        let output = project.compile().unwrap();
        assert_eq!(expression(&output, "common", Some("Id")), "z.uuid()");
        assert_eq!(expression(&output, "user", None), "z.object({\n  id: common.Id\n})");
        assert_eq!(
            output.edges,
            vec![DependencyEdge {
                from: "user".into(),
                to: "common".into(),
                export: Some("Id".into()),
                deferred: false,
            }]
        );
    }

    #[test]
    fn test_unresolvable_references() {
        let mut missing = project(vec![(
            "a",
            json!({ "properties": { "x": { "$ref": "missing#" } } }),
        )]);
        let err = missing.compile().unwrap_err();
        assert_eq!(err.to_string(), "cannot resolve reference 'missing#' at $.properties.x");

        let mut private = project(vec![
            ("a", json!({ "$ref": "b#/properties/x" })),
            ("b", json!({ "properties": { "x": { "type": "string" } } })),
        ]);
        assert!(matches!(
            *private.compile().unwrap_err(),
            Error::UnresolvableReference { .. }
        ));
    }

    #[test]
    fn test_local_pointers_are_inlined() {
        let mut project = project(vec![(
            "a",
            json!({
                "type": "object",
                "properties": {
                    "x": { "type": "string" },
                    "y": { "$ref": "#/properties/x" }
                },
                "required": ["x", "y"]
            }),
        )]);
        let output = project.compile().unwrap();
        assert_eq!(
            expression(&output, "a", None),
            "z.object({\n  x: z.string(),\n  y: z.string()\n})"
        );
    }

    #[test]
    fn test_update_recompiles() {
        let mut project = project(vec![("a", json!({ "type": "string" }))]);
        assert_eq!(expression(&project.compile().unwrap(), "a", None), "z.string()");

        project
            .update("a", node(json!({ "type": "number" })), DocumentMeta::default())
            .unwrap();
        assert_eq!(expression(&project.compile().unwrap(), "a", None), "z.number()");

        project.remove("a").unwrap();
        assert!(project.compile().unwrap().documents.is_empty());
        assert!(matches!(
            *project.remove("a").unwrap_err(),
            Error::UnknownDocument { .. }
        ));
    }

    #[test]
    fn test_declared_export_must_exist() {
        let mut project = Project::default();
        project
            .register("a", node(json!({ "$defs": {} })), DocumentMeta::new().export("Missing"))
            .unwrap();
        assert_eq!(
            project.compile().unwrap_err().to_string(),
            "cannot resolve reference 'a#/$defs/Missing' at $.definitions.Missing"
        );
    }

    #[test]
    fn test_duplicate_registration() {
        let mut project = project(vec![("a", json!(true))]);
        let err = project
            .register("a", node(json!(false)), DocumentMeta::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "document 'a' is already registered");
    }
}
