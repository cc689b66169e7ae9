//! Compiled project output.

use std::collections::BTreeMap;

use super::DependencyEdge;

/// Another document imported as a namespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DocumentImport {
    pub id: String,
    pub alias: String,
    pub module: String,
}

/// Tracks imports and deduplicates them.
///
/// Iteration is sorted by alias for deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportCollector {
    imports: BTreeMap<String, DocumentImport>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, import: DocumentImport) {
        self.imports.entry(import.alias.clone()).or_insert(import);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentImport> {
        self.imports.values()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }
}

/// One compiled export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutput {
    /// Definition name, `None` for the default export.
    pub name: Option<String>,
    /// Binding in the generated module.
    pub binding: String,
    /// Rendered validator expression.
    pub expression: String,
    pub is_default: bool,
}

/// One compiled document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentOutput {
    pub id: String,
    pub alias: String,
    pub module: String,
    pub imports: ImportCollector,
    /// Exports in completion order, so every direct reference points at an
    /// earlier binding.
    pub exports: Vec<ExportOutput>,
}

impl DocumentOutput {
    pub fn new(id: impl Into<String>, alias: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            alias: alias.into(),
            module: module.into(),
            ..Default::default()
        }
    }

    pub fn export(&self, name: Option<&str>) -> Option<&ExportOutput> {
        self.exports.iter().find(|e| e.name.as_deref() == name)
    }

    pub fn default_export(&self) -> Option<&ExportOutput> {
        self.exports.iter().find(|e| e.is_default)
    }
}

/// Result of compiling a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectOutput {
    /// Dependencies first.
    pub documents: Vec<DocumentOutput>,
    pub edges: Vec<DependencyEdge>,
    /// Groups of mutually referencing documents.
    pub cycles: Vec<Vec<String>>,
}

impl ProjectOutput {
    pub fn get(&self, id: &str) -> Option<&DocumentOutput> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Number of references emitted through `z.lazy`.
    pub fn deferred_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.deferred).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(id: &str, alias: &str) -> DocumentImport {
        DocumentImport {
            id: id.into(),
            alias: alias.into(),
            module: format!("./{}", id),
        }
    }

    #[test]
    fn test_collector_dedupes_and_sorts() {
        let mut imports = ImportCollector::new();
        imports.add(import("user", "user"));
        imports.add(import("address", "address"));
        imports.add(import("user", "user"));
        assert_eq!(imports.len(), 2);
        let aliases: Vec<&str> = imports.iter().map(|i| i.alias.as_str()).collect();
        assert_eq!(aliases, vec!["address", "user"]);
    }

    #[test]
    fn test_document_lookup() {
        let mut doc = DocumentOutput::new("order", "order", "./order");
        doc.exports.push(ExportOutput {
            name: None,
            binding: "order".into(),
            expression: "z.any()".into(),
            is_default: true,
        });
        doc.exports.push(ExportOutput {
            name: Some("Line".into()),
            binding: "Line".into(),
            expression: "z.string()".into(),
            is_default: false,
        });
        assert_eq!(doc.default_export().unwrap().binding, "order");
        assert_eq!(doc.export(Some("Line")).unwrap().expression, "z.string()");
        assert!(doc.export(Some("Missing")).is_none());

        let output = ProjectOutput {
            documents: vec![doc],
            ..Default::default()
        };
        assert!(output.get("order").is_some());
        assert_eq!(output.deferred_edges(), 0);
    }
}
