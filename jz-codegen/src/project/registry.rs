//! Registered documents.

use std::rc::Rc;

use indexmap::IndexMap;
use jsonzod_core::{safe_identifier, to_camel_case};
use jsonzod_schema::{DocumentMeta, SchemaNode};

use crate::{Error, Result};

/// Lifecycle of a registered document within one project compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentState {
    #[default]
    Registered,
    Compiling,
    Compiled,
}

/// An export of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Export {
    /// The document root.
    Default,
    /// A definition under `$defs` or `definitions`.
    Named(String),
}

impl Export {
    pub fn name(&self) -> Option<&str> {
        match self {
            Export::Default => None,
            Export::Named(name) => Some(name),
        }
    }
}

/// A document known to a project.
#[derive(Debug, Clone)]
pub struct SchemaEntry {
    id: String,
    node: Rc<SchemaNode>,
    meta: DocumentMeta,
    alias: String,
    state: DocumentState,
}

impl SchemaEntry {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node(&self) -> &Rc<SchemaNode> {
        &self.node
    }

    pub fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    /// Namespace identifier under which other documents import this one.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// Module specifier used in import statements.
    pub fn module(&self) -> String {
        self.meta
            .module
            .clone()
            .unwrap_or_else(|| format!("./{}", self.id))
    }

    /// Binding name of the default export.
    pub fn default_binding(&self) -> String {
        let name = self
            .meta
            .default_export
            .clone()
            .unwrap_or_else(|| to_camel_case(&self.id));
        safe_identifier(&name)
    }

    /// Named exports in declaration order.
    ///
    /// An empty `exports` list exports every definition.
    pub fn export_names(&self) -> Vec<String> {
        if !self.meta.exports.is_empty() {
            return self.meta.exports.clone();
        }
        self.node
            .as_object()
            .map(|obj| obj.definition_names().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn exports(&self) -> Vec<Export> {
        std::iter::once(Export::Default)
            .chain(self.export_names().into_iter().map(Export::Named))
            .collect()
    }

    pub fn has_export(&self, name: &str) -> bool {
        self.export_names().iter().any(|n| n == name)
    }

    /// Binding name of an export inside the generated module.
    pub fn binding(&self, export: &Export) -> String {
        match export {
            Export::Default => self.default_binding(),
            Export::Named(name) => safe_identifier(name),
        }
    }

    /// Schema node an export compiles from.
    pub fn target(&self, export: &Export) -> Option<&SchemaNode> {
        match export {
            Export::Default => Some(&self.node),
            Export::Named(name) => self.node.as_object()?.definition(name),
        }
    }
}

/// Documents by id, in registration order.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    entries: IndexMap<String, SchemaEntry>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<String>, node: SchemaNode, meta: DocumentMeta) -> Result<()> {
        let id = id.into();
        if self.entries.contains_key(&id) {
            return Err(Box::new(Error::DuplicateDocument { id }));
        }
        let entry = SchemaEntry {
            alias: self.unique_alias(&id),
            id: id.clone(),
            node: Rc::new(node),
            meta,
            state: DocumentState::Registered,
        };
        check_bindings(&entry)?;
        self.entries.insert(id, entry);
        Ok(())
    }

    /// Replace the node and metadata of a registered document.
    pub fn update(&mut self, id: &str, node: SchemaNode, meta: DocumentMeta) -> Result<()> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| unknown(id))?;
        let updated = SchemaEntry {
            node: Rc::new(node),
            meta,
            state: DocumentState::Registered,
            ..entry.clone()
        };
        check_bindings(&updated)?;
        *entry = updated;
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<SchemaEntry> {
        self.entries.shift_remove(id).ok_or_else(|| unknown(id))
    }

    pub fn get(&self, id: &str) -> Option<&SchemaEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn set_state(&mut self, id: &str, state: DocumentState) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.state = state;
        }
    }

    /// Put every document back into the `Registered` state.
    pub fn reset_states(&mut self) {
        for entry in self.entries.values_mut() {
            entry.state = DocumentState::Registered;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn unique_alias(&self, id: &str) -> String {
        let base = safe_identifier(&to_camel_case(id));
        let taken = |alias: &str| self.entries.values().any(|e| e.alias == alias);
        if !taken(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{}_{}", base, n))
            .find(|alias| !taken(alias))
            .unwrap_or(base)
    }
}

fn unknown(id: &str) -> Box<Error> {
    Box::new(Error::UnknownDocument { id: id.to_string() })
}

/// Two exports of one document must not share a binding.
fn check_bindings(entry: &SchemaEntry) -> Result<()> {
    let mut seen: Vec<(String, Export)> = Vec::new();
    for export in entry.exports() {
        let binding = entry.binding(&export);
        if let Some((_, other)) = seen.iter().find(|(b, _)| *b == binding) {
            return Err(Box::new(Error::ConfigConflict {
                message: format!(
                    "exports {:?} and {:?} of document '{}' both bind `{}`",
                    other, export, entry.id, binding
                ),
                help: Some("set `default_export` or rename the definition".to_string()),
            }));
        }
        seen.push((binding, export));
    }
    Ok(())
}
