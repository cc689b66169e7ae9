//! Compiled export cache.

use std::collections::HashMap;

use jsonzod_ir::Builder;

use super::registry::Export;

#[derive(Debug, Clone)]
enum Slot {
    Compiling,
    Compiled(Builder),
}

/// One builder per `(document, export)`, reused on every reference.
#[derive(Debug, Default)]
pub struct BuilderRegistry {
    slots: HashMap<(String, Export), Slot>,
}

impl BuilderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, document: &str, export: &Export) -> Option<&Builder> {
        match self.slots.get(&key(document, export))? {
            Slot::Compiled(builder) => Some(builder),
            Slot::Compiling => None,
        }
    }

    pub fn is_compiling(&self, document: &str, export: &Export) -> bool {
        matches!(self.slots.get(&key(document, export)), Some(Slot::Compiling))
    }

    /// Mark an export as in progress.
    pub fn begin(&mut self, document: &str, export: &Export) {
        self.slots.insert(key(document, export), Slot::Compiling);
    }

    pub fn finish(&mut self, document: &str, export: &Export, builder: Builder) {
        self.slots.insert(key(document, export), Slot::Compiled(builder));
    }

    /// Drop every entry of one document.
    pub fn invalidate(&mut self, document: &str) {
        self.slots.retain(|(doc, _), _| doc != document);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn key(document: &str, export: &Export) -> (String, Export) {
    (document.to_string(), export.clone())
}
