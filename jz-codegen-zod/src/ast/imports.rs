//! Import statement builder.

use super::ModuleSyntax;
use crate::code_builder::{CodeBuilder, Renderable};

/// Builder for import statements in either module syntax.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    namespace: Option<String>,
    named: Vec<String>,
    syntax: ModuleSyntax,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            namespace: None,
            named: Vec::new(),
            syntax: ModuleSyntax::Esm,
        }
    }

    /// Bind the whole module under one name.
    pub fn namespace(mut self, name: impl Into<String>) -> Self {
        self.namespace = Some(name.into());
        self
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    pub fn syntax(mut self, syntax: ModuleSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Emit as a `require` call.
    pub fn commonjs(self) -> Self {
        self.syntax(ModuleSyntax::CommonJs)
    }
}

impl Renderable for Import {
    fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let binding = match (&self.namespace, self.named.is_empty()) {
            (Some(namespace), _) => Some(namespace.clone()),
            (None, false) => Some(format!("{{ {} }}", self.named.join(", "))),
            (None, true) => None,
        };

        let statement = match (self.syntax, binding) {
            (ModuleSyntax::Esm, Some(binding)) if self.namespace.is_some() => {
                format!("import * as {} from \"{}\";", binding, self.from)
            }
            (ModuleSyntax::Esm, Some(binding)) => format!("import {} from \"{}\";", binding, self.from),
            (ModuleSyntax::Esm, None) => format!("import \"{}\";", self.from),
            (ModuleSyntax::CommonJs, Some(binding)) => {
                format!("const {} = require(\"{}\");", binding, self.from)
            }
            (ModuleSyntax::CommonJs, None) => format!("require(\"{}\");", self.from),
        };

        builder.line(&statement)
    }
}
