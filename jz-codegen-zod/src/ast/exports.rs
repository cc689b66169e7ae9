//! Export statement builder.

use super::ModuleSyntax;
use crate::code_builder::{CodeBuilder, Renderable};

/// Builder for export statements in either module syntax.
///
/// CommonJS named exports are assigned onto the existing `module.exports`
/// object, so a module that is still loading during a circular `require`
/// exposes them to `z.lazy` callbacks once it finishes.
#[derive(Debug, Clone)]
pub struct Export {
    default: Option<String>,
    named: Vec<String>,
    syntax: ModuleSyntax,
}

impl Export {
    pub fn new() -> Self {
        Self {
            default: None,
            named: Vec::new(),
            syntax: ModuleSyntax::Esm,
        }
    }

    /// Export an expression as the module value.
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Export a binding by name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    pub fn syntax(mut self, syntax: ModuleSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn commonjs(self) -> Self {
        self.syntax(ModuleSyntax::CommonJs)
    }
}

impl Renderable for Export {
    fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let mut statements = Vec::new();
        match self.syntax {
            ModuleSyntax::Esm => {
                if !self.named.is_empty() {
                    statements.push(format!("export {{ {} }};", self.named.join(", ")));
                }
                if let Some(value) = &self.default {
                    statements.push(format!("export default {};", value));
                }
            }
            ModuleSyntax::CommonJs => {
                if let Some(value) = &self.default {
                    statements.push(format!("module.exports = {};", value));
                }
                if !self.named.is_empty() {
                    statements.push(format!(
                        "Object.assign(module.exports, {{ {} }});",
                        self.named.join(", ")
                    ));
                }
            }
        }

        statements.iter().fold(builder, |b, s| b.lines(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_export() {
        assert_eq!(Export::new().default("user").build(), "export default user;\n");
    }

    #[test]
    fn test_named_export() {
        let e = Export::new().named("Point").named("shapes").build();
        assert_eq!(e, "export { Point, shapes };\n");
    }

    #[test]
    fn test_commonjs() {
        let value = Export::new().default("z.string()").commonjs().build();
        assert_eq!(value, "module.exports = z.string();\n");

        let named = Export::new().named("Point").named("shapes").commonjs().build();
        assert_eq!(named, "Object.assign(module.exports, { Point, shapes });\n");
    }

    #[test]
    fn test_multiline_default() {
        let e = Export::new().default("z.object({\n  a: z.any()\n})").build();
        assert_eq!(e, "export default z.object({\n  a: z.any()\n});\n");
    }

    #[test]
    fn test_empty_export_renders_nothing() {
        assert_eq!(Export::new().build(), "");
    }
}
