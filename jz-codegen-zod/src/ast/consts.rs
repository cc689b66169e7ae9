//! Const declaration and type alias builders.

use crate::code_builder::{CodeBuilder, Renderable};

/// Builder for `const` declarations.
#[derive(Debug, Clone)]
pub struct Const {
    name: String,
    value: String,
    exported: bool,
}

impl Const {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            exported: true,
        }
    }

    /// Make this const private (not exported).
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }
}

impl Renderable for Const {
    fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let export = if self.exported { "export " } else { "" };
        builder.lines(&format!("{}const {} = {};", export, self.name, self.value))
    }
}

/// `export type Name = z.infer<typeof validator>;`
#[derive(Debug, Clone)]
pub struct TypeAlias {
    name: String,
    validator: String,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, validator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validator: validator.into(),
        }
    }
}

impl Renderable for TypeAlias {
    fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        builder.line(&format!(
            "export type {} = z.infer<typeof {}>;",
            self.name, self.validator
        ))
    }
}
