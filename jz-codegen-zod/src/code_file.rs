//! Structured module file generation.
//!
//! A [`CodeFile`] keeps imports, body statements and exports apart and
//! renders them in that order with blank lines between sections.

use crate::{
    ast::{Export, Import},
    code_builder::{CodeBuilder, Renderable},
};

/// A generated module organized into imports, body and exports.
///
/// # Example
///
/// ```
/// use jsonzod_codegen_zod::{CodeFile, ast::{Const, Export, Import}};
///
/// let file = CodeFile::new()
///     .import(Import::new("zod").named("z"))
///     .add(Const::new("id", "z.string()").private())
///     .export(Export::new().default("id"))
///     .render();
///
/// assert_eq!(
///     file,
///     "import { z } from \"zod\";\n\nconst id = z.string();\n\nexport default id;\n"
/// );
/// ```
#[derive(Default)]
pub struct CodeFile {
    imports: Vec<Import>,
    body: Vec<String>,
    exports: Vec<Export>,
}

impl CodeFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    pub fn imports(mut self, imports: impl IntoIterator<Item = Import>) -> Self {
        self.imports.extend(imports);
        self
    }

    /// Add a body element. Elements are separated by blank lines.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.build());
        self
    }

    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        self.body.extend(nodes.into_iter().map(|node| node.build()));
        self
    }

    pub fn export(mut self, export: Export) -> Self {
        self.exports.push(export);
        self
    }

    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::new();

        for import in &self.imports {
            builder.emit(import);
        }

        if !self.imports.is_empty() && (!self.body.is_empty() || !self.exports.is_empty()) {
            builder.push_blank();
        }

        for (i, block) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            builder.push_lines(block);
        }

        if !self.body.is_empty() && !self.exports.is_empty() {
            builder.push_blank();
        }

        for export in &self.exports {
            builder.emit(export);
        }

        builder.build()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.body.is_empty() && self.exports.is_empty()
    }
}

/// Pre-formatted text added to a file body as-is.
#[derive(Debug, Clone)]
pub struct RawCode(String);

impl RawCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl Renderable for RawCode {
    fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        builder.lines(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Const, TypeAlias};

    #[test]
    fn test_empty_file() {
        let file = CodeFile::new();
        assert!(file.is_empty());
        assert_eq!(file.render(), "");
    }

    #[test]
    fn test_body_only() {
        let file = CodeFile::new().add(RawCode::new("z.string()"));
        assert_eq!(file.render(), "z.string()\n");
    }

    #[test]
    fn test_sections_separated() {
        let file = CodeFile::new()
            .imports([
                Import::new("zod/v4").namespace("z"),
                Import::new("./user").namespace("user"),
            ])
            .add_all([
                Const::new("Id", "z.string()"),
                Const::new("post", "z.object({\n  author: user.user\n})"),
            ])
            .add(TypeAlias::new("Post", "post"));

        assert_eq!(
            file.render(),
            "import * as z from \"zod/v4\";\n\
             import * as user from \"./user\";\n\
             \n\
             export const Id = z.string();\n\
             \n\
             export const post = z.object({\n  author: user.user\n});\n\
             \n\
             export type Post = z.infer<typeof post>;\n"
        );
    }
}
