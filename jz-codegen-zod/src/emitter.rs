//! Module text around compiled validator expressions.

use jsonzod_codegen::{DocumentOutput, Result, validate_options};
use jsonzod_core::{Dialect, Options, WrapMode, safe_identifier};

use crate::{
    ast::{Const, Export, Import, ModuleSyntax, TypeAlias},
    code_file::{CodeFile, RawCode},
};

/// Module syntax selected by the wrap mode.
pub fn module_syntax(wrap: WrapMode) -> ModuleSyntax {
    match wrap {
        WrapMode::Cjs => ModuleSyntax::CommonJs,
        WrapMode::None | WrapMode::Esm | WrapMode::Const => ModuleSyntax::Esm,
    }
}

/// Import of the validation library itself.
///
/// Zod 3 exposes `z` as a named export, Zod 4 is imported as a namespace.
pub fn host_import(dialect: Dialect, syntax: ModuleSyntax) -> Import {
    let import = Import::new(dialect.module()).syntax(syntax);
    match dialect {
        Dialect::V3 => import.named("z"),
        Dialect::V4 => import.namespace("z"),
    }
}

/// Wrap the expression of a standalone document according to `options`.
pub fn emit_document(options: &Options, expression: &str) -> Result<String> {
    validate_options(options)?;

    let syntax = module_syntax(options.wrap);
    let mut file = CodeFile::new();
    if options.with_import {
        file = file.import(host_import(options.dialect, syntax));
    }

    let name = options.name.as_deref().map(safe_identifier);
    let file = match (options.wrap, name) {
        (WrapMode::None | WrapMode::Const, None) => file.add(RawCode::new(expression)),
        (WrapMode::None | WrapMode::Const, Some(name)) => file.add(Const::new(name, expression).private()),
        (WrapMode::Cjs, None) => file.export(Export::new().default(expression).commonjs()),
        (WrapMode::Cjs, Some(name)) => file
            .add(Const::new(name.as_str(), expression).private())
            .export(Export::new().named(name).commonjs()),
        (WrapMode::Esm, None) => file.export(Export::new().default(expression)),
        (WrapMode::Esm, Some(name)) => {
            let file = file.add(Const::new(name.as_str(), expression));
            match &options.type_alias {
                Some(alias) => file.add(TypeAlias::new(safe_identifier(alias), name)),
                None => file,
            }
        }
    };

    Ok(file.render())
}

/// Module text of one project document.
///
/// Projects always export every binding, so only `cjs` changes the output;
/// the other wrap modes produce ES modules.
pub fn emit_project_document(options: &Options, document: &DocumentOutput) -> String {
    let syntax = module_syntax(options.wrap);
    let mut file = CodeFile::new();
    if options.with_import {
        file = file.import(host_import(options.dialect, syntax));
    }

    let file = file
        .imports(document.imports.iter().map(|import| {
            Import::new(import.module.as_str())
                .namespace(import.alias.as_str())
                .syntax(syntax)
        }))
        .add_all(document.exports.iter().map(|export| {
            Const::new(export.binding.as_str(), export.expression.as_str())
                .exported(syntax == ModuleSyntax::Esm)
        }));

    let export = match syntax {
        ModuleSyntax::Esm => document
            .default_export()
            .map(|export| Export::new().default(export.binding.as_str())),
        ModuleSyntax::CommonJs => Some(
            document
                .exports
                .iter()
                .fold(Export::new().commonjs(), |e, export| e.named(export.binding.as_str())),
        ),
    };

    match export {
        Some(export) => file.export(export).render(),
        None => file.render(),
    }
}

#[cfg(test)]
mod tests {
    use jsonzod_codegen::{DocumentImport, ExportOutput};

    use super::*;

    #[test]
    fn test_host_import() {
        use crate::code_builder::Renderable;

        assert_eq!(
            host_import(Dialect::V3, ModuleSyntax::Esm).build(),
            "import { z } from \"zod\";\n"
        );
        assert_eq!(
            host_import(Dialect::V4, ModuleSyntax::Esm).build(),
            "import * as z from \"zod/v4\";\n"
        );
        assert_eq!(
            host_import(Dialect::V3, ModuleSyntax::CommonJs).build(),
            "const { z } = require(\"zod\");\n"
        );
        assert_eq!(
            host_import(Dialect::V4, ModuleSyntax::CommonJs).build(),
            "const z = require(\"zod/v4\");\n"
        );
    }

    #[test]
    fn test_bare_expression() {
        let options = Options::default().wrap(WrapMode::None).without_import();
        assert_eq!(emit_document(&options, "z.string()").unwrap(), "z.string()\n");

        let named = options.clone().name("id");
        assert_eq!(emit_document(&named, "z.string()").unwrap(), "const id = z.string();\n");
    }

    #[test]
    fn test_esm_default_and_named() {
        let options = Options::default();
        assert_eq!(
            emit_document(&options, "z.string()").unwrap(),
            "import * as z from \"zod/v4\";\n\nexport default z.string();\n"
        );

        let named = Options::default().dialect(Dialect::V3).name("user-id").type_alias("UserId");
        assert_eq!(
            emit_document(&named, "z.string()").unwrap(),
            "import { z } from \"zod\";\n\n\
             export const user_id = z.string();\n\n\
             export type UserId = z.infer<typeof user_id>;\n"
        );
    }

    #[test]
    fn test_commonjs() {
        let options = Options::default().wrap(WrapMode::Cjs);
        assert_eq!(
            emit_document(&options, "z.string()").unwrap(),
            "const z = require(\"zod/v4\");\n\nmodule.exports = z.string();\n"
        );

        let named = options.name("id").without_import();
        assert_eq!(
            emit_document(&named, "z.string()").unwrap(),
            "const id = z.string();\n\nObject.assign(module.exports, { id });\n"
        );
    }

    #[test]
    fn test_invalid_combinations() {
        let options = Options::default().type_alias("User");
        assert!(emit_document(&options, "z.any()").is_err());

        let options = Options::default().wrap(WrapMode::Const);
        assert!(emit_document(&options, "z.any()").is_err());
    }

    fn document() -> DocumentOutput {
        let mut document = DocumentOutput::new("post", "post", "./post");
        document.imports.add(DocumentImport {
            id: "user".into(),
            alias: "user".into(),
            module: "./user".into(),
        });
        document.exports.push(ExportOutput {
            name: Some("Tag".into()),
            binding: "Tag".into(),
            expression: "z.string()".into(),
            is_default: false,
        });
        document.exports.push(ExportOutput {
            name: None,
            binding: "post".into(),
            expression: "z.object({\n  author: user.user,\n  tag: Tag\n})".into(),
            is_default: true,
        });
        document
    }

    #[test]
    fn test_project_document_esm() {
        let text = emit_project_document(&Options::default(), &document());
        assert_eq!(
            text,
            "import * as z from \"zod/v4\";\n\
             import * as user from \"./user\";\n\n\
             export const Tag = z.string();\n\n\
             export const post = z.object({\n  author: user.user,\n  tag: Tag\n});\n\n\
             export default post;\n"
        );
    }

    #[test]
    fn test_project_document_commonjs() {
        let options = Options::default().dialect(Dialect::V3).wrap(WrapMode::Cjs);
        let text = emit_project_document(&options, &document());
        assert_eq!(
            text,
            "const { z } = require(\"zod\");\n\
             const user = require(\"./user\");\n\n\
             const Tag = z.string();\n\n\
             const post = z.object({\n  author: user.user,\n  tag: Tag\n});\n\n\
             Object.assign(module.exports, { Tag, post });\n"
        );
    }
}
