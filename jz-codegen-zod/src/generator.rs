//! Output files for single documents and projects.

use std::path::{Path, PathBuf};

use eyre::{Context, Result as EyreResult};
use jsonzod_codegen::{Compiler, Project, ProjectOutput, Result, validate_options};
use jsonzod_core::{Options, OutputFile, WrapMode, WriteResult};
use jsonzod_schema::SchemaNode;

use crate::emitter::{emit_document, emit_project_document};

/// File extension of generated modules.
///
/// CommonJS output is plain JavaScript; every other mode may carry type
/// aliases, so it is written as TypeScript.
pub fn extension(options: &Options) -> &'static str {
    match options.wrap {
        WrapMode::Cjs => "js",
        WrapMode::None | WrapMode::Esm | WrapMode::Const => "ts",
    }
}

/// Compiles single documents into module text.
///
/// # Example
///
/// ```
/// use jsonzod_codegen_zod::Generator;
/// use jsonzod_core::Options;
/// use serde_json::json;
///
/// let node = jsonzod_schema::from_value(json!({ "type": "string" })).unwrap();
/// let text = Generator::new(Options::default().name("id")).generate(&node).unwrap();
/// assert_eq!(text, "import * as z from \"zod/v4\";\n\nexport const id = z.string();\n");
/// ```
#[derive(Debug, Default)]
pub struct Generator {
    compiler: Compiler,
}

impl Generator {
    pub fn new(options: Options) -> Self {
        Self::with_compiler(Compiler::new(options))
    }

    /// Use a compiler carrying custom compilers, rules or an override hook.
    pub fn with_compiler(compiler: Compiler) -> Self {
        Self { compiler }
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    pub fn options(&self) -> &Options {
        self.compiler.options()
    }

    /// Complete module text for one document.
    pub fn generate(&self, node: &SchemaNode) -> Result<String> {
        validate_options(self.options())?;
        let expression = self.compiler.compile(node)?;
        emit_document(self.options(), &expression)
    }

    /// Module for one document at `path`, relative to the output directory.
    pub fn generate_file(&self, node: &SchemaNode, path: impl Into<PathBuf>) -> Result<OutputFile> {
        Ok(OutputFile::new(path, self.generate(node)?))
    }
}

/// Compiled project together with its module files.
#[derive(Debug, Clone)]
pub struct ProjectFiles {
    pub output: ProjectOutput,
    /// One module per document, dependencies first.
    pub files: Vec<OutputFile>,
}

/// Compile every document of a project into `<id>.<ext>` modules.
pub fn generate_project(project: &mut Project) -> Result<ProjectFiles> {
    let output = project.compile()?;
    let options = project.options();
    let ext = extension(options);
    let files = output
        .documents
        .iter()
        .map(|document| {
            OutputFile::new(
                format!("{}.{}", document.id, ext),
                emit_project_document(options, document),
            )
        })
        .collect();
    Ok(ProjectFiles { output, files })
}

/// Write files below `base`, reporting what happened to each.
pub fn write_files(files: &[OutputFile], base: &Path) -> EyreResult<Vec<(PathBuf, WriteResult)>> {
    files
        .iter()
        .map(|file| {
            let result = file
                .write(base)
                .wrap_err_with(|| format!("failed to write {}", file.path().display()))?;
            Ok((file.path().to_path_buf(), result))
        })
        .collect()
}
