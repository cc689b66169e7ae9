//! `jz.toml` project manifest.
//!
//! ```toml
//! [project]
//! dialect = "v4"
//!
//! [documents.user]
//! path = "schemas/user.json"
//! default_export = "user"
//! exports = ["Address"]
//! ```

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use indexmap::IndexMap;
use jsonzod_core::Options;
use serde::Deserialize;

use crate::{Error, Result, error::SourceContext};

/// Per-document metadata consumed by the project resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentMeta {
    /// Binding name of the document root. Derived from the id when absent.
    pub default_export: Option<String>,
    /// Definitions exported by name. Empty exports every definition.
    pub exports: Vec<String>,
    /// Module specifier used when other documents import this one.
    pub module: Option<String>,
}

impl DocumentMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_export(mut self, name: impl Into<String>) -> Self {
        self.default_export = Some(name.into());
        self
    }

    pub fn export(mut self, name: impl Into<String>) -> Self {
        self.exports.push(name.into());
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

/// A document entry in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentSpec {
    /// Schema file, relative to the manifest.
    pub path: PathBuf,
    #[serde(flatten)]
    pub meta: DocumentMeta,
}

/// Root of `jz.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub project: Options,
    #[serde(default)]
    pub documents: IndexMap<String, DocumentSpec>,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "jz.toml")
    }
}

impl Manifest {
    /// Parse a jz.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.toml_error(e))?;
    validate_manifest(&manifest, &source_ctx)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    for (id, spec) in &manifest.documents {
        if id.contains('#') {
            return Err(ctx.validation_error(
                format!("document id '{}' must not contain '#'", id),
                id,
            ));
        }
        if let Some(default) = spec
            .meta
            .default_export
            .as_ref()
            .filter(|name| spec.meta.exports.contains(name))
        {
            return Err(ctx.validation_error(
                format!(
                    "document '{}' exports '{}' both as default and as a definition",
                    id, default
                ),
                default,
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use jsonzod_core::{Dialect, WrapMode};

    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest: Manifest = r#"
            [project]
            dialect = "v3"
            wrap = "cjs"

            [documents.user]
            path = "schemas/user.json"
            default_export = "user"
            exports = ["Address"]

            [documents.order]
            path = "schemas/order.json"
            module = "./orders/order"
        "#
        .parse()
        .unwrap();

        assert_eq!(manifest.project.dialect, Dialect::V3);
        assert_eq!(manifest.project.wrap, WrapMode::Cjs);
        assert_eq!(manifest.documents.len(), 2);

        let user = &manifest.documents["user"];
        assert_eq!(user.path, PathBuf::from("schemas/user.json"));
        assert_eq!(user.meta.default_export.as_deref(), Some("user"));
        assert_eq!(user.meta.exports, vec!["Address".to_string()]);

        let order = &manifest.documents["order"];
        assert_eq!(order.meta.module.as_deref(), Some("./orders/order"));
        assert!(order.meta.exports.is_empty());
    }

    #[test]
    fn test_documents_keep_declaration_order() {
        let manifest: Manifest = r#"
            [documents.zeta]
            path = "z.json"

            [documents.alpha]
            path = "a.json"
        "#
        .parse()
        .unwrap();

        let ids: Vec<_> = manifest.documents.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = "[project\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Manifest { span: Some(_), .. }));
    }

    #[test]
    fn test_rejects_hash_in_id() {
        let err = r#"
            [documents."user#v1"]
            path = "user.json"
        "#
        .parse::<Manifest>()
        .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_rejects_default_export_collision() {
        let err = r#"
            [documents.user]
            path = "user.json"
            default_export = "User"
            exports = ["User"]
        "#
        .parse::<Manifest>()
        .unwrap_err();
        assert!(err.to_string().contains("both as default and as a definition"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[documents.a]\npath = \"a.json\"").unwrap();

        let manifest = Manifest::from_file(file.path()).unwrap();
        assert!(manifest.documents.contains_key("a"));
    }

    #[test]
    fn test_from_missing_file() {
        let err = Manifest::from_file("/definitely/not/here/jz.toml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
