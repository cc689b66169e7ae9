//! JSON Schema document model and project manifest parsing.
//!
//! Schema documents are deserialized into [`SchemaNode`] trees that keep only
//! the keywords the compiler understands. Parse failures carry the source text
//! so they can be rendered as [`miette`] diagnostics.

mod error;
mod manifest;
mod node;

use std::path::Path;

pub use error::{Error, Result, SourceContext};
pub use manifest::{DocumentMeta, DocumentSpec, Manifest, parse_manifest};
pub use node::{ErrorMessages, ExclusiveBound, Items, SchemaNode, SchemaObject, TypeSet};
use serde_json::Value;

/// Parse a schema document from a string.
pub fn parse_str(content: &str) -> Result<SchemaNode> {
    parse_str_with_filename(content, "schema.json")
}

/// Parse a schema document, naming the source in diagnostics.
pub fn parse_str_with_filename(content: &str, filename: &str) -> Result<SchemaNode> {
    let source_ctx = SourceContext::new(content, filename);
    serde_json::from_str(content).map_err(|e| source_ctx.json_error(e))
}

/// Read and parse a schema document from disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<SchemaNode> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    parse_str_with_filename(&content, &path.display().to_string())
}

/// Convert an in-memory JSON value into a schema node.
pub fn from_value(value: Value) -> Result<SchemaNode> {
    serde_json::from_value(value).map_err(|source| Box::new(Error::Invalid { source }))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_str() {
        let node = parse_str(r#"{ "type": "string", "minLength": 1 }"#).unwrap();
        let obj = node.as_object().unwrap();
        assert_eq!(obj.single_type(), Some("string"));
        assert_eq!(obj.min_length, Some(1));
    }

    #[test]
    fn test_parse_error_carries_span() {
        let err = parse_str_with_filename("{\n  \"type\": \n}", "bad.json").unwrap_err();
        match err.as_ref() {
            Error::Parse { span, src, .. } => {
                assert!(span.is_some());
                assert_eq!(src.name(), "bad.json");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_keyword_shape() {
        let err = from_value(json!({ "minLength": "three" })).unwrap_err();
        assert!(matches!(*err, Error::Invalid { .. }));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "true").unwrap();
        assert_eq!(parse_file(file.path()).unwrap(), SchemaNode::Bool(true));
    }
}
