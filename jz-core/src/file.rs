use std::path::{Path, PathBuf};

use eyre::Result;

/// Result of writing an output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was created or its content changed
    Written,
    /// File already had identical content and was left untouched
    Unchanged,
}

/// A generated module destined for disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    path: PathBuf,
    content: String,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Path relative to the output directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the file below `base`.
    ///
    /// Output is deterministic, so a file whose bytes already match is not
    /// rewritten and keeps its modification time.
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = base.join(&self.path);
        if std::fs::read_to_string(&path).is_ok_and(|existing| existing == self.content) {
            return Ok(WriteResult::Unchanged);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &self.content)?;
        Ok(WriteResult::Written)
    }
}
