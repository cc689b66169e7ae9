//! Schema paths.
//!
//! A path locates a node inside its root document as a sequence of property
//! names and array indices. It is used for error attribution
//! (`$.properties.user.allOf[1]`) and by post-processing pattern matching.

use std::fmt;

/// A single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    /// Textual form used when comparing against pattern literals.
    pub fn as_text(&self) -> String {
        match self {
            PathSegment::Key(k) => k.clone(),
            PathSegment::Index(i) => i.to_string(),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        PathSegment::Key(value.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(value: String) -> Self {
        PathSegment::Key(value)
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        PathSegment::Index(value)
    }
}

/// An owned schema path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SchemaPath(Vec<PathSegment>);

impl SchemaPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Return a new path with `segment` appended.
    pub fn join(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PathSegment>> for SchemaPath {
    fn from(value: Vec<PathSegment>) -> Self {
        Self(value)
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(k) => write!(f, ".{}", k)?,
                PathSegment::Index(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_display() {
        assert_eq!(SchemaPath::root().to_string(), "$");
    }

    #[test]
    fn test_nested_display() {
        let path = SchemaPath::root()
            .join("properties")
            .join("user")
            .join("allOf")
            .join(1usize);
        assert_eq!(path.to_string(), "$.properties.user.allOf[1]");
    }

    #[test]
    fn test_join_does_not_mutate_parent() {
        let parent = SchemaPath::root().join("items");
        let _child = parent.join(0usize);
        assert_eq!(parent.len(), 1);
    }
}
