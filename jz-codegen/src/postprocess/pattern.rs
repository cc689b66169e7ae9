//! Path pattern language.
//!
//! | Pattern            | Matches                                   |
//! |--------------------|-------------------------------------------|
//! | `$`                | the root only                             |
//! | `$.properties.*`   | exactly one segment after `properties`    |
//! | `$.properties.**`  | any depth below `properties`              |
//! | `$..email`         | any path whose last segment is `email`    |
//!
//! Array indices compare by their decimal text.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use jsonzod_core::PathSegment;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `*`
    Single,
    /// `**`
    Deep,
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let body = pattern.strip_prefix('$').unwrap_or(pattern).replace("..", ".**.");
        let segments = body
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| match s {
                "*" => Segment::Single,
                "**" => Segment::Deep,
                literal => Segment::Literal(literal.to_string()),
            })
            .collect();
        Self { segments }
    }

    pub fn matches(&self, path: &[PathSegment]) -> bool {
        match_from(&self.segments, path)
    }
}

fn match_from(pattern: &[Segment], path: &[PathSegment]) -> bool {
    let Some((head, rest)) = pattern.split_first() else {
        return path.is_empty();
    };
    match head {
        Segment::Deep => (0..=path.len()).any(|split| match_from(rest, &path[split..])),
        Segment::Single => !path.is_empty() && match_from(rest, &path[1..]),
        Segment::Literal(literal) => match path.split_first() {
            Some((segment, tail)) => segment_eq(segment, literal) && match_from(rest, tail),
            None => false,
        },
    }
}

fn segment_eq(segment: &PathSegment, literal: &str) -> bool {
    match segment {
        PathSegment::Key(key) => key == literal,
        PathSegment::Index(i) => i.to_string() == literal,
    }
}

/// Compiled patterns keyed by their source text.
///
/// Owned by one compiler or project; call [`clear`](Self::clear) between
/// unrelated runs.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: RefCell<HashMap<String, Rc<PathPattern>>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the compiled form of `pattern`, compiling it on first use.
    pub fn get(&self, pattern: &str) -> Rc<PathPattern> {
        if let Some(compiled) = self.patterns.borrow().get(pattern) {
            return Rc::clone(compiled);
        }
        let compiled = Rc::new(PathPattern::parse(pattern));
        self.patterns
            .borrow_mut()
            .insert(pattern.to_string(), Rc::clone(&compiled));
        compiled
    }

    pub fn matches(&self, pattern: &str, path: &[PathSegment]) -> bool {
        self.get(pattern).matches(path)
    }

    pub fn clear(&self) {
        self.patterns.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.patterns.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.borrow().is_empty()
    }
}
