//! Builder nodes.

use serde_json::{Number, Value};

/// One validator expression: a base kind plus ordered modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Builder {
    pub kind: BuilderKind,
    pub modifiers: Vec<Modifier>,
}

/// The base expression of a [`Builder`].
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderKind {
    Any,
    Unknown,
    Never,
    Boolean,
    Null,
    String {
        format: Option<StringFormat>,
        format_message: Option<String>,
        checks: Vec<Constraint>,
    },
    Number {
        integer: bool,
        integer_message: Option<String>,
        checks: Vec<Constraint>,
    },
    /// A primitive JSON literal.
    Literal(Value),
    /// String enumeration, two or more members.
    Enum(Vec<String>),
    Object(ObjectType),
    Array {
        items: Box<Builder>,
        checks: Vec<Constraint>,
    },
    Tuple {
        items: Vec<Builder>,
        rest: Option<Box<Builder>>,
    },
    /// String-keyed map with the given value schema.
    Record(Box<Builder>),
    Union(Vec<Builder>),
    /// Exactly one member must match.
    Xor(Vec<Builder>),
    Intersection(Box<Builder>, Box<Builder>),
    Reference(RefTarget),
    /// Pre-rendered expression text.
    Custom(String),
}

/// Known string formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringFormat {
    Email,
    Uuid,
    Url,
    DateTime,
    Date,
    Time,
    Ipv4,
    Ipv6,
    Duration,
    Base64,
}

impl StringFormat {
    /// Map a `format` keyword value. Unknown formats yield `None`.
    pub fn from_keyword(format: &str) -> Option<Self> {
        Some(match format {
            "email" => StringFormat::Email,
            "uuid" => StringFormat::Uuid,
            "uri" | "url" => StringFormat::Url,
            "date-time" => StringFormat::DateTime,
            "date" => StringFormat::Date,
            "time" => StringFormat::Time,
            "ipv4" => StringFormat::Ipv4,
            "ipv6" => StringFormat::Ipv6,
            "duration" => StringFormat::Duration,
            _ => return None,
        })
    }
}

/// A value check on strings, numbers or arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// `.min(n)` on string length or array size.
    Min(u64),
    /// `.max(n)` on string length or array size.
    Max(u64),
    Regex(String),
    MultipleOf(Number),
    Gte(Number),
    Gt(Number),
    Lte(Number),
    Lt(Number),
}

/// A check with its optional custom message.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub check: Check,
    pub message: Option<String>,
}

impl Constraint {
    pub fn new(check: Check) -> Self {
        Self {
            check,
            message: None,
        }
    }

    pub fn with_message(mut self, message: Option<impl Into<String>>) -> Self {
        self.message = message.map(Into::into);
        self
    }
}

impl From<Check> for Constraint {
    fn from(check: Check) -> Self {
        Constraint::new(check)
    }
}

/// Handling of properties not listed in an object shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Additional {
    /// Unknown keys are stripped (the library default).
    #[default]
    Strip,
    Strict,
    Passthrough,
    Catchall(Box<Builder>),
}

/// One member of an object shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Builder,
    /// Emitted as a JSDoc comment when enabled.
    pub description: Option<String>,
}

impl Property {
    pub fn new(key: impl Into<String>, value: Builder) -> Self {
        Self {
            key: key.into(),
            value,
            description: None,
        }
    }

    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = description.map(Into::into);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectType {
    pub properties: Vec<Property>,
    pub additional: Additional,
}

/// Target of a reference expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefTarget {
    /// Expression naming the referenced validator, e.g. `user.Address`.
    pub expr: String,
    /// Rendered behind `z.lazy` because the target is not yet initialized.
    pub deferred: bool,
}

/// A modifier applied after the base expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    Optional,
    Nullable,
    Default(Value),
    Describe(String),
    Brand(String),
    Readonly,
    Refine {
        predicate: String,
        message: Option<String>,
    },
    SuperRefine(String),
    Pipe(Box<Builder>),
}

impl Modifier {
    /// Refinements keep their insertion order and render before the rest.
    pub fn is_refinement(&self) -> bool {
        matches!(
            self,
            Modifier::Refine { .. } | Modifier::SuperRefine(_) | Modifier::Pipe(_)
        )
    }
}

impl From<BuilderKind> for Builder {
    fn from(kind: BuilderKind) -> Self {
        Builder::new(kind)
    }
}

impl Builder {
    pub fn new(kind: BuilderKind) -> Self {
        Self {
            kind,
            modifiers: Vec::new(),
        }
    }

    fn push_unique(mut self, modifier: Modifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    fn replace(mut self, modifier: Modifier, same: fn(&Modifier) -> bool) -> Self {
        self.modifiers.retain(|m| !same(m));
        self.modifiers.push(modifier);
        self
    }

    pub fn optional(self) -> Self {
        self.push_unique(Modifier::Optional)
    }

    /// Drop the optional marker.
    pub fn required(mut self) -> Self {
        self.modifiers.retain(|m| *m != Modifier::Optional);
        self
    }

    pub fn nullable(self) -> Self {
        self.push_unique(Modifier::Nullable)
    }

    pub fn readonly(self) -> Self {
        self.push_unique(Modifier::Readonly)
    }

    pub fn default_value(self, value: Value) -> Self {
        self.replace(Modifier::Default(value), |m| {
            matches!(m, Modifier::Default(_))
        })
    }

    pub fn describe(self, text: impl Into<String>) -> Self {
        self.replace(Modifier::Describe(text.into()), |m| {
            matches!(m, Modifier::Describe(_))
        })
    }

    pub fn brand(self, name: impl Into<String>) -> Self {
        self.replace(Modifier::Brand(name.into()), |m| {
            matches!(m, Modifier::Brand(_))
        })
    }

    pub fn refine(mut self, predicate: impl Into<String>, message: Option<String>) -> Self {
        self.modifiers.push(Modifier::Refine {
            predicate: predicate.into(),
            message,
        });
        self
    }

    pub fn super_refine(mut self, body: impl Into<String>) -> Self {
        self.modifiers.push(Modifier::SuperRefine(body.into()));
        self
    }

    pub fn pipe(mut self, target: Builder) -> Self {
        self.modifiers.push(Modifier::Pipe(Box::new(target)));
        self
    }

    pub fn is_optional(&self) -> bool {
        self.modifiers.contains(&Modifier::Optional)
    }

    pub fn has_default(&self) -> bool {
        self.modifiers
            .iter()
            .any(|m| matches!(m, Modifier::Default(_)))
    }

    pub fn is_never(&self) -> bool {
        matches!(self.kind, BuilderKind::Never) && self.modifiers.is_empty()
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match &self.kind {
            BuilderKind::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectType> {
        match &mut self.kind {
            BuilderKind::Object(obj) => Some(obj),
            _ => None,
        }
    }
}
