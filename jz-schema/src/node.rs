//! Schema node model.
//!
//! A [`SchemaNode`] is the immutable, typed view of one JSON Schema value.
//! Only the keywords the compiler understands are kept; everything else in
//! the source document is ignored during deserialization.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// One node of a schema document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaNode {
    /// `true` accepts everything, `false` accepts nothing.
    Bool(bool),
    Object(Box<SchemaObject>),
}

impl Default for SchemaNode {
    fn default() -> Self {
        SchemaNode::Object(Box::default())
    }
}

impl From<SchemaObject> for SchemaNode {
    fn from(value: SchemaObject) -> Self {
        SchemaNode::Object(Box::new(value))
    }
}

impl From<bool> for SchemaNode {
    fn from(value: bool) -> Self {
        SchemaNode::Bool(value)
    }
}

impl SchemaNode {
    /// The empty schema `{}`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `{ "not": {} }`, a schema no value satisfies.
    pub fn nothing() -> Self {
        SchemaObject {
            not: Some(Box::new(SchemaNode::empty())),
            ..Default::default()
        }
        .into()
    }

    pub fn as_object(&self) -> Option<&SchemaObject> {
        match self {
            SchemaNode::Object(obj) => Some(obj),
            SchemaNode::Bool(_) => None,
        }
    }

    /// Resolve a JSON pointer (`/properties/user/items`) relative to this node.
    ///
    /// Navigation follows schema keywords only: `properties`, `$defs`,
    /// `definitions`, `items`, `prefixItems`, `allOf`, `anyOf`, `oneOf`,
    /// `not`, `if`, `then`, `else` and `additionalProperties`.
    pub fn pointer(&self, pointer: &str) -> Option<&SchemaNode> {
        let pointer = pointer.strip_prefix('#').unwrap_or(pointer);
        if pointer.is_empty() || pointer == "/" {
            return Some(self);
        }
        let mut tokens = pointer
            .strip_prefix('/')?
            .split('/')
            .map(|t| t.replace("~1", "/").replace("~0", "~"));

        let mut current = self;
        while let Some(keyword) = tokens.next() {
            let obj = current.as_object()?;
            current = match keyword.as_str() {
                "properties" => obj.properties.as_ref()?.get(&tokens.next()?)?,
                "$defs" => obj.defs.as_ref()?.get(&tokens.next()?)?,
                "definitions" => obj.definitions.as_ref()?.get(&tokens.next()?)?,
                "items" => match obj.items.as_ref()? {
                    Items::Single(node) => &**node,
                    Items::Tuple(nodes) => nodes.get(tokens.next()?.parse::<usize>().ok()?)?,
                },
                "prefixItems" => index(obj.prefix_items.as_ref()?, tokens.next()?)?,
                "allOf" => index(obj.all_of.as_ref()?, tokens.next()?)?,
                "anyOf" => index(obj.any_of.as_ref()?, tokens.next()?)?,
                "oneOf" => index(obj.one_of.as_ref()?, tokens.next()?)?,
                "not" => obj.not.as_deref()?,
                "if" => obj.if_schema.as_deref()?,
                "then" => obj.then_schema.as_deref()?,
                "else" => obj.else_schema.as_deref()?,
                "additionalProperties" => obj.additional_properties.as_deref()?,
                _ => return None,
            };
        }
        Some(current)
    }
}

fn index(nodes: &[SchemaNode], token: String) -> Option<&SchemaNode> {
    nodes.get(token.parse::<usize>().ok()?)
}

/// The `type` keyword.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(String),
    Multiple(Vec<String>),
}

/// The `items` keyword: one schema for every element, or one per position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Items {
    Single(Box<SchemaNode>),
    Tuple(Vec<SchemaNode>),
}

/// `exclusiveMinimum`/`exclusiveMaximum`: a bound (2019+) or a draft-4 flag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExclusiveBound {
    Flag(bool),
    Value(Number),
}

/// The `errorMessage` side channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessages {
    /// One message for every constraint.
    All(String),
    /// Messages keyed by the constraint keyword.
    ByKeyword(IndexMap<String, String>),
}

impl ErrorMessages {
    pub fn get(&self, keyword: &str) -> Option<&str> {
        match self {
            ErrorMessages::All(message) => Some(message),
            ErrorMessages::ByKeyword(map) => map.get(keyword).map(String::as_str),
        }
    }
}

/// Keywords of an object-form schema.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaObject {
    #[serde(rename = "type")]
    pub ty: Option<TypeSet>,

    // Objects
    pub properties: Option<IndexMap<String, SchemaNode>>,
    #[serde(default)]
    pub required: Vec<String>,
    pub additional_properties: Option<Box<SchemaNode>>,

    // Arrays
    pub items: Option<Items>,
    pub prefix_items: Option<Vec<SchemaNode>>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,

    // Literals
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(rename = "const", default, deserialize_with = "present")]
    pub const_value: Option<Value>,

    // Composition
    pub all_of: Option<Vec<SchemaNode>>,
    pub any_of: Option<Vec<SchemaNode>>,
    pub one_of: Option<Vec<SchemaNode>>,
    pub not: Option<Box<SchemaNode>>,
    #[serde(rename = "if")]
    pub if_schema: Option<Box<SchemaNode>>,
    #[serde(rename = "then")]
    pub then_schema: Option<Box<SchemaNode>>,
    #[serde(rename = "else")]
    pub else_schema: Option<Box<SchemaNode>>,

    // References
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    #[serde(rename = "$defs")]
    pub defs: Option<IndexMap<String, SchemaNode>>,
    pub definitions: Option<IndexMap<String, SchemaNode>>,

    // Strings
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub content_encoding: Option<String>,

    // Numbers
    pub multiple_of: Option<Number>,
    pub minimum: Option<Number>,
    pub maximum: Option<Number>,
    pub exclusive_minimum: Option<ExclusiveBound>,
    pub exclusive_maximum: Option<ExclusiveBound>,

    // Annotations
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub default: Option<Value>,
    pub read_only: Option<bool>,
    pub nullable: Option<bool>,
    pub error_message: Option<ErrorMessages>,
}

/// Distinguish an explicit `null` from an absent keyword.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SchemaObject {
    /// All names listed in `type`, in declaration order.
    pub fn types(&self) -> Vec<&str> {
        match &self.ty {
            None => Vec::new(),
            Some(TypeSet::Single(t)) => vec![t.as_str()],
            Some(TypeSet::Multiple(ts)) => ts.iter().map(String::as_str).collect(),
        }
    }

    /// The `type` keyword when it names exactly one type.
    pub fn single_type(&self) -> Option<&str> {
        match &self.ty {
            Some(TypeSet::Single(t)) => Some(t),
            Some(TypeSet::Multiple(ts)) if ts.len() == 1 => Some(&ts[0]),
            _ => None,
        }
    }

    /// A copy of this schema with `type` replaced by a single type.
    pub fn with_type(&self, ty: &str) -> SchemaObject {
        SchemaObject {
            ty: Some(TypeSet::Single(ty.to_string())),
            ..self.clone()
        }
    }

    /// Custom message configured for a constraint keyword.
    pub fn error_message(&self, keyword: &str) -> Option<&str> {
        self.error_message.as_ref().and_then(|m| m.get(keyword))
    }

    /// Look up a named definition in `$defs`, falling back to `definitions`.
    pub fn definition(&self, name: &str) -> Option<&SchemaNode> {
        self.defs
            .as_ref()
            .and_then(|d| d.get(name))
            .or_else(|| self.definitions.as_ref().and_then(|d| d.get(name)))
    }

    /// Names of every definition, `$defs` first, without duplicates.
    pub fn definition_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for map in [&self.defs, &self.definitions].into_iter().flatten() {
            for name in map.keys() {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn has_composition(&self) -> bool {
        self.all_of.is_some() || self.any_of.is_some() || self.one_of.is_some()
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn node(value: Value) -> SchemaNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_boolean_schemas() {
        assert_eq!(node(json!(true)), SchemaNode::Bool(true));
        assert_eq!(node(json!(false)), SchemaNode::Bool(false));
    }

    #[test]
    fn test_unknown_keywords_ignored() {
        let schema = node(json!({ "type": "string", "x-internal": { "a": 1 } }));
        let obj = schema.as_object().unwrap();
        assert_eq!(obj.single_type(), Some("string"));
    }

    #[test]
    fn test_const_null_is_present() {
        let schema = node(json!({ "const": null }));
        assert_eq!(schema.as_object().unwrap().const_value, Some(Value::Null));

        let schema = node(json!({}));
        assert_eq!(schema.as_object().unwrap().const_value, None);
    }

    #[test]
    fn test_type_set() {
        let schema = node(json!({ "type": ["string", "null"] }));
        let obj = schema.as_object().unwrap();
        assert_eq!(obj.types(), vec!["string", "null"]);
        assert_eq!(obj.single_type(), None);
        assert_eq!(obj.with_type("null").single_type(), Some("null"));
    }

    #[test]
    fn test_items_forms() {
        let single = node(json!({ "items": { "type": "string" } }));
        assert!(matches!(
            single.as_object().unwrap().items,
            Some(Items::Single(_))
        ));

        let tuple = node(json!({ "items": [{ "type": "string" }, true] }));
        assert!(matches!(
            tuple.as_object().unwrap().items,
            Some(Items::Tuple(ref t)) if t.len() == 2
        ));
    }

    #[test]
    fn test_exclusive_bounds() {
        let schema = node(json!({ "exclusiveMinimum": true, "exclusiveMaximum": 10 }));
        let obj = schema.as_object().unwrap();
        assert_eq!(obj.exclusive_minimum, Some(ExclusiveBound::Flag(true)));
        assert!(matches!(obj.exclusive_maximum, Some(ExclusiveBound::Value(_))));
    }

    #[test]
    fn test_error_messages() {
        let schema = node(json!({ "errorMessage": { "minLength": "too short" } }));
        let obj = schema.as_object().unwrap();
        assert_eq!(obj.error_message("minLength"), Some("too short"));
        assert_eq!(obj.error_message("maxLength"), None);

        let schema = node(json!({ "errorMessage": "bad value" }));
        assert_eq!(
            schema.as_object().unwrap().error_message("pattern"),
            Some("bad value")
        );
    }

    #[test]
    fn test_pointer_navigation() {
        let schema = node(json!({
            "properties": {
                "tags": { "type": "array", "items": { "type": "string" } }
            },
            "$defs": { "a/b": { "type": "null" } },
            "allOf": [true, { "type": "number" }]
        }));

        let items = schema.pointer("#/properties/tags/items").unwrap();
        assert_eq!(items.as_object().unwrap().single_type(), Some("string"));

        let escaped = schema.pointer("/$defs/a~1b").unwrap();
        assert_eq!(escaped.as_object().unwrap().single_type(), Some("null"));

        assert_eq!(schema.pointer("/allOf/0"), Some(&SchemaNode::Bool(true)));
        assert_eq!(schema.pointer("#"), Some(&schema));
        assert!(schema.pointer("/properties/missing").is_none());
        assert!(schema.pointer("/title").is_none());
    }

    #[test]
    fn test_definition_names_dedup() {
        let schema = node(json!({
            "$defs": { "A": true, "B": true },
            "definitions": { "B": false, "C": true }
        }));
        let obj = schema.as_object().unwrap();
        assert_eq!(obj.definition_names(), vec!["A", "B", "C"]);
        assert_eq!(obj.definition("B"), Some(&SchemaNode::Bool(true)));
    }
}
