//! The JSON node tree recorded while a type's routine is being driven.
use std::collections::BTreeMap;
use serde::Serialize;

/// JSON number as synthesized: integers stay integral on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Objects are key-sorted so the encoded output has sorted keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Node>),
    Object(BTreeMap<String, Node>),
}

impl Node {
    pub fn empty_object() -> Self { Node::Object(BTreeMap::new()) }

    pub fn as_array(&self) -> Option<&Vec<Node>> {
        match self { Node::Array(xs) => Some(xs), _ => None }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Node>> {
        match self { Node::Object(m) => Some(m), _ => None }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self { Node::String(s) => Some(s), _ => None }
    }

    /// Field lookup on object nodes; `None` for every other variant.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_object().and_then(|m| m.get(key))
    }

    /// Text used when this node becomes a JSON object key.
    ///
    /// JSON keys are always strings, so scalar keys (integers, booleans)
    /// are rendered the way `serde_json` reads them back.
    pub(crate) fn into_key(self) -> String {
        match self {
            Node::String(s) => s,
            Node::Bool(b) => b.to_string(),
            Node::Number(Number::Int(i)) => i.to_string(),
            Node::Number(Number::Float(f)) => f.to_string(),
            Node::Null => "null".to_string(),
            other => serde_json::to_string(&other).unwrap_or_default(),
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self { Node::Bool(value) }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self { Node::Number(Number::Int(value)) }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self { Node::Number(Number::Float(value)) }
}

impl From<String> for Node {
    fn from(value: String) -> Self { Node::String(value) }
}
