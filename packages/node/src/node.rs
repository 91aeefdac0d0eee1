use crate::attribute::{Attribute, AttributeError, AttributeResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// An immutable tree value: an optional type tag plus an attribute map.
///
/// Every mutating operation returns a new `Node`; a node handed to a caller is
/// never observably changed afterwards. The attribute map is a `BTreeMap` so
/// iteration order is stable, which keeps attribute-derived rendering
/// deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    tag: Option<String>,
    attributes: BTreeMap<String, Attribute>,
}

impl Node {
    /// An empty, untagged node.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty node carrying a type tag.
    pub fn typed(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            attributes: BTreeMap::new(),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Whether this node carries the given type tag.
    pub fn is(&self, tag: &str) -> bool {
        self.tag.as_deref() == Some(tag)
    }

    /// Returns a copy of this node with the tag replaced.
    pub fn retype(&self, tag: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.tag = Some(tag.into());
        next
    }

    pub fn has(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }

    /// Attribute keys and values in stable (sorted) order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.attributes.is_empty()
    }

    fn with(&self, key: impl Into<String>, value: Attribute) -> Self {
        let mut next = self.clone();
        next.attributes.insert(key.into(), value);
        next
    }

    pub fn with_string(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(key, Attribute::Text(value.into()))
    }

    pub fn with_int(&self, key: impl Into<String>, value: i64) -> Self {
        self.with(key, Attribute::Int(value))
    }

    pub fn with_bool(&self, key: impl Into<String>, value: bool) -> Self {
        self.with(key, Attribute::Bool(value))
    }

    pub fn with_node(&self, key: impl Into<String>, value: Node) -> Self {
        self.with(key, Attribute::Node(value))
    }

    pub fn with_node_list(&self, key: impl Into<String>, value: Vec<Node>) -> Self {
        self.with(key, Attribute::NodeList(value))
    }

    pub fn with_string_list(&self, key: impl Into<String>, value: Vec<String>) -> Self {
        self.with(key, Attribute::TextList(value))
    }

    pub fn with_string_set(&self, key: impl Into<String>, value: BTreeSet<String>) -> Self {
        self.with(key, Attribute::TextSet(value))
    }

    /// Returns a copy without the given attribute.
    pub fn without(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.attributes.remove(key);
        next
    }

    fn get(&self, key: &str) -> AttributeResult<&Attribute> {
        self.attributes
            .get(key)
            .ok_or_else(|| AttributeError::missing(key))
    }

    pub fn string(&self, key: &str) -> AttributeResult<&str> {
        match self.get(key)? {
            Attribute::Text(value) => Ok(value),
            other => Err(AttributeError::wrong_variant(key, "text", other.variant())),
        }
    }

    pub fn int(&self, key: &str) -> AttributeResult<i64> {
        match self.get(key)? {
            Attribute::Int(value) => Ok(*value),
            other => Err(AttributeError::wrong_variant(key, "int", other.variant())),
        }
    }

    pub fn bool(&self, key: &str) -> AttributeResult<bool> {
        match self.get(key)? {
            Attribute::Bool(value) => Ok(*value),
            other => Err(AttributeError::wrong_variant(key, "bool", other.variant())),
        }
    }

    pub fn node(&self, key: &str) -> AttributeResult<&Node> {
        match self.get(key)? {
            Attribute::Node(value) => Ok(value),
            other => Err(AttributeError::wrong_variant(key, "node", other.variant())),
        }
    }

    pub fn node_list(&self, key: &str) -> AttributeResult<&[Node]> {
        match self.get(key)? {
            Attribute::NodeList(value) => Ok(value),
            other => Err(AttributeError::wrong_variant(key, "node list", other.variant())),
        }
    }

    pub fn string_list(&self, key: &str) -> AttributeResult<&[String]> {
        match self.get(key)? {
            Attribute::TextList(value) => Ok(value),
            other => Err(AttributeError::wrong_variant(key, "text list", other.variant())),
        }
    }

    pub fn string_set(&self, key: &str) -> AttributeResult<&BTreeSet<String>> {
        match self.get(key)? {
            Attribute::TextSet(value) => Ok(value),
            other => Err(AttributeError::wrong_variant(key, "text set", other.variant())),
        }
    }

    /// Like [`string`](Self::string), but `None` when the attribute is absent
    /// or held under another variant. The `find_*` family is for callers that
    /// treat absence as an ordinary branch rather than a failure.
    pub fn find_string(&self, key: &str) -> Option<&str> {
        self.string(key).ok()
    }

    pub fn find_int(&self, key: &str) -> Option<i64> {
        self.int(key).ok()
    }

    pub fn find_bool(&self, key: &str) -> Option<bool> {
        self.bool(key).ok()
    }

    pub fn find_node(&self, key: &str) -> Option<&Node> {
        self.node(key).ok()
    }

    pub fn find_node_list(&self, key: &str) -> Option<&[Node]> {
        self.node_list(key).ok()
    }

    /// Union of this node's attributes with `other`'s.
    ///
    /// On key collision this node's value wins; the tag is this node's tag if
    /// present, else `other`'s.
    pub fn merge(&self, other: &Node) -> Self {
        let mut attributes = other.attributes.clone();
        for (key, value) in &self.attributes {
            attributes.insert(key.clone(), value.clone());
        }
        Self {
            tag: self.tag.clone().or_else(|| other.tag.clone()),
            attributes,
        }
    }
}

impl fmt::Display for Node {
    /// Compact one-line form used as error context and in logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{} ", tag)?;
        }
        write!(f, "{{")?;
        for (index, (key, value)) in self.attributes.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            match value {
                Attribute::Text(text) => write!(f, "{}: \"{}\"", key, text)?,
                Attribute::Int(value) => write!(f, "{}: {}", key, value)?,
                Attribute::Bool(value) => write!(f, "{}: {}", key, value)?,
                Attribute::Node(node) => write!(f, "{}: {}", key, node)?,
                Attribute::NodeList(nodes) => write!(f, "{}: [{} nodes]", key, nodes.len())?,
                Attribute::TextList(items) => write!(f, "{}: [{} texts]", key, items.len())?,
                Attribute::TextSet(items) => write!(f, "{}: {{{} texts}}", key, items.len())?,
            }
        }
        write!(f, "}}")
    }
}
