use crate::node::Node;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// A value held by a [`Node`] under an attribute key.
///
/// The set of variants is closed; rules and passes match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Attribute {
    Text(String),
    Int(i64),
    Bool(bool),
    Node(Node),
    NodeList(Vec<Node>),
    TextList(Vec<String>),
    TextSet(BTreeSet<String>),
}

impl Attribute {
    /// Variant name used in mismatch errors.
    pub fn variant(&self) -> &'static str {
        match self {
            Attribute::Text(_) => "text",
            Attribute::Int(_) => "int",
            Attribute::Bool(_) => "bool",
            Attribute::Node(_) => "node",
            Attribute::NodeList(_) => "node list",
            Attribute::TextList(_) => "text list",
            Attribute::TextSet(_) => "text set",
        }
    }
}

pub type AttributeResult<T> = Result<T, AttributeError>;

/// Typed failure for attribute access.
///
/// Reading an attribute as the wrong variant is always an error, never a
/// silent default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("Attribute '{key}' is not present")]
    Missing { key: String },

    #[error("Attribute '{key}' holds a {found}, expected a {expected}")]
    WrongVariant {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl AttributeError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }

    pub fn wrong_variant(key: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self::WrongVariant {
            key: key.into(),
            expected,
            found,
        }
    }
}
