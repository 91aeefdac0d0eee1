use serde::{Deserialize, Serialize};

/// One independent compilation input: a name and its raw source text.
///
/// Units are supplied and owned by the caller; the pipeline reads them and
/// never writes back. Where they come from (files, stdin, memory) is not this
/// crate's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub source: String,
}

impl Unit {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}
