use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of characters of the offending slice shown in error output.
const DISPLAY_LIMIT: usize = 60;

/// A display-able slice of the input that an error refers to.
///
/// Carries the offending text and, when known, the byte position it started at
/// within the enclosing slice. Rendering truncates long slices so error trees
/// stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceContext {
    slice: String,
    position: Option<usize>,
}

impl SourceContext {
    pub fn new(slice: impl Into<String>) -> Self {
        Self {
            slice: slice.into(),
            position: None,
        }
    }

    pub fn at(slice: impl Into<String>, position: usize) -> Self {
        Self {
            slice: slice.into(),
            position: Some(position),
        }
    }

    pub fn slice(&self) -> &str {
        &self.slice
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }
}

impl fmt::Display for SourceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let escaped: String = self
            .slice
            .chars()
            .map(|c| match c {
                '\n' => ' ',
                '\t' => ' ',
                other => other,
            })
            .collect();

        if escaped.chars().count() > DISPLAY_LIMIT {
            let head: String = escaped.chars().take(DISPLAY_LIMIT).collect();
            write!(f, "'{}...'", head)?;
        } else {
            write!(f, "'{}'", escaped)?;
        }

        if let Some(position) = self.position {
            write!(f, " (offset {})", position)?;
        }
        Ok(())
    }
}
