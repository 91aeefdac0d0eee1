use crate::context::SourceContext;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An error that occurred during compilation.
///
/// Errors form a causal tree: a combinator that fails because its children
/// failed wraps those child errors as `causes`. Leaf errors have no causes.
/// Display is deterministic — causes are ordered by ascending depth, so the
/// shallowest (most specific) explanation renders first regardless of the
/// order failures were collected in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileError {
    reason: String,
    context: Option<SourceContext>,
    causes: Vec<CompileError>,
}

impl CompileError {
    /// A leaf error with no source context.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            context: None,
            causes: Vec::new(),
        }
    }

    /// A leaf error pointing at the offending slice.
    pub fn with_context(reason: impl Into<String>, context: SourceContext) -> Self {
        Self {
            reason: reason.into(),
            context: Some(context),
            causes: Vec::new(),
        }
    }

    /// An error caused by one or more child failures.
    pub fn caused(
        reason: impl Into<String>,
        context: SourceContext,
        causes: Vec<CompileError>,
    ) -> Self {
        Self {
            reason: reason.into(),
            context: Some(context),
            causes,
        }
    }

    /// Wrap this error with an outer reason, preserving it as the sole cause.
    pub fn wrap(self, reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            context: None,
            causes: vec![self],
        }
    }

    /// Like [`wrap`](Self::wrap), with an outer source context.
    pub fn wrap_at(self, reason: impl Into<String>, context: SourceContext) -> Self {
        Self::caused(reason, context, vec![self])
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn context(&self) -> Option<&SourceContext> {
        self.context.as_ref()
    }

    pub fn causes(&self) -> &[CompileError] {
        &self.causes
    }

    /// 1 + the maximum depth of any cause; leaves have depth 1.
    pub fn depth(&self) -> usize {
        1 + self.causes.iter().map(CompileError::depth).max().unwrap_or(0)
    }

    fn display_into(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        write!(f, "{}{}", pad, self.reason)?;
        if let Some(context) = &self.context {
            write!(f, "\n{}  at {}", pad, context)?;
        }

        // Stable sort keeps collection order among causes of equal depth.
        let mut ordered: Vec<&CompileError> = self.causes.iter().collect();
        ordered.sort_by_key(|cause| cause.depth());

        for cause in ordered {
            writeln!(f)?;
            cause.display_into(f, indent + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_into(f, 0)
    }
}

impl std::error::Error for CompileError {}
