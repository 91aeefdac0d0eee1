use magma_common::{CompileError, SourceContext};
use magma_node::{AttributeError, Node};
use thiserror::Error;

/// The closed set of failures the rule engine produces.
///
/// Every kind lowers into a [`CompileError`] carrying the offending slice as
/// context; combinators that retry alternatives attach the per-attempt
/// failures as causes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("Missing anchor '{0}'")]
    MissingAnchor(String),

    #[error("No alternative matched")]
    NoAlternativeMatched,

    #[error("Lazy rule was invoked before a target was bound")]
    UnresolvedLazyBinding,

    #[error("Unbalanced delimiter '{0}'")]
    UnbalancedDelimiter(char),

    #[error("Attribute type mismatch: {0}")]
    AttributeTypeMismatch(String),

    #[error("Segment {0} failed")]
    SegmentFailure(usize),

    #[error("No candidate location for anchor '{0}'")]
    NoCandidateLocation(String),
}

impl ErrorKind {
    /// Lower into a leaf error pointing at the offending slice.
    pub fn at(self, context: SourceContext) -> CompileError {
        CompileError::with_context(self.to_string(), context)
    }

    /// Lower into an error wrapping the given causes.
    pub fn caused(self, context: SourceContext, causes: Vec<CompileError>) -> CompileError {
        CompileError::caused(self.to_string(), context, causes)
    }
}

/// Lower a typed attribute failure into a compile error, using the node's
/// display form as context.
pub fn attribute_error(error: AttributeError, node: &Node) -> CompileError {
    ErrorKind::AttributeTypeMismatch(error.to_string()).at(SourceContext::new(node.to_string()))
}
