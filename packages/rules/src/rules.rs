//! The bidirectional rule combinators.
//!
//! A [`Rule`] is a stateless strategy exposing two operations: `parse` turns a
//! text slice into a [`Node`], `generate` turns a node back into text. Rules
//! compose into a graph fixed at configuration time; cycles are tied with
//! [`LazyRule`]. A rule holds no mutable state, so the same instance can be
//! invoked repeatedly and concurrently.
//!
//! For a rule applied with no intervening rewrite, `generate(parse(x))`
//! produces text that `parse` accepts again, denoting the same attributes.

use crate::cursor::Splitter;
use crate::error::{attribute_error, ErrorKind};
use crate::locate::Locator;
use magma_common::{CompileError, CompileResult, SourceContext};
use magma_node::Node;
use std::sync::{Arc, OnceLock};

pub trait Rule: Send + Sync {
    /// Lex direction: text to node.
    fn parse(&self, input: &str) -> CompileResult<Node>;

    /// Generate direction: node to text.
    fn generate(&self, node: &Node) -> CompileResult<String>;
}

pub type DynRule = Arc<dyn Rule>;

/// Leaf rule capturing the whole slice as a text attribute.
pub struct TextRule {
    key: String,
}

impl TextRule {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Rule for TextRule {
    fn parse(&self, input: &str) -> CompileResult<Node> {
        Ok(Node::new().with_string(&self.key, input))
    }

    fn generate(&self, node: &Node) -> CompileResult<String> {
        node.string(&self.key)
            .map(str::to_string)
            .map_err(|error| attribute_error(error, node))
    }
}

/// Leaf rule capturing the slice as a signed integer attribute.
pub struct IntRule {
    key: String,
}

impl IntRule {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Rule for IntRule {
    fn parse(&self, input: &str) -> CompileResult<Node> {
        let trimmed = input.trim();
        let value: i64 = trimmed.parse().map_err(|_| {
            CompileError::with_context("Not an integer", SourceContext::new(input))
        })?;
        Ok(Node::new().with_int(&self.key, value))
    }

    fn generate(&self, node: &Node) -> CompileResult<String> {
        node.int(&self.key)
            .map(|value| value.to_string())
            .map_err(|error| attribute_error(error, node))
    }
}

/// Accepts only all-whitespace input and produces an empty node.
pub struct EmptyRule;

impl Rule for EmptyRule {
    fn parse(&self, input: &str) -> CompileResult<Node> {
        if input.trim().is_empty() {
            Ok(Node::new())
        } else {
            Err(CompileError::with_context(
                "Input is not empty",
                SourceContext::new(input),
            ))
        }
    }

    fn generate(&self, node: &Node) -> CompileResult<String> {
        if node.is_empty() {
            Ok(String::new())
        } else {
            Err(CompileError::with_context(
                "Node is not empty",
                SourceContext::new(node.to_string()),
            ))
        }
    }
}

/// Predicate gate over a slice, used to keep leaf rules from swallowing
/// arbitrary text (symbols, numbers).
pub trait Filter: Send + Sync {
    fn test(&self, input: &str) -> bool;
    fn describe(&self) -> &'static str;
}

/// Identifier-shaped text: alphanumerics, `_`, `$`, not starting with a digit.
pub struct SymbolFilter;

impl Filter for SymbolFilter {
    fn test(&self, input: &str) -> bool {
        let mut chars = input.chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
            _ => return false,
        }
        chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
    }

    fn describe(&self) -> &'static str {
        "a symbol"
    }
}

/// Digit-only text.
pub struct NumberFilter;

impl Filter for NumberFilter {
    fn test(&self, input: &str) -> bool {
        !input.is_empty() && input.chars().all(|c| c.is_ascii_digit())
    }

    fn describe(&self) -> &'static str {
        "a number"
    }
}

pub struct FilterRule {
    filter: Arc<dyn Filter>,
    child: DynRule,
}

impl FilterRule {
    pub fn new(filter: Arc<dyn Filter>, child: DynRule) -> Self {
        Self { filter, child }
    }
}

impl Rule for FilterRule {
    fn parse(&self, input: &str) -> CompileResult<Node> {
        if !self.filter.test(input) {
            return Err(CompileError::with_context(
                format!("Not {}", self.filter.describe()),
                SourceContext::new(input),
            ));
        }
        self.child.parse(input)
    }

    fn generate(&self, node: &Node) -> CompileResult<String> {
        self.child.generate(node)
    }
}

/// Requires an exact literal at the start of the slice.
pub struct PrefixRule {
    prefix: String,
    child: DynRule,
}

impl PrefixRule {
    pub fn new(prefix: impl Into<String>, child: DynRule) -> Self {
        Self {
            prefix: prefix.into(),
            child,
        }
    }
}

impl Rule for PrefixRule {
    fn parse(&self, input: &str) -> CompileResult<Node> {
        match input.strip_prefix(&self.prefix) {
            Some(rest) => self.child.parse(rest),
            None => Err(ErrorKind::MissingAnchor(self.prefix.clone()).at(SourceContext::new(input))),
        }
    }

    fn generate(&self, node: &Node) -> CompileResult<String> {
        let rest = self.child.generate(node)?;
        Ok(format!("{}{}", self.prefix, rest))
    }
}

/// Requires an exact literal at the end of the slice.
pub struct SuffixRule {
    child: DynRule,
    suffix: String,
}

impl SuffixRule {
    pub fn new(child: DynRule, suffix: impl Into<String>) -> Self {
        Self {
            child,
            suffix: suffix.into(),
        }
    }
}

impl Rule for SuffixRule {
    fn parse(&self, input: &str) -> CompileResult<Node> {
        match input.strip_suffix(&self.suffix) {
            Some(rest) => self.child.parse(rest),
            None => Err(ErrorKind::MissingAnchor(self.suffix.clone()).at(SourceContext::new(input))),
        }
    }

    fn generate(&self, node: &Node) -> CompileResult<String> {
        let rest = self.child.generate(node)?;
        Ok(format!("{}{}", rest, self.suffix))
    }
}

/// Trims surrounding whitespace before delegating parse; no-op on generate.
pub struct StripRule {
    child: DynRule,
}

impl StripRule {
    pub fn new(child: DynRule) -> Self {
        Self { child }
    }
}

impl Rule for StripRule {
    fn parse(&self, input: &str) -> CompileResult<Node> {
        self.child.parse(input.trim())
    }

    fn generate(&self, node: &Node) -> CompileResult<String> {
        self.child.generate(node)
    }
}

/// Stamps a type tag onto the child's parse result; on generate requires the
/// tag to match unless constructed tag-agnostic.
pub struct TypeRule {
    tag: String,
    child: DynRule,
    strict: bool,
}

impl TypeRule {
    pub fn new(tag: impl Into<String>, child: DynRule) -> Self {
        Self {
            tag: tag.into(),
            child,
            strict: true,
        }
    }

    pub fn tag_agnostic(tag: impl Into<String>, child: DynRule) -> Self {
        Self {
            tag: tag.into(),
            child,
            strict: false,
        }
    }
}

impl Rule for TypeRule {
    fn parse(&self, input: &str) -> CompileResult<Node> {
        let node = self.child.parse(input)?;
        Ok(node.retype(&self.tag))
    }

    fn generate(&self, node: &Node) -> CompileResult<String> {
        if self.strict && !node.is(&self.tag) {
            return Err(CompileError::with_context(
                format!(
                    "Node is tagged '{}', expected '{}'",
                    node.tag().unwrap_or("<none>"),
                    self.tag
                ),
                SourceContext::new(node.to_string()),
            ));
        }
        self.child.generate(node)
    }
}

/// Nests the child's parse result under an attribute key.
pub struct NodeRule {
    key: String,
    child: DynRule,
}

impl NodeRule {
    pub fn new(key: impl Into<String>, child: DynRule) -> Self {
        Self {
            key: key.into(),
            child,
        }
    }
}

impl Rule for NodeRule {
    fn parse(&self, input: &str) -> CompileResult<Node> {
        let child = self.child.parse(input)?;
        Ok(Node::new().with_node(&self.key, child))
    }

    fn generate(&self, node: &Node) -> CompileResult<String> {
        let child = node.node(&self.key).map_err(|error| attribute_error(error, node))?;
        self.child.generate(child)
    }
}

/// Ordered alternation.
///
/// Parse tries each alternative in order and returns the first success. Only
/// when every alternative fails does it report `NoAlternativeMatched`, with
/// every alternative's error as a cause, in order. Generate works the same
/// way against the node.
pub struct OrRule {
    alternatives: Vec<DynRule>,
}

impl OrRule {
    pub fn new(alternatives: Vec<DynRule>) -> Self {
        Self { alternatives }
    }
}

impl Rule for OrRule {
    fn parse(&self, input: &str) -> CompileResult<Node> {
        let mut causes = Vec::with_capacity(self.alternatives.len());
        for alternative in &self.alternatives {
            match alternative.parse(input) {
                Ok(node) => return Ok(node),
                Err(error) => causes.push(error),
            }
        }
        Err(ErrorKind::NoAlternativeMatched.caused(SourceContext::new(input), causes))
    }

    fn generate(&self, node: &Node) -> CompileResult<String> {
        let mut causes = Vec::with_capacity(self.alternatives.len());
        for alternative in &self.alternatives {
            match alternative.generate(node) {
                Ok(output) => return Ok(output),
                Err(error) => causes.push(error),
            }
        }
        Err(ErrorKind::NoAlternativeMatched.caused(SourceContext::new(node.to_string()), causes))
    }
}

/// Forward reference, bound after construction. Enables self- and mutually
/// recursive grammars; invoking it unbound is a configuration error surfaced
/// as `UnresolvedLazyBinding`.
pub struct LazyRule {
    target: OnceLock<DynRule>,
}

impl LazyRule {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            target: OnceLock::new(),
        })
    }

    /// Binds the target, returning whether this call installed it. The graph
    /// is fixed at configuration time, so a rebind is refused and the first
    /// binding stays in effect.
    pub fn set(&self, target: DynRule) -> bool {
        self.target.set(target).is_ok()
    }

    pub fn is_bound(&self) -> bool {
        self.target.get().is_some()
    }

    fn target(&self) -> CompileResult<&DynRule> {
        self.target
            .get()
            .ok_or_else(|| ErrorKind::UnresolvedLazyBinding.at(SourceContext::new("<unbound>")))
    }
}

impl Rule for LazyRule {
    fn parse(&self, input: &str) -> CompileResult<Node> {
        self.target()?.parse(input)
    }

    fn generate(&self, node: &Node) -> CompileResult<String> {
        self.target()?.generate(node)
    }
}

/// Backtracking split at an anchor literal.
///
/// The locator yields candidate split indices in trial order. For each
/// candidate the left slice goes to the left rule and the right slice to the
/// right rule; the first candidate where both succeed wins and the two
/// attribute sets are merged (left precedence). If every candidate fails, the
/// error keeps each attempt's failure as a cause, in the order tried — the
/// same anchor may occur inside a nested construct where one side is
/// ill-typed, and the distinguishing child error must survive.
pub struct LocateRule {
    left: DynRule,
    anchor: String,
    right: DynRule,
    locator: Arc<dyn Locator>,
}

impl LocateRule {
    pub fn new(
        left: DynRule,
        anchor: impl Into<String>,
        right: DynRule,
        locator: Arc<dyn Locator>,
    ) -> Self {
        Self {
            left,
            anchor: anchor.into(),
            right,
            locator,
        }
    }
}

impl Rule for LocateRule {
    fn parse(&self, input: &str) -> CompileResult<Node> {
        let candidates = self.locator.locate(input, &self.anchor);
        if candidates.is_empty() {
            return Err(ErrorKind::MissingAnchor(self.anchor.clone()).at(SourceContext::new(input)));
        }

        let mut causes = Vec::new();
        for index in candidates {
            let left_slice = &input[..index];
            let right_slice = &input[index + self.anchor.len()..];

            let left = match self.left.parse(left_slice) {
                Ok(node) => node,
                Err(error) => {
                    causes.push(error.wrap_at(
                        format!("Left of '{}' at offset {}", self.anchor, index),
                        SourceContext::at(left_slice, 0),
                    ));
                    continue;
                }
            };
            match self.right.parse(right_slice) {
                Ok(right) => return Ok(left.merge(&right)),
                Err(error) => {
                    causes.push(error.wrap_at(
                        format!("Right of '{}' at offset {}", self.anchor, index),
                        SourceContext::at(right_slice, index + self.anchor.len()),
                    ));
                }
            }
        }

        Err(ErrorKind::NoCandidateLocation(self.anchor.clone())
            .caused(SourceContext::new(input), causes))
    }

    fn generate(&self, node: &Node) -> CompileResult<String> {
        let left = self.left.generate(node)?;
        let right = self.right.generate(node)?;
        Ok(format!("{}{}{}", left, self.anchor, right))
    }
}

/// Splitter-driven list: parses each segment with the child rule and stores
/// the ordered results under one attribute key. A failing segment aborts the
/// whole parse, with the segment's index as added context.
pub struct ListRule {
    key: String,
    splitter: Arc<dyn Splitter>,
    child: DynRule,
}

impl ListRule {
    pub fn new(key: impl Into<String>, splitter: Arc<dyn Splitter>, child: DynRule) -> Self {
        Self {
            key: key.into(),
            splitter,
            child,
        }
    }
}

impl Rule for ListRule {
    fn parse(&self, input: &str) -> CompileResult<Node> {
        let segments = self.splitter.split(input)?;
        let mut children = Vec::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            let child = self.child.parse(segment).map_err(|error| {
                error.wrap_at(
                    ErrorKind::SegmentFailure(index).to_string(),
                    SourceContext::new(segment.as_str()),
                )
            })?;
            children.push(child);
        }
        Ok(Node::new().with_node_list(&self.key, children))
    }

    fn generate(&self, node: &Node) -> CompileResult<String> {
        let children = node
            .node_list(&self.key)
            .map_err(|error| attribute_error(error, node))?;
        let mut segments = Vec::with_capacity(children.len());
        for (index, child) in children.iter().enumerate() {
            let segment = self.child.generate(child).map_err(|error| {
                error.wrap_at(
                    ErrorKind::SegmentFailure(index).to_string(),
                    SourceContext::new(child.to_string()),
                )
            })?;
            segments.push(segment);
        }
        Ok(self.splitter.join(&segments))
    }
}

// Construction helpers. Grammar configuration reads as a tree of these calls,
// so they return shared trait objects directly.

pub fn text(key: &str) -> DynRule {
    Arc::new(TextRule::new(key))
}

pub fn int(key: &str) -> DynRule {
    Arc::new(IntRule::new(key))
}

pub fn symbol(key: &str) -> DynRule {
    Arc::new(FilterRule::new(Arc::new(SymbolFilter), text(key)))
}

pub fn prefix(literal: &str, child: DynRule) -> DynRule {
    Arc::new(PrefixRule::new(literal, child))
}

pub fn suffix(child: DynRule, literal: &str) -> DynRule {
    Arc::new(SuffixRule::new(child, literal))
}

pub fn strip(child: DynRule) -> DynRule {
    Arc::new(StripRule::new(child))
}

pub fn typed(tag: &str, child: DynRule) -> DynRule {
    Arc::new(TypeRule::new(tag, child))
}

pub fn node(key: &str, child: DynRule) -> DynRule {
    Arc::new(NodeRule::new(key, child))
}

pub fn or(alternatives: Vec<DynRule>) -> DynRule {
    Arc::new(OrRule::new(alternatives))
}

pub fn infix(left: DynRule, anchor: &str, right: DynRule, locator: Arc<dyn Locator>) -> DynRule {
    Arc::new(LocateRule::new(left, anchor, right, locator))
}

pub fn list(key: &str, splitter: Arc<dyn Splitter>, child: DynRule) -> DynRule {
    Arc::new(ListRule::new(key, splitter, child))
}

pub fn lazy() -> Arc<LazyRule> {
    LazyRule::new()
}
