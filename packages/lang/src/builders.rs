//! Shared rule builders used by both grammars.

use magma_rules::{
    list, node, prefix, strip, symbol, typed, BlockSplitter, DelimiterSplitter, DynRule, JoinStyle,
};
use std::sync::Arc;

/// Dotted name such as `java.util.List`, stored as ordered symbol segments.
pub fn qualified() -> DynRule {
    typed(
        "qualified",
        list(
            "segments",
            Arc::new(DelimiterSplitter::new('.', JoinStyle::Separated)),
            symbol("value"),
        ),
    )
}

/// `<keyword> <qualified-name>` statement, e.g. a package or import line.
pub fn namespaced(tag: &str, keyword: &str) -> DynRule {
    typed(tag, prefix(keyword, node("namespace", qualified())))
}

/// Semicolon-separated top-level segments.
pub fn segments(child: DynRule) -> DynRule {
    list(
        "children",
        Arc::new(DelimiterSplitter::new(';', JoinStyle::Separated)),
        strip(child),
    )
}

/// Members inside a `{...}` body: `;`-terminated statements plus bare block
/// constructs such as method stubs and nested classes.
pub fn members(key: &str, child: DynRule) -> DynRule {
    list(key, Arc::new(BlockSplitter), strip(child))
}
