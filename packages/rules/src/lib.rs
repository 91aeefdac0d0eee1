pub mod cursor;
pub mod error;
pub mod locate;
pub mod rules;

pub use cursor::{split_statements, BlockSplitter, DelimiterSplitter, JoinStyle, Splitter};
pub use error::ErrorKind;
pub use locate::{FirstLocator, LastLocator, Locator, ShallowLocator};
pub use rules::{
    infix, int, lazy, list, node, or, prefix, strip, suffix, symbol, text, typed, DynRule,
    EmptyRule, Filter, FilterRule, IntRule, LazyRule, ListRule, LocateRule, NodeRule,
    NumberFilter, OrRule, PrefixRule, Rule, StripRule, SuffixRule, SymbolFilter, TextRule,
    TypeRule,
};


#[cfg(test)]
mod tests_rules;
