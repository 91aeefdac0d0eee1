//! The Java-flavoured source grammar: package and import lines plus a class
//! with field members, method stubs, and nested classes. Deliberately partial;
//! this is engine configuration, not a Java frontend.

use crate::builders::{members, namespaced, segments};
use magma_rules::{
    infix, lazy, or, strip, suffix, symbol, text, typed, DynRule, FirstLocator, LastLocator,
};
use std::sync::Arc;

/// Root rule for one compilation unit.
pub fn root() -> DynRule {
    segments(or(vec![
        namespaced("package", "package "),
        namespaced("import", "import "),
        class(),
    ]))
}

fn class() -> DynRule {
    let nested = lazy();
    let nested_rule: DynRule = nested.clone();
    // Nested classes first: the field rule would otherwise match the `=`
    // inside a nested class body.
    let member = or(vec![nested_rule, method(), field()]);
    let body = strip(suffix(members("members", member), "}"));
    let after_keyword = infix(strip(symbol("name")), "{", body, Arc::new(FirstLocator));
    let rule = typed(
        "class",
        infix(text("modifiers"), "class ", after_keyword, Arc::new(FirstLocator)),
    );
    nested.set(rule.clone());
    rule
}

/// `<type> <name>`, split at the last shallow space so multi-word types keep
/// their spaces on the left.
fn definition() -> DynRule {
    infix(
        strip(text("type")),
        " ",
        strip(symbol("name")),
        Arc::new(LastLocator),
    )
}

fn field() -> DynRule {
    typed(
        "field",
        infix(definition(), "=", strip(text("value")), Arc::new(FirstLocator)),
    )
}

/// `<type> <name>(<params>) {<body>}`; the body stays raw text.
fn method() -> DynRule {
    let signature = infix(
        definition(),
        "(",
        strip(suffix(text("params"), ")")),
        Arc::new(FirstLocator),
    );
    typed(
        "method",
        infix(
            signature,
            "{",
            strip(suffix(text("body"), "}")),
            Arc::new(FirstLocator),
        ),
    )
}
