//! The TypeScript-flavoured target grammar. It consumes the same tree shape
//! the Java grammar produces (after the rewrite passes) and renders TS-ish
//! text; parse works too, which is what keeps the round-trip law testable.

use crate::builders::{members, namespaced, segments};
use magma_rules::{
    infix, lazy, or, prefix, strip, suffix, symbol, text, typed, DynRule, FirstLocator,
};
use std::sync::Arc;

pub fn root() -> DynRule {
    segments(or(vec![namespaced("import", "import "), class()]))
}

fn class() -> DynRule {
    let nested = lazy();
    let nested_rule: DynRule = nested.clone();
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

fn field() -> DynRule {
    let typed_value = infix(
        strip(text("type")),
        " = ",
        strip(text("value")),
        Arc::new(FirstLocator),
    );
    typed(
        "field",
        prefix(
            "let ",
            infix(strip(symbol("name")), " : ", typed_value, Arc::new(FirstLocator)),
        ),
    )
}

/// `<name>(<params>) : <type> {<body>}`, the target spelling of a method stub.
fn method() -> DynRule {
    let signature = infix(
        symbol("name"),
        "(",
        infix(text("params"), ") : ", strip(text("type")), Arc::new(FirstLocator)),
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
