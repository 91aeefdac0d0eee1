use crate::cursor::DelimiterSplitter;
use crate::locate::{FirstLocator, LastLocator};
use crate::rules::*;
use std::sync::Arc;

fn assignment_rule() -> DynRule {
    // destination = source;
    strip(suffix(
        infix(
            strip(text("destination")),
            "=",
            strip(text("source")),
            Arc::new(FirstLocator),
        ),
        ";",
    ))
}

#[test]
fn text_rule_captures_the_whole_slice() {
    let rule = text("value");
    let node = rule.parse("anything at all").unwrap();
    assert_eq!(node.string("value").unwrap(), "anything at all");
    assert_eq!(rule.generate(&node).unwrap(), "anything at all");
}

#[test]
fn int_rule_parses_and_regenerates() {
    let rule = int("count");
    let node = rule.parse(" 42 ").unwrap();
    assert_eq!(node.int("count").unwrap(), 42);
    assert_eq!(rule.generate(&node).unwrap(), "42");

    assert!(rule.parse("forty-two").is_err());
}

#[test]
fn prefix_rule_requires_its_anchor() {
    let rule = prefix("return ", text("value"));
    let node = rule.parse("return x").unwrap();
    assert_eq!(node.string("value").unwrap(), "x");
    assert_eq!(rule.generate(&node).unwrap(), "return x");

    let error = rule.parse("x").unwrap_err();
    assert!(error.to_string().contains("Missing anchor 'return '"));
}

#[test]
fn suffix_rule_requires_its_anchor() {
    let rule = suffix(text("value"), ";");
    assert!(rule.parse("x").is_err());
    let node = rule.parse("x;").unwrap();
    assert_eq!(rule.generate(&node).unwrap(), "x;");
}

#[test]
fn strip_rule_trims_before_parsing_only() {
    let rule = strip(prefix("if", text("condition")));
    let node = rule.parse("   if(x)  ").unwrap();
    assert_eq!(node.string("condition").unwrap(), "(x)");
    // Generate is a pass-through; no whitespace is re-invented.
    assert_eq!(rule.generate(&node).unwrap(), "if(x)");
}

#[test]
fn type_rule_stamps_the_tag() {
    let rule = typed("return", prefix("return ", text("value")));
    let node = rule.parse("return x").unwrap();
    assert!(node.is("return"));
}

#[test]
fn strict_type_rule_rejects_foreign_nodes_on_generate() {
    let rule = typed("return", prefix("return ", text("value")));
    let foreign = crate::rules::text("value").parse("x").unwrap().retype("break");
    let error = rule.generate(&foreign).unwrap_err();
    assert!(error.to_string().contains("expected 'return'"));
}

#[test]
fn tag_agnostic_type_rule_generates_regardless_of_tag() {
    let rule = TypeRule::tag_agnostic("return", prefix("return ", text("value")));
    let foreign = text("value").parse("x").unwrap().retype("break");
    assert_eq!(rule.generate(&foreign).unwrap(), "return x");
}

#[test]
fn or_rule_returns_the_first_success() {
    let a = typed("if", prefix("if", text("content")));
    let b = typed("while", prefix("while", text("content")));
    let rule = or(vec![a, b.clone()]);

    let via_or = rule.parse("while(x)").unwrap();
    let direct = b.parse("while(x)").unwrap();
    assert_eq!(via_or, direct);
}

#[test]
fn or_rule_reports_every_alternative_failure_in_order() {
    let rule = or(vec![
        prefix("if", text("content")),
        prefix("while", text("content")),
    ]);

    let error = rule.parse("for(x)").unwrap_err();
    assert_eq!(error.reason(), "No alternative matched");
    assert_eq!(error.causes().len(), 2);
    assert!(error.causes()[0].reason().contains("'if'"));
    assert!(error.causes()[1].reason().contains("'while'"));
}

#[test]
fn or_rule_generates_through_the_matching_alternative() {
    let rule = or(vec![
        typed("if", prefix("if", text("content"))),
        typed("while", prefix("while", text("content"))),
    ]);
    let node = rule.parse("while(x)").unwrap();
    assert_eq!(rule.generate(&node).unwrap(), "while(x)");
}

#[test]
fn locate_rule_merges_left_and_right_attributes() {
    let rule = assignment_rule();
    let node = rule.parse("x = 10;").unwrap();
    assert_eq!(node.string("destination").unwrap(), "x");
    assert_eq!(node.string("source").unwrap(), "10");
}

#[test]
fn locate_rule_backtracks_to_a_later_candidate() {
    // First "=>" occurrence splits into " b => c" on the right, which is not
    // a symbol; the second occurrence yields right = "c" and succeeds.
    let rule = infix(
        text("left"),
        "=>",
        strip(symbol("right")),
        Arc::new(FirstLocator),
    );

    let node = rule.parse("a => b => c").unwrap();
    assert_eq!(node.string("right").unwrap(), "c");
    assert_eq!(node.string("left").unwrap(), "a => b ");
}

#[test]
fn locate_rule_keeps_every_candidate_failure_as_a_cause() {
    let rule = infix(
        strip(symbol("left")),
        "=>",
        strip(int("right")),
        Arc::new(FirstLocator),
    );

    let error = rule.parse("a => b => c").unwrap_err();
    assert!(error.reason().contains("No candidate location for anchor '=>'"));
    // Both occurrences were attempted, in order.
    assert_eq!(error.causes().len(), 2);
    assert!(error.causes()[0].reason().contains("offset 2"));
    assert!(error.causes()[1].reason().contains("offset 7"));
}

#[test]
fn locate_rule_without_any_occurrence_reports_missing_anchor() {
    let rule = assignment_rule();
    let error = rule.parse("x;").unwrap_err();
    assert!(error.to_string().contains("Missing anchor '='"));
}

#[test]
fn last_locator_splits_at_the_rightmost_occurrence_first() {
    let rule = infix(
        text("qualifier"),
        ".",
        strip(symbol("member")),
        Arc::new(LastLocator),
    );

    let node = rule.parse("java.util.List").unwrap();
    assert_eq!(node.string("qualifier").unwrap(), "java.util");
    assert_eq!(node.string("member").unwrap(), "List");
}

#[test]
fn merge_gives_left_side_precedence() {
    let rule = infix(text("k"), "|", text("k"), Arc::new(FirstLocator));
    let node = rule.parse("left|right").unwrap();
    assert_eq!(node.string("k").unwrap(), "left");
}

#[test]
fn lazy_rule_enables_self_recursion() {
    let value = lazy();
    let not = typed("not", prefix("!", node("child", value.clone())));
    let symbol_value = typed("symbol-value", symbol("value"));
    value.set(or(vec![not, symbol_value]));

    let tree = value.parse("!!x").unwrap();
    assert!(tree.is("not"));
    let inner = tree.node("child").unwrap();
    assert!(inner.is("not"));
    assert_eq!(inner.node("child").unwrap().string("value").unwrap(), "x");

    assert_eq!(value.generate(&tree).unwrap(), "!!x");
}

#[test]
fn rebinding_a_lazy_rule_is_refused() {
    let value = lazy();
    assert!(value.set(text("first")));
    assert!(!value.set(text("second")));

    // The first binding stays in effect.
    let node = value.parse("x").unwrap();
    assert_eq!(node.string("first").unwrap(), "x");
}

#[test]
fn unbound_lazy_rule_is_a_configuration_error() {
    let value = lazy();
    assert!(!value.is_bound());
    let error = value.parse("x").unwrap_err();
    assert!(error.to_string().contains("before a target was bound"));
}

#[test]
fn list_rule_parses_each_segment() {
    let rule = list(
        "children",
        Arc::new(DelimiterSplitter::statements()),
        strip(symbol("value")),
    );

    let tree = rule.parse("a; b; c").unwrap();
    let children = tree.node_list("children").unwrap();
    assert_eq!(children.len(), 3);
    assert_eq!(children[1].string("value").unwrap(), "b");
}

#[test]
fn list_rule_surfaces_the_failing_segment_index() {
    let rule = list(
        "children",
        Arc::new(DelimiterSplitter::statements()),
        strip(symbol("value")),
    );

    let error = rule.parse("a; 1!; c").unwrap_err();
    assert!(error.reason().contains("Segment 1 failed"));
}

#[test]
fn list_rule_generate_joins_segments() {
    let rule = list(
        "children",
        Arc::new(DelimiterSplitter::statements()),
        strip(symbol("value")),
    );

    let tree = rule.parse("a; b; c").unwrap();
    let generated = rule.generate(&tree).unwrap();
    assert_eq!(generated, "a;b;c;");

    // Round-trip law: regenerated text parses to an attribute-equal tree.
    assert_eq!(rule.parse(&generated).unwrap(), tree);
}

#[test]
fn round_trip_preserves_attributes_for_composite_rules() {
    let rule = typed("assignment", assignment_rule());
    let first = rule.parse("x = 10;").unwrap();
    let regenerated = rule.generate(&first).unwrap();
    let second = rule.parse(&regenerated).unwrap();
    assert_eq!(first, second);
}

#[test]
fn generate_with_a_wrong_attribute_variant_is_a_typed_failure() {
    let rule = text("value");
    let bad = magma_node::Node::new().with_int("value", 3);
    let error = rule.generate(&bad).unwrap_err();
    assert!(error.reason().contains("Attribute type mismatch"));
}

#[test]
fn empty_rule_accepts_only_blank_input() {
    assert!(EmptyRule.parse("   ").is_ok());
    assert!(EmptyRule.parse("x").is_err());
    assert_eq!(EmptyRule.generate(&magma_node::Node::new()).unwrap(), "");
}

#[test]
fn symbol_filter_accepts_identifiers_only() {
    assert!(SymbolFilter.test("foo_bar"));
    assert!(SymbolFilter.test("_x1"));
    assert!(!SymbolFilter.test("1x"));
    assert!(!SymbolFilter.test("a b"));
    assert!(!SymbolFilter.test(""));
}

#[test]
fn number_filter_accepts_digits_only() {
    assert!(NumberFilter.test("123"));
    assert!(!NumberFilter.test("12a"));
    assert!(!NumberFilter.test(""));
}
