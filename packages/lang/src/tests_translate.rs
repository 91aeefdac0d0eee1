use crate::{java, transform, typescript};
use magma_compiler::{compile_units, Compiler, Unit};

fn translator() -> Compiler {
    Compiler::new(java::root())
        .with_target(typescript::root())
        .with_pass(transform::drop_packages())
        .with_pass(transform::export_modifiers())
        .with_pass(transform::map_primitive_types())
}

#[test]
fn java_root_parses_a_small_unit() {
    let source = "package magma.app; import java.util.List; public class Main {int x = 1;}";
    let tree = java::root().parse(source).unwrap();

    let children = tree.node_list("children").unwrap();
    assert_eq!(children.len(), 3);
    assert!(children[0].is("package"));
    assert!(children[1].is("import"));
    assert!(children[2].is("class"));
}

#[test]
fn qualified_names_are_split_into_segments() {
    let source = "import java.util.List";
    let tree = java::root().parse(source).unwrap();

    let import = &tree.node_list("children").unwrap()[0];
    let namespace = import.node("namespace").unwrap();
    let segments = namespace.node_list("segments").unwrap();
    let values: Vec<&str> = segments
        .iter()
        .map(|segment| segment.string("value").unwrap())
        .collect();
    assert_eq!(values, vec!["java", "util", "List"]);
}

#[test]
fn class_members_are_parsed_as_fields() {
    let source = "public class Main {int x = 1; String s = \"a;b\";}";
    let tree = java::root().parse(source).unwrap();

    let class = &tree.node_list("children").unwrap()[0];
    assert_eq!(class.string("modifiers").unwrap(), "public ");
    assert_eq!(class.string("name").unwrap(), "Main");

    let fields = class.node_list("members").unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].string("type").unwrap(), "int");
    assert_eq!(fields[0].string("name").unwrap(), "x");
    assert_eq!(fields[0].string("value").unwrap(), "1");
    // The quoted semicolon did not split the member list.
    assert_eq!(fields[1].string("value").unwrap(), "\"a;b\"");
}

#[test]
fn method_stubs_are_parsed_with_signature_and_body() {
    let source = "public class Main {int getX() {return x;}}";
    let tree = java::root().parse(source).unwrap();

    let class = &tree.node_list("children").unwrap()[0];
    let method = &class.node_list("members").unwrap()[0];
    assert!(method.is("method"));
    assert_eq!(method.string("type").unwrap(), "int");
    assert_eq!(method.string("name").unwrap(), "getX");
    assert_eq!(method.string("params").unwrap(), "");
    assert_eq!(method.string("body").unwrap(), "return x;");
}

#[test]
fn java_round_trips_through_its_own_grammar() {
    let rule = java::root();
    let source = "package magma.app; import java.util.List; public class Main {int x = 1;}";
    let tree = rule.parse(source).unwrap();
    let regenerated = rule.generate(&tree).unwrap();
    assert_eq!(rule.parse(&regenerated).unwrap(), tree);
}

#[test]
fn translates_a_unit_to_typescript() {
    let source = "package magma.app; import java.util.List; public class Main {int x = 1; String s = \"a;b\";}";
    let output = translator()
        .compile_unit(&Unit::new("Main", source))
        .unwrap();

    assert_eq!(
        output,
        "import java.util.List;export class Main{let x : number = 1;let s : string = \"a;b\";}"
    );
}

#[test]
fn methods_translate_with_mapped_return_types() {
    let source = "public class Main {int x = 1; int getX() {return x;}}";
    let output = translator()
        .compile_unit(&Unit::new("Main", source))
        .unwrap();

    assert_eq!(
        output,
        "export class Main{let x : number = 1;getX() : number{return x;}}"
    );
}

#[test]
fn nested_classes_translate_recursively() {
    let source = "public class Outer {int x = 1; public class Inner {int y = 2;}}";
    let output = translator()
        .compile_unit(&Unit::new("Outer", source))
        .unwrap();

    assert_eq!(
        output,
        "export class Outer{let x : number = 1;export class Inner{let y : number = 2;}}"
    );
}

#[test]
fn translates_an_empty_class_body() {
    let output = translator()
        .compile_unit(&Unit::new("Empty", "public class Empty {}"))
        .unwrap();
    assert_eq!(output, "export class Empty{}");
}

#[test]
fn unsupported_segments_report_every_alternative() {
    let error = java::root().parse("public enum Kind {}").unwrap_err();
    let rendered = error.to_string();
    assert!(rendered.contains("Segment 0 failed"), "{rendered}");
    assert!(rendered.contains("No alternative matched"), "{rendered}");
}

#[test]
fn translated_output_parses_under_the_target_grammar() {
    let source = "public class Main {int x = 1;}";
    let output = translator().compile_unit(&Unit::new("Main", source)).unwrap();

    let tree = typescript::root().parse(&output).unwrap();
    let class = &tree.node_list("children").unwrap()[0];
    assert!(class.is("class"));
    assert_eq!(class.node_list("members").unwrap()[0].string("type").unwrap(), "number");
}

#[test]
fn failing_units_do_not_stop_their_siblings() {
    let units = vec![
        Unit::new("A", "public class A {}"),
        Unit::new("B", "interface B {}"),
        Unit::new("C", "public class C {}"),
    ];
    let results = compile_units(java::root(), transform::java_to_typescript(), &units);

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}
