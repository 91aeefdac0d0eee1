//! Rewrite passes taking a Java-shaped tree to a TypeScript-shaped one.
//!
//! Pass order matters: `drop_packages` runs on the root before the visitors,
//! and `export_modifiers` must run before generation since the TS grammar
//! renders whatever modifier text is present.

use magma_compiler::{FnPass, Order, VisitPass};
use magma_node::Node;

/// Removes `package` declarations from the unit root; TS output has none.
pub fn drop_packages() -> FnPass {
    FnPass::new("drop-packages", |node: Node| {
        let kept: Option<Vec<Node>> = node.find_node_list("children").map(|children| {
            children
                .iter()
                .filter(|child| !child.is("package"))
                .cloned()
                .collect()
        });
        match kept {
            Some(children) => Ok(node.with_node_list("children", children)),
            None => Ok(node),
        }
    })
}

/// Rewrites the `public` modifier to `export` on every class.
pub fn export_modifiers() -> VisitPass {
    VisitPass::new("export-modifiers", Order::Pre, |node: Node| {
        if node.is("class") {
            if let Some(modifiers) = node.find_string("modifiers") {
                let rewritten = modifiers.replace("public", "export");
                return Ok(node.with_string("modifiers", rewritten));
            }
        }
        Ok(node)
    })
}

/// Maps Java primitive and well-known types onto their TS spellings, on both
/// field types and method return types.
pub fn map_primitive_types() -> VisitPass {
    VisitPass::new("map-primitive-types", Order::Pre, |node: Node| {
        if node.is("field") || node.is("method") {
            if let Some(java_type) = node.find_string("type") {
                let mapped = match java_type.trim() {
                    "int" | "long" | "double" | "float" => "number",
                    "String" | "char" => "string",
                    "boolean" => "boolean",
                    other => other,
                };
                let mapped = mapped.to_string();
                return Ok(node.with_string("type", mapped));
            }
        }
        Ok(node)
    })
}

/// The standard Java-to-TS pass list, in required order.
pub fn java_to_typescript() -> Vec<Box<dyn magma_compiler::Pass>> {
    vec![
        Box::new(drop_packages()),
        Box::new(export_modifiers()),
        Box::new(map_primitive_types()),
    ]
}
