//! Tree rewrite passes.
//!
//! A pass is a pure `Node -> Result<Node, CompileError>` step. Passes run in a
//! fixed, caller-specified order; a later pass may rely on invariants an
//! earlier one established. [`VisitPass`] lifts a per-node function into a
//! depth-first traversal over node and node-list attributes.

use magma_common::CompileResult;
use magma_node::{Attribute, Node};
use std::sync::Arc;

pub trait Pass: Send + Sync {
    /// Name used in error wrapping and logs.
    fn name(&self) -> &str;

    fn run(&self, node: Node) -> CompileResult<Node>;
}

type NodeFn = dyn Fn(Node) -> CompileResult<Node> + Send + Sync;

/// A pass applied once, to the root node only.
pub struct FnPass {
    name: String,
    function: Box<NodeFn>,
}

impl FnPass {
    pub fn new(
        name: impl Into<String>,
        function: impl Fn(Node) -> CompileResult<Node> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            function: Box::new(function),
        }
    }
}

impl Pass for FnPass {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, node: Node) -> CompileResult<Node> {
        (self.function)(node)
    }
}

/// Whether the node function runs before or after its children are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Pre,
    Post,
}

/// Applies a node function at every node of the tree, depth-first.
///
/// Recursion covers node and node-list attributes only; other attribute
/// variants are leaves. A pass that needs to recurse into structure it has
/// itself just rewritten must do so explicitly inside its function.
pub struct VisitPass {
    name: String,
    order: Order,
    function: Arc<NodeFn>,
}

impl VisitPass {
    pub fn new(
        name: impl Into<String>,
        order: Order,
        function: impl Fn(Node) -> CompileResult<Node> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            order,
            function: Arc::new(function),
        }
    }

    fn visit(&self, node: Node) -> CompileResult<Node> {
        let node = match self.order {
            Order::Pre => (self.function)(node)?,
            Order::Post => node,
        };

        let mut rebuilt = node.clone();
        for (key, attribute) in node.attributes() {
            match attribute {
                Attribute::Node(child) => {
                    rebuilt = rebuilt.with_node(key, self.visit(child.clone())?);
                }
                Attribute::NodeList(children) => {
                    let visited: CompileResult<Vec<Node>> = children
                        .iter()
                        .map(|child| self.visit(child.clone()))
                        .collect();
                    rebuilt = rebuilt.with_node_list(key, visited?);
                }
                _ => {}
            }
        }

        match self.order {
            Order::Pre => Ok(rebuilt),
            Order::Post => (self.function)(rebuilt),
        }
    }
}

impl Pass for VisitPass {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, node: Node) -> CompileResult<Node> {
        self.visit(node)
    }
}
