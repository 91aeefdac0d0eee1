//! The pipeline orchestrator.
//!
//! For each unit: parse with the configured root rule, run the rewrite passes
//! in order, generate with the root rule. Units are independent — one unit's
//! failure never aborts another's processing, and results come back in input
//! order. Rules and passes are pure over immutable values, so a caller may
//! shard units across threads without extra synchronization; the shipped
//! implementation iterates sequentially.

use crate::pass::Pass;
use crate::unit::Unit;
use magma_common::{CompileResult, SourceContext};
use magma_node::Node;
use magma_rules::Rule;
use tracing::{debug, warn};

/// Parse one unit's source with the root rule.
pub fn parse_unit(rule: &dyn Rule, source: &str) -> CompileResult<Node> {
    rule.parse(source)
}

/// Run the passes over a tree in order, wrapping a failure with the name of
/// the pass that produced it.
pub fn run_passes(node: Node, passes: &[Box<dyn Pass>]) -> CompileResult<Node> {
    let mut current = node;
    for pass in passes {
        debug!(pass = pass.name(), "running pass");
        current = pass
            .run(current)
            .map_err(|error| error.wrap(format!("Pass '{}' failed", pass.name())))?;
    }
    Ok(current)
}

/// Render a tree back to text with the root rule.
pub fn generate_unit(rule: &dyn Rule, node: &Node) -> CompileResult<String> {
    rule.generate(node)
}

/// A configured pipeline: a root rule, an ordered pass list, and optionally a
/// distinct target rule for the generate direction (source-to-source use).
pub struct Compiler {
    root: std::sync::Arc<dyn Rule>,
    target: Option<std::sync::Arc<dyn Rule>>,
    passes: Vec<Box<dyn Pass>>,
}

impl Compiler {
    pub fn new(root: std::sync::Arc<dyn Rule>) -> Self {
        Self {
            root,
            target: None,
            passes: Vec::new(),
        }
    }

    /// Generate through a different grammar than the one used to parse.
    pub fn with_target(mut self, target: std::sync::Arc<dyn Rule>) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_pass(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Compile a single unit end to end.
    pub fn compile_unit(&self, unit: &Unit) -> CompileResult<String> {
        let span = tracing::debug_span!("compile_unit", unit = %unit.name);
        let _guard = span.enter();

        let parsed = parse_unit(self.root.as_ref(), &unit.source).map_err(|error| {
            error.wrap_at(
                format!("Failed to parse unit '{}'", unit.name),
                SourceContext::new(unit.source.as_str()),
            )
        })?;
        let rewritten = run_passes(parsed, &self.passes)?;
        let target = self.target.as_ref().unwrap_or(&self.root);
        generate_unit(target.as_ref(), &rewritten).map_err(|error| {
            error.wrap_at(
                format!("Failed to generate unit '{}'", unit.name),
                SourceContext::new(unit.source.as_str()),
            )
        })
    }

    /// Compile every unit, collecting one result per unit in input order.
    ///
    /// A failed unit is recorded and processing continues with its siblings.
    pub fn compile_units(&self, units: &[Unit]) -> Vec<CompileResult<String>> {
        units
            .iter()
            .map(|unit| {
                let result = self.compile_unit(unit);
                match &result {
                    Ok(output) => {
                        debug!(unit = %unit.name, bytes = output.len(), "unit compiled")
                    }
                    Err(error) => {
                        warn!(unit = %unit.name, depth = error.depth(), "unit failed")
                    }
                }
                result
            })
            .collect()
    }
}

/// Convenience form of [`Compiler::compile_units`] for a root rule and a pass
/// list assembled by the caller.
pub fn compile_units(
    root: std::sync::Arc<dyn Rule>,
    passes: Vec<Box<dyn Pass>>,
    units: &[Unit],
) -> Vec<CompileResult<String>> {
    let mut compiler = Compiler::new(root);
    compiler.passes = passes;
    compiler.compile_units(units)
}
