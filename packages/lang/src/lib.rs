//! Grammar configuration for the Magma engine.
//!
//! Nothing here extends the engine; these modules only assemble rule graphs
//! and pass lists. The Java-flavoured grammar covers enough surface to
//! exercise every combinator; the TypeScript-flavoured grammar renders the
//! same tree shape as target text.

pub mod builders;
pub mod java;
pub mod transform;
pub mod typescript;

#[cfg(test)]
mod tests_translate;
