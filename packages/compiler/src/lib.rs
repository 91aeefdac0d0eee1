pub mod pass;
pub mod pipeline;
pub mod unit;

pub use pass::{FnPass, Order, Pass, VisitPass};
pub use pipeline::{compile_units, generate_unit, parse_unit, run_passes, Compiler};
pub use unit::Unit;
