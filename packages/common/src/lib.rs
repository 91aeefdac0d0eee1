pub mod context;
pub mod error;
pub mod result;

pub use context::SourceContext;
pub use error::CompileError;
pub use result::CompileResult;
