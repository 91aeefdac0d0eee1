use crate::error::CompileError;

/// Result alias used throughout the toolchain.
pub type CompileResult<T> = Result<T, CompileError>;
