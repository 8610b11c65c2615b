//! Global error handling for ctxdump
//!
//! Only an invalid target directory aborts a run. Per-directory and per-file
//! failures degrade to markers inside the report and never surface here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for ctxdump operations
#[derive(Error, Debug)]
pub enum CtxError {
    /// Target path missing or not a directory
    #[error("Invalid target directory: {}", .0.display())]
    Path(PathBuf),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Specialized Result type for ctxdump operations
pub type Result<T> = std::result::Result<T, CtxError>;
