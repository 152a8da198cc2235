//! Error types for the Holoface engine
//!
//! This module defines the error types used throughout the engine,
//! including rendering, initialization, and frame read-back.

use std::fmt;

/// Result type for Holoface engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Holoface engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (software rasterizer, GPU backend, etc.)
    BackendError(String),

    /// Out of memory
    OutOfMemory,

    /// Invalid resource (texture, buffer, pipeline, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, device, face renderer)
    InitializationFailed(String),

    /// Read-back destination has the wrong length
    OutputBufferSize { expected: usize, actual: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::OutputBufferSize { expected, actual } => write!(
                f,
                "Output buffer size mismatch: expected {} bytes, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
