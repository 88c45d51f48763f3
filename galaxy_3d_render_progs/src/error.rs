//! Error types for the Galaxy3D render program cache
//!
//! This module defines the error types used by the shader stores, the program
//! store, the builtin registry and the bind-state machine.

use std::fmt;
use crate::graphics_device::ShaderStage;

/// Result type for render program operations
pub type Result<T> = std::result::Result<T, Error>;

/// Render program errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Shader source is invalid or missing
    CompileFailed {
        stage: ShaderStage,
        name: String,
        message: String,
    },

    /// Program link failed (stage mismatch, driver failure)
    LinkFailed {
        program: String,
        message: String,
    },

    /// Explicit bind matched no registered program
    ProgramNotFound {
        vertex: String,
        fragment: String,
    },

    /// Builtin role never registered, index out of range, sentinel used for binding
    Configuration(String),

    /// Resource exists but is not usable (program not linked, shader not loaded)
    InvalidResource(String),

    /// Lifecycle misuse (operation before init, double init)
    InitializationFailed(String),

    /// Device-specific error not covered above
    BackendError(String),
}

impl Error {
    /// True for errors raised while compiling or linking
    pub fn is_build_failure(&self) -> bool {
        matches!(self, Error::CompileFailed { .. } | Error::LinkFailed { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CompileFailed { stage, name, message } => {
                write!(f, "Failed to compile {:?} shader '{}': {}", stage, name, message)
            }
            Error::LinkFailed { program, message } => {
                write!(f, "Failed to link program '{}': {}", program, message)
            }
            Error::ProgramNotFound { vertex, fragment } => {
                write!(f, "No program registered for vertex '{}' / fragment '{}'", vertex, fragment)
            }
            Error::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
