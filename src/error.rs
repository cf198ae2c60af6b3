//! Error handling module for screenctl
//!
//! Provides centralized error handling with proper error types using thiserror.
//! All errors in the application should use these types for consistency.

use thiserror::Error;

/// Main error type for screenctl
#[derive(Error, Debug)]
pub enum SetupError {
    /// IO errors (file operations, spawning commands)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (settings values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// An external command exited non-zero
    #[error("Step '{step}' failed with exit code {code}")]
    Command { step: String, code: i32 },

    /// Pre-flight environment check failed
    #[error("Environment error: {0}")]
    Environment(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for screenctl operations
pub type Result<T> = std::result::Result<T, SetupError>;

// Convenient error constructors
impl SetupError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a command failure error for a named step
    pub fn command(step: impl Into<String>, code: i32) -> Self {
        Self::Command {
            step: step.into(),
            code,
        }
    }

    /// Create an environment error
    pub fn environment(msg: impl Into<String>) -> Self {
        Self::Environment(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }

    /// Process exit code this error should propagate.
    ///
    /// Command failures surface the underlying tool's exit code unchanged
    /// (fail-fast shell semantics); everything else exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Command { code, .. } => *code,
            _ => 1,
        }
    }
}
