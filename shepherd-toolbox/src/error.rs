//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Toolbox error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ToolboxError {
    /// Invalid input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Transport or resolver failure
    #[error("Network error: {0}")]
    NetworkError(String),

    /// No answer within the time budget
    #[error("Timed out after {0}s")]
    Timeout(u64),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

/// Toolbox Result type alias
pub type ToolboxResult<T> = std::result::Result<T, ToolboxError>;
