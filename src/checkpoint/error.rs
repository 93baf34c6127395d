//! Checkpoint error types.

use crate::core::ExpressionError;
use thiserror::Error;

/// Errors that can occur while saving or restoring a session checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Checkpoint encoding failed: {0}")]
    SerializationFailed(String),

    #[error("Checkpoint decoding failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Checkpoint holds an invalid expression: {0}")]
    InvalidExpression(#[from] ExpressionError),
}
