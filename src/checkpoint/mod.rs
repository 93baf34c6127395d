//! Checkpoint and resume for calculator sessions.
//!
//! A checkpoint captures the expression being edited and the history flag so
//! a calculator can be rebuilt after a restart. History records themselves
//! belong to the store and are not part of a checkpoint.

use crate::core::{Expression, Session, Token};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a calculator session.
///
/// The expression is kept as raw tokens and re-validated on restore, so a
/// tampered or truncated checkpoint reports every broken invariant.
///
/// # Example
///
/// ```rust
/// use calcmind::checkpoint::Checkpoint;
/// use calcmind::core::{Expression, Session};
///
/// let session = Session::new(Expression::from_value(12), false);
/// let checkpoint = Checkpoint::capture(&session);
///
/// let json = checkpoint.to_json().unwrap();
/// let restored = Checkpoint::from_json(&json).unwrap().restore().unwrap();
///
/// assert_eq!(restored, session);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Tokens of the expression being edited
    pub expression: Vec<Token>,

    /// Whether the history view was open
    pub viewing_history: bool,
}

impl Checkpoint {
    /// Snapshot a session.
    pub fn capture(session: &Session) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            expression: session.expression.tokens().to_vec(),
            viewing_history: session.viewing_history,
        }
    }

    /// Rebuild the session, checking version and expression invariants.
    pub fn restore(&self) -> Result<Session, CheckpointError> {
        if self.version == 0 || self.version > CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        let expression: Expression = self.expression.clone().try_into()?;
        Ok(Session::new(expression, self.viewing_history))
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}
