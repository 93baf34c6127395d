//! Display states emitted by the calculator.
//!
//! Exactly one display state is current at any time from an observer's
//! point of view; variants are never composed.

use super::evaluator::EvaluationError;
use super::expression::Expression;
use super::record::HistoryRecord;
use serde::{Deserialize, Serialize};

/// A renderable outcome of handling an event.
///
/// # Example
///
/// ```rust
/// use calcmind::core::DisplayState;
///
/// let state = DisplayState::ShowResult(270);
/// assert_eq!(state.name(), "ShowResult");
/// assert!(!state.is_error());
/// assert!(DisplayState::ShowIncompleteExpressionError.is_error());
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DisplayState {
    /// The expression being edited
    ShowExpression(Expression),

    /// The value of a successful evaluation
    ShowResult(i64),

    /// Evaluation was requested on an expression ending in an operator
    ShowIncompleteExpressionError,

    /// A snapshot of the history store
    LoadedHistory(Vec<HistoryRecord>),

    /// Evaluation hit a domain error such as division by zero
    ShowEvaluationError(EvaluationError),

    /// The history store could not be read
    HistoryUnavailable { reason: String },
}

impl DisplayState {
    /// Get the variant name for display/logging.
    pub fn name(&self) -> &str {
        match self {
            Self::ShowExpression(_) => "ShowExpression",
            Self::ShowResult(_) => "ShowResult",
            Self::ShowIncompleteExpressionError => "ShowIncompleteExpressionError",
            Self::LoadedHistory(_) => "LoadedHistory",
            Self::ShowEvaluationError(_) => "ShowEvaluationError",
            Self::HistoryUnavailable { .. } => "HistoryUnavailable",
        }
    }

    /// Check if this state reports a failure to the user.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::ShowIncompleteExpressionError
                | Self::ShowEvaluationError(_)
                | Self::HistoryUnavailable { .. }
        )
    }

    /// Map an evaluation failure onto the state that reports it.
    pub fn from_evaluation_error(error: EvaluationError) -> Self {
        match error {
            EvaluationError::Incomplete => Self::ShowIncompleteExpressionError,
            other => Self::ShowEvaluationError(other),
        }
    }
}
