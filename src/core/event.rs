//! Discrete user inputs.

use super::token::Operator;
use serde::{Deserialize, Serialize};

/// An input event applied to the calculator.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CalculatorEvent {
    /// Digit input, concatenated onto a trailing operand
    AddOperand(u32),
    AddOperator(Operator),
    RemoveLast,
    Calculate,
    ToggleHistory,
}

impl CalculatorEvent {
    /// Get the event's name for logging.
    pub fn name(&self) -> &str {
        match self {
            Self::AddOperand(_) => "AddOperand",
            Self::AddOperator(_) => "AddOperator",
            Self::RemoveLast => "RemoveLast",
            Self::Calculate => "Calculate",
            Self::ToggleHistory => "ToggleHistory",
        }
    }
}

impl From<Operator> for CalculatorEvent {
    fn from(operator: Operator) -> Self {
        Self::AddOperator(operator)
    }
}
