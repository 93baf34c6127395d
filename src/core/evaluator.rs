//! Left-to-right integer evaluation of canonical expression text.

use super::expression::Expression;
use super::token::Operator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons an evaluation produces no value.
///
/// `Incomplete` is an expected outcome of evaluating partial input; the
/// remaining variants are domain errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum EvaluationError {
    #[error("Expression is incomplete")]
    Incomplete,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Integer overflow")]
    Overflow,

    #[error("Malformed expression text: {0}")]
    Malformed(String),
}

impl EvaluationError {
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete)
    }
}

/// Evaluates canonical expression text strictly left to right.
///
/// There is no operator precedence: `1 + 2 * 3` is `(1 + 2) * 3`.
///
/// # Example
///
/// ```rust
/// use calcmind::core::{EvaluationError, Evaluator};
///
/// let evaluator = Evaluator::new();
///
/// assert_eq!(evaluator.evaluate("1 + 2 * 3"), Ok(9));
/// assert_eq!(evaluator.evaluate("3 * 90 -"), Err(EvaluationError::Incomplete));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate whitespace-separated canonical text.
    ///
    /// Text that is empty or ends in an operator is `Incomplete`, whatever
    /// precedes the dangling operator.
    pub fn evaluate(&self, text: &str) -> Result<i64, EvaluationError> {
        match text.split_whitespace().last() {
            None => return Err(EvaluationError::Incomplete),
            Some(last) if last.parse::<Operator>().is_ok() => {
                return Err(EvaluationError::Incomplete)
            }
            Some(_) => {}
        }

        let mut words = text.split_whitespace();
        let Some(first) = words.next() else {
            return Err(EvaluationError::Incomplete);
        };
        let mut accumulator = parse_operand(first)?;

        while let Some(word) = words.next() {
            let operator: Operator = word.parse().map_err(|_| {
                EvaluationError::Malformed(format!("expected operator, found '{word}'"))
            })?;
            let Some(next) = words.next() else {
                return Err(EvaluationError::Incomplete);
            };
            accumulator = operator.apply(accumulator, parse_operand(next)?)?;
        }

        Ok(accumulator)
    }

    /// Evaluate an expression through its canonical text.
    pub fn evaluate_expression(&self, expression: &Expression) -> Result<i64, EvaluationError> {
        self.evaluate(&expression.to_string())
    }
}

fn parse_operand(word: &str) -> Result<i64, EvaluationError> {
    if word.parse::<Operator>().is_ok() {
        return Err(EvaluationError::Malformed(format!(
            "expected operand, found operator '{word}'"
        )));
    }
    word.parse::<i64>().map_err(|e| match e.kind() {
        std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow => {
            EvaluationError::Overflow
        }
        _ => EvaluationError::Malformed(format!("expected operand, found '{word}'")),
    })
}
