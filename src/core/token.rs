//! Tokens: the atomic units of an expression.

use super::evaluator::EvaluationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A binary arithmetic operator.
///
/// # Example
///
/// ```rust
/// use calcmind::core::Operator;
///
/// assert_eq!(Operator::Minus.symbol(), "-");
/// assert_eq!("*".parse::<Operator>(), Ok(Operator::Multiply));
/// assert_eq!(Operator::Divide.apply(7, 2), Ok(3));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl Operator {
    /// All operators, in keypad order.
    pub const ALL: [Operator; 4] = [
        Operator::Plus,
        Operator::Minus,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// The symbol used for this operator in canonical text.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Apply the operator with checked integer arithmetic.
    ///
    /// Division truncates towards zero.
    pub fn apply(&self, lhs: i64, rhs: i64) -> Result<i64, EvaluationError> {
        let value = match self {
            Self::Plus => lhs.checked_add(rhs),
            Self::Minus => lhs.checked_sub(rhs),
            Self::Multiply => lhs.checked_mul(rhs),
            Self::Divide => {
                if rhs == 0 {
                    return Err(EvaluationError::DivisionByZero);
                }
                lhs.checked_div(rhs)
            }
        };
        value.ok_or(EvaluationError::Overflow)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when a symbol does not name an operator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operator symbol '{0}'")]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Plus),
            "-" => Ok(Self::Minus),
            "*" | "×" => Ok(Self::Multiply),
            "/" | "÷" => Ok(Self::Divide),
            other => Err(UnknownOperator(other.to_string())),
        }
    }
}

/// An operand or an operator.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Token {
    Operand(i64),
    Operator(Operator),
}

impl Token {
    pub fn is_operand(&self) -> bool {
        matches!(self, Self::Operand(_))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }
}

impl From<i64> for Token {
    fn from(value: i64) -> Self {
        Self::Operand(value)
    }
}

impl From<Operator> for Token {
    fn from(operator: Operator) -> Self {
        Self::Operator(operator)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand(value) => write!(f, "{value}"),
            Self::Operator(operator) => write!(f, "{operator}"),
        }
    }
}
