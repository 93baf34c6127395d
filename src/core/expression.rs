//! The expression value model.
//!
//! An [`Expression`] is an immutable, strictly alternating sequence of
//! operands and operators. Every mutation returns a new value.

use super::token::{Operator, Token};
use serde::{Deserialize, Serialize};
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A way in which a token list breaks the expression invariants.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExpressionViolation {
    #[error("expression starts with operator '{operator}'")]
    LeadingOperator { operator: Operator },

    #[error("adjacent operands at position {position}")]
    AdjacentOperands { position: usize },

    #[error("adjacent operators at position {position}")]
    AdjacentOperators { position: usize },
}

/// Error returned when a token list cannot form an expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error("Malformed expression: {}", describe(.violations))]
    Malformed { violations: Vec<ExpressionViolation> },
}

fn describe(violations: &[ExpressionViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// An ordered, alternating sequence of tokens.
///
/// The canonical text (via [`fmt::Display`]) separates tokens with single
/// spaces and is what the evaluator consumes.
///
/// # Example
///
/// ```rust
/// use calcmind::core::{Expression, Operator};
///
/// let expression = Expression::empty()
///     .append_operand(1)
///     .append_operand(2)
///     .append_operator(Operator::Plus)
///     .append_operator(Operator::Minus)
///     .append_operand(3);
///
/// assert_eq!(expression.to_string(), "12 - 3");
/// assert!(expression.is_complete());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Token>", into = "Vec<Token>")]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    /// The empty expression.
    pub fn empty() -> Self {
        Self { tokens: Vec::new() }
    }

    /// A single-operand expression, used to re-seed after an evaluation.
    pub fn from_value(value: i64) -> Self {
        Self {
            tokens: vec![Token::Operand(value)],
        }
    }

    /// Build an expression from raw tokens, accumulating every violation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use calcmind::core::{Expression, Operator, Token};
    /// use stillwater::validation::Validation;
    ///
    /// let tokens = vec![
    ///     Token::Operator(Operator::Plus),
    ///     Token::Operand(1),
    ///     Token::Operand(2),
    /// ];
    ///
    /// match Expression::from_tokens(tokens) {
    ///     Validation::Failure(violations) => assert_eq!(violations.len(), 2),
    ///     Validation::Success(_) => panic!("tokens do not alternate"),
    /// }
    /// ```
    pub fn from_tokens(
        tokens: Vec<Token>,
    ) -> Validation<Expression, NonEmptyVec<ExpressionViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ExpressionViolation>>> = Vec::new();

        if let Some(Token::Operator(operator)) = tokens.first() {
            checks.push(Validation::fail(ExpressionViolation::LeadingOperator {
                operator: *operator,
            }));
        }

        for (index, pair) in tokens.windows(2).enumerate() {
            let position = index + 1;
            let check = match (pair[0], pair[1]) {
                (Token::Operand(_), Token::Operand(_)) => {
                    Validation::fail(ExpressionViolation::AdjacentOperands { position })
                }
                (Token::Operator(_), Token::Operator(_)) => {
                    Validation::fail(ExpressionViolation::AdjacentOperators { position })
                }
                _ => Validation::success(()),
            };
            checks.push(check);
        }

        match Validation::all_vec(checks) {
            Validation::Success(_) => Validation::Success(Expression { tokens }),
            Validation::Failure(violations) => Validation::Failure(violations),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True when non-empty and ending in an operand.
    pub fn is_complete(&self) -> bool {
        matches!(self.tokens.last(), Some(Token::Operand(_)))
    }

    /// Append digit input.
    ///
    /// A trailing operand absorbs the input by decimal concatenation
    /// (`12` then `3` gives `123`; a negative operand grows away from zero).
    /// Input that would overflow `i64` leaves the expression unchanged.
    pub fn append_operand(&self, digits: u32) -> Self {
        match self.tokens.last() {
            Some(Token::Operand(value)) => match concatenate(*value, digits) {
                Some(merged) => self.with_last(Token::Operand(merged)),
                None => self.clone(),
            },
            _ => self.with_pushed(Token::Operand(i64::from(digits))),
        }
    }

    /// Append an operator.
    ///
    /// A trailing operator is replaced. On an empty expression this is a
    /// no-op: an expression never starts with an operator.
    pub fn append_operator(&self, operator: Operator) -> Self {
        match self.tokens.last() {
            None => self.clone(),
            Some(Token::Operator(_)) => self.with_last(Token::Operator(operator)),
            Some(Token::Operand(_)) => self.with_pushed(Token::Operator(operator)),
        }
    }

    /// Undo the last input.
    ///
    /// A multi-digit operand loses its last digit; any other token is
    /// dropped. Removing from the empty expression is a no-op.
    pub fn remove_last(&self) -> Self {
        match self.tokens.last() {
            None => self.clone(),
            Some(Token::Operand(value)) if value / 10 != 0 => {
                self.with_last(Token::Operand(value / 10))
            }
            Some(_) => Self {
                tokens: self.tokens[..self.tokens.len() - 1].to_vec(),
            },
        }
    }

    fn with_last(&self, token: Token) -> Self {
        let mut tokens = self.tokens.clone();
        if let Some(last) = tokens.last_mut() {
            *last = token;
        }
        Self { tokens }
    }

    fn with_pushed(&self, token: Token) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.push(token);
        Self { tokens }
    }
}

fn concatenate(value: i64, digits: u32) -> Option<i64> {
    let width = digits.checked_ilog10().map_or(1, |log| log + 1);
    let shifted = value.checked_mul(10i64.checked_pow(width)?)?;
    if value < 0 {
        shifted.checked_sub(i64::from(digits))
    } else {
        shifted.checked_add(i64::from(digits))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Token>> for Expression {
    type Error = ExpressionError;

    fn try_from(tokens: Vec<Token>) -> Result<Self, Self::Error> {
        match Expression::from_tokens(tokens) {
            Validation::Success(expression) => Ok(expression),
            Validation::Failure(violations) => Err(ExpressionError::Malformed {
                violations: violations.iter().cloned().collect(),
            }),
        }
    }
}

impl From<Expression> for Vec<Token> {
    fn from(expression: Expression) -> Self {
        expression.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operator::*;
    use crate::expression;

    #[test]
    fn digits_accumulate_into_one_operand() {
        let expression = Expression::empty()
            .append_operand(1)
            .append_operand(2)
            .append_operand(3);

        assert_eq!(expression, expression![123]);
    }

    #[test]
    fn multi_digit_input_concatenates_decimally() {
        assert_eq!(expression![12].append_operand(345), expression![12345]);
        assert_eq!(expression![7].append_operand(0), expression![70]);
    }

    #[test]
    fn negative_operand_grows_away_from_zero() {
        assert_eq!(Expression::from_value(-2).append_operand(5), expression![-25]);
    }

    #[test]
    fn overflowing_digit_input_is_ignored() {
        let expression = Expression::from_value(i64::MAX);
        assert_eq!(expression.append_operand(1), expression);
    }

    #[test]
    fn operand_after_operator_starts_new_token() {
        assert_eq!(expression![1, Plus].append_operand(9), expression![1, Plus, 9]);
    }

    #[test]
    fn operator_follows_operand() {
        for operator in Operator::ALL {
            assert_eq!(expression![1].append_operator(operator), expression![1, operator]);
        }
    }

    #[test]
    fn last_operator_wins() {
        let expression = expression![1]
            .append_operator(Plus)
            .append_operator(Minus);

        assert_eq!(expression, expression![1, Minus]);
    }

    #[test]
    fn operator_on_empty_is_ignored() {
        assert_eq!(Expression::empty().append_operator(Plus), Expression::empty());
    }

    #[test]
    fn remove_last_truncates_multi_digit_operand() {
        assert_eq!(expression![1, Plus, 32].remove_last(), expression![1, Plus, 3]);
        assert_eq!(Expression::from_value(-25).remove_last(), expression![-2]);
    }

    #[test]
    fn remove_last_drops_single_digit_operand() {
        assert_eq!(expression![1, Plus, 3].remove_last(), expression![1, Plus]);
        assert_eq!(expression![-4].remove_last(), Expression::empty());
    }

    #[test]
    fn remove_last_drops_operator() {
        assert_eq!(expression![1, Plus].remove_last(), expression![1]);
    }

    #[test]
    fn remove_last_on_empty_is_identity() {
        let empty = Expression::empty();
        assert_eq!(empty.remove_last(), empty);
        assert_eq!(empty.remove_last().remove_last(), empty);
    }

    #[test]
    fn completeness_requires_trailing_operand() {
        assert!(!Expression::empty().is_complete());
        assert!(!expression![3, Multiply, 90, Minus].is_complete());
        assert!(expression![3, Multiply, 90].is_complete());
    }

    #[test]
    fn canonical_text_is_space_separated() {
        assert_eq!(expression![3, Multiply, 90, Minus].to_string(), "3 * 90 -");
        assert_eq!(Expression::empty().to_string(), "");
    }

    #[test]
    fn mutations_leave_original_untouched() {
        let original = expression![1, Plus];
        let _ = original.append_operand(2);
        let _ = original.remove_last();
        assert_eq!(original, expression![1, Plus]);
    }

    #[test]
    fn from_tokens_accumulates_all_violations() {
        let tokens = vec![
            Token::Operator(Plus),
            Token::Operand(1),
            Token::Operand(2),
            Token::Operator(Minus),
            Token::Operator(Divide),
        ];

        match Expression::from_tokens(tokens) {
            Validation::Failure(violations) => {
                let violations: Vec<_> = violations.iter().cloned().collect();
                assert_eq!(
                    violations,
                    vec![
                        ExpressionViolation::LeadingOperator { operator: Plus },
                        ExpressionViolation::AdjacentOperands { position: 2 },
                        ExpressionViolation::AdjacentOperators { position: 4 },
                    ]
                );
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn try_from_accepts_alternating_tokens() {
        let expression =
            Expression::try_from(vec![Token::Operand(1), Token::Operator(Plus)]).unwrap();
        assert_eq!(expression.len(), 2);
    }

    #[test]
    fn deserialization_rejects_broken_invariant() {
        let json = r#"[{"Operand":1},{"Operand":2}]"#;
        let result: Result<Expression, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn expression_serializes_correctly() {
        let expression = expression![11, Multiply, 3];
        let json = serde_json::to_string(&expression).unwrap();
        let deserialized: Expression = serde_json::from_str(&json).unwrap();
        assert_eq!(expression, deserialized);
    }
}
