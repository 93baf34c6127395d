//! Completed evaluations eligible for persistence.

use super::expression::Expression;
use serde::{Deserialize, Serialize};

/// An immutable pairing of a completed expression and its result.
///
/// Records are created only when an evaluation succeeds and are persisted
/// by value.
///
/// # Example
///
/// ```rust
/// use calcmind::core::{Expression, HistoryRecord, Operator};
///
/// let expression = Expression::empty()
///     .append_operand(11)
///     .append_operator(Operator::Multiply)
///     .append_operand(3);
/// let record = HistoryRecord::new(expression, 33);
///
/// assert_eq!(record.to_string(), "11 * 3 = 33");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// The expression as it stood when evaluated
    pub expression: Expression,
    /// The evaluated value
    pub result: i64,
}

impl HistoryRecord {
    pub fn new(expression: Expression, result: i64) -> Self {
        Self { expression, result }
    }
}

impl std::fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operator::*;
    use crate::expression;

    #[test]
    fn record_equality_is_structural() {
        let a = HistoryRecord::new(expression![1, Plus, 32], 33);
        let b = HistoryRecord::new(expression![1, Plus, 32], 33);
        let c = HistoryRecord::new(expression![1, Plus, 32], 34);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn record_serializes_correctly() {
        let record = HistoryRecord::new(expression![3, Multiply, 90], 270);
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: HistoryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
