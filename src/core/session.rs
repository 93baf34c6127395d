//! The pure transition function of the calculator.
//!
//! A [`Session`] is the state owned by a calculator: the expression being
//! edited and whether the history view is open. [`Session::step`] maps an
//! event to the next session, the display state to emit right away, and the
//! store work the shell has to perform. Nothing here touches the store.

use super::evaluator::Evaluator;
use super::event::CalculatorEvent;
use super::expression::Expression;
use super::record::HistoryRecord;
use super::state::DisplayState;
use serde::{Deserialize, Serialize};

/// Store work requested by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreCommand {
    /// Persist a completed evaluation; completion emits nothing
    Save(HistoryRecord),
    /// Load all records; completion emits `LoadedHistory`
    Load,
}

/// Outcome of applying one event to a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub session: Session,
    pub emit: Option<DisplayState>,
    pub command: Option<StoreCommand>,
}

/// Calculator state: the current expression and the history flag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub expression: Expression,
    pub viewing_history: bool,
}

impl Session {
    pub fn new(expression: Expression, viewing_history: bool) -> Self {
        Self {
            expression,
            viewing_history,
        }
    }

    /// Apply an event.
    ///
    /// Editing and a successful evaluation close the history view; an
    /// evaluation that fails leaves the session untouched. Toggling the
    /// view on emits nothing immediately; the shell emits `LoadedHistory`
    /// once the requested load resolves.
    ///
    /// # Example
    ///
    /// ```rust
    /// use calcmind::core::{CalculatorEvent, DisplayState, Evaluator, Session, StoreCommand};
    ///
    /// let evaluator = Evaluator::new();
    /// let step = Session::default().step(CalculatorEvent::AddOperand(7), &evaluator);
    /// let step = step.session.step(CalculatorEvent::Calculate, &evaluator);
    ///
    /// assert_eq!(step.emit, Some(DisplayState::ShowResult(7)));
    /// assert!(matches!(step.command, Some(StoreCommand::Save(_))));
    /// ```
    pub fn step(&self, event: CalculatorEvent, evaluator: &Evaluator) -> Step {
        match event {
            CalculatorEvent::AddOperand(digits) => {
                self.edited(self.expression.append_operand(digits))
            }
            CalculatorEvent::AddOperator(operator) => {
                self.edited(self.expression.append_operator(operator))
            }
            CalculatorEvent::RemoveLast => self.edited(self.expression.remove_last()),
            CalculatorEvent::Calculate => self.calculate(evaluator),
            CalculatorEvent::ToggleHistory => self.toggle_history(),
        }
    }

    fn edited(&self, expression: Expression) -> Step {
        Step {
            emit: Some(DisplayState::ShowExpression(expression.clone())),
            session: Session::new(expression, false),
            command: None,
        }
    }

    fn calculate(&self, evaluator: &Evaluator) -> Step {
        match evaluator.evaluate_expression(&self.expression) {
            Ok(result) => Step {
                session: Session::new(Expression::from_value(result), false),
                emit: Some(DisplayState::ShowResult(result)),
                command: Some(StoreCommand::Save(HistoryRecord::new(
                    self.expression.clone(),
                    result,
                ))),
            },
            Err(error) => Step {
                session: self.clone(),
                emit: Some(DisplayState::from_evaluation_error(error)),
                command: None,
            },
        }
    }

    fn toggle_history(&self) -> Step {
        if self.viewing_history {
            Step {
                session: Session::new(self.expression.clone(), false),
                emit: Some(DisplayState::ShowExpression(self.expression.clone())),
                command: None,
            }
        } else {
            Step {
                session: Session::new(self.expression.clone(), true),
                emit: None,
                command: Some(StoreCommand::Load),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EvaluationError, Operator::*};
    use crate::expression;

    fn step(session: &Session, event: CalculatorEvent) -> Step {
        session.step(event, &Evaluator::new())
    }

    #[test]
    fn initial_session_is_empty_and_not_viewing() {
        let session = Session::default();
        assert!(session.expression.is_empty());
        assert!(!session.viewing_history);
    }

    #[test]
    fn operand_is_added_and_shown() {
        for digit in 1..=9 {
            let result = step(&Session::default(), CalculatorEvent::AddOperand(digit));
            let expected = Expression::from_value(i64::from(digit));

            assert_eq!(result.session.expression, expected);
            assert_eq!(result.emit, Some(DisplayState::ShowExpression(expected)));
            assert_eq!(result.command, None);
        }
    }

    #[test]
    fn operand_after_operand_concatenates() {
        let session = Session::new(expression![123], false);
        let result = step(&session, CalculatorEvent::AddOperand(9));
        assert_eq!(result.session.expression, expression![1239]);
    }

    #[test]
    fn repeated_operators_keep_the_last() {
        let mut session = Session::new(expression![1, Plus], false);
        for operator in [Minus, Plus, Divide, Multiply] {
            session = step(&session, CalculatorEvent::AddOperator(operator)).session;
        }
        assert_eq!(session.expression, expression![1, Multiply]);
    }

    #[test]
    fn remove_last_truncates_and_shows() {
        let session = Session::new(expression![1, Plus, 32], false);
        let result = step(&session, CalculatorEvent::RemoveLast);
        assert_eq!(
            result.emit,
            Some(DisplayState::ShowExpression(expression![1, Plus, 3]))
        );
    }

    #[test]
    fn editing_and_calculating_close_history_view() {
        let session = Session::new(expression![1, Plus, 2], true);
        for event in [
            CalculatorEvent::AddOperand(2),
            CalculatorEvent::AddOperator(Plus),
            CalculatorEvent::RemoveLast,
            CalculatorEvent::Calculate,
        ] {
            assert!(!step(&session, event).session.viewing_history);
        }
    }

    #[test]
    fn incomplete_calculation_leaves_session_unchanged() {
        for viewing_history in [false, true] {
            let session = Session::new(expression![3, Multiply, 90, Minus], viewing_history);
            let result = step(&session, CalculatorEvent::Calculate);

            assert_eq!(result.emit, Some(DisplayState::ShowIncompleteExpressionError));
            assert_eq!(result.session, session);
            assert_eq!(result.command, None);
        }
    }

    #[test]
    fn toggle_after_incomplete_calculation_closes_history_view() {
        let session = Session::new(expression![3, Multiply, 90, Minus], true);
        let calculated = step(&session, CalculatorEvent::Calculate).session;
        let toggled = step(&calculated, CalculatorEvent::ToggleHistory);

        assert_eq!(
            toggled.emit,
            Some(DisplayState::ShowExpression(expression![3, Multiply, 90, Minus]))
        );
        assert_eq!(toggled.command, None);
        assert!(!toggled.session.viewing_history);
    }

    #[test]
    fn calculation_shows_result_and_requests_save() {
        let session = Session::new(expression![11, Multiply, 3], false);
        let result = step(&session, CalculatorEvent::Calculate);

        assert_eq!(result.emit, Some(DisplayState::ShowResult(33)));
        assert_eq!(
            result.command,
            Some(StoreCommand::Save(HistoryRecord::new(
                expression![11, Multiply, 3],
                33
            )))
        );
        assert_eq!(result.session.expression, expression![33]);
    }

    #[test]
    fn result_seeds_next_edit() {
        let session = Session::new(expression![3, Multiply, 90], false);
        let calculated = step(&session, CalculatorEvent::Calculate).session;
        let edited = step(&calculated, CalculatorEvent::AddOperand(1)).session;
        assert_eq!(edited.expression, expression![2701]);
    }

    #[test]
    fn division_by_zero_is_reported_without_save() {
        let session = Session::new(expression![5, Divide, 0], true);
        let result = step(&session, CalculatorEvent::Calculate);

        assert_eq!(
            result.emit,
            Some(DisplayState::ShowEvaluationError(EvaluationError::DivisionByZero))
        );
        assert_eq!(result.session, session);
        assert_eq!(result.command, None);
    }

    #[test]
    fn toggle_on_requests_load_without_emitting() {
        let result = step(&Session::default(), CalculatorEvent::ToggleHistory);

        assert!(result.session.viewing_history);
        assert_eq!(result.emit, None);
        assert_eq!(result.command, Some(StoreCommand::Load));
    }

    #[test]
    fn toggle_off_shows_unchanged_expression() {
        let session = Session::new(expression![1, Plus, 32], true);
        let result = step(&session, CalculatorEvent::ToggleHistory);

        assert!(!result.session.viewing_history);
        assert_eq!(
            result.emit,
            Some(DisplayState::ShowExpression(expression![1, Plus, 32]))
        );
        assert_eq!(result.command, None);
    }

    #[test]
    fn remove_last_on_empty_is_idempotent() {
        let first = step(&Session::default(), CalculatorEvent::RemoveLast).session;
        let second = step(&first, CalculatorEvent::RemoveLast).session;
        assert_eq!(first, Session::default());
        assert_eq!(second, Session::default());
    }
}
