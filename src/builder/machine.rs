//! Builder for constructing calculators.

use crate::builder::error::BuildError;
use crate::core::{Evaluator, Expression, Session};
use crate::effects::{CalculatorMachine, DisplayStates, HistoryStore};
use std::sync::Arc;

/// Builder for constructing a [`CalculatorMachine`] with a fluent API.
///
/// Only the store is required. The expression defaults to empty and the
/// history view to closed.
///
/// # Example
///
/// ```rust
/// use calcmind::builder::CalculatorBuilder;
/// use calcmind::core::Expression;
/// use calcmind::effects::MemoryHistoryStore;
///
/// let (machine, _states) = CalculatorBuilder::new()
///     .store(MemoryHistoryStore::new())
///     .expression(Expression::from_value(42))
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.expression(), &Expression::from_value(42));
/// assert!(!machine.is_viewing_history());
/// ```
#[derive(Default)]
pub struct CalculatorBuilder {
    store: Option<Arc<dyn HistoryStore>>,
    session: Session,
    evaluator: Evaluator,
}

impl CalculatorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the history store (required).
    pub fn store<S: HistoryStore + 'static>(self, store: S) -> Self {
        self.shared_store(Arc::new(store))
    }

    /// Set a history store shared with other owners.
    pub fn shared_store(mut self, store: Arc<dyn HistoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the starting expression.
    pub fn expression(mut self, expression: Expression) -> Self {
        self.session.expression = expression;
        self
    }

    /// Start with the history view open or closed.
    pub fn viewing_history(mut self, viewing: bool) -> Self {
        self.session.viewing_history = viewing;
        self
    }

    /// Start from a whole session, e.g. one restored from a checkpoint.
    pub fn session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Build the calculator and its display stream.
    /// Returns an error if no store was given.
    pub fn build(self) -> Result<(CalculatorMachine, DisplayStates), BuildError> {
        let store = self.store.ok_or(BuildError::MissingStore)?;
        Ok(CalculatorMachine::with_session(
            self.session,
            self.evaluator,
            store,
        ))
    }
}
