//! Core calculator types and logic.
//!
//! This module contains the pure functional core of the calculator:
//! - Tokens and the alternating `Expression` value
//! - The left-to-right `Evaluator`
//! - `HistoryRecord`, `DisplayState` and `CalculatorEvent` values
//! - The `Session` transition function
//!
//! All logic in this module is pure (no side effects), following
//! the "pure core, imperative shell" philosophy.

mod evaluator;
mod event;
mod expression;
mod record;
mod session;
mod state;
mod token;

pub use evaluator::{EvaluationError, Evaluator};
pub use event::CalculatorEvent;
pub use expression::{Expression, ExpressionError, ExpressionViolation};
pub use record::HistoryRecord;
pub use session::{Session, Step, StoreCommand};
pub use state::DisplayState;
pub use token::{Operator, Token, UnknownOperator};
