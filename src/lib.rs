//! Calcmind: an incremental arithmetic expression builder
//!
//! Calcmind follows the "pure core, imperative shell" philosophy. The core
//! (expressions, evaluation, the session transition function) is composed of
//! pure functions with no side effects, while persistence of evaluation
//! history is isolated in an asynchronous shell.
//!
//! # Core Concepts
//!
//! - **Expression**: an alternating sequence of operands and operators
//! - **Evaluator**: strict left-to-right integer evaluation
//! - **Session**: the expression plus the history-view flag, advanced by events
//! - **CalculatorMachine**: applies events, talks to a `HistoryStore`, and
//!   emits `DisplayState`s
//!
//! # Example
//!
//! ```rust
//! use calcmind::builder::CalculatorBuilder;
//! use calcmind::core::{CalculatorEvent, DisplayState, Operator};
//! use calcmind::effects::MemoryHistoryStore;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let (mut calculator, mut states) = CalculatorBuilder::new()
//!     .store(MemoryHistoryStore::new())
//!     .build()
//!     .unwrap();
//!
//! calculator.dispatch(CalculatorEvent::AddOperand(3));
//! calculator.dispatch(CalculatorEvent::AddOperator(Operator::Multiply));
//! calculator.dispatch(CalculatorEvent::AddOperand(90));
//! calculator.dispatch(CalculatorEvent::Calculate);
//! calculator.settle().await;
//!
//! calculator.dispatch(CalculatorEvent::ToggleHistory);
//! calculator.settle().await;
//!
//! let states = states.drain();
//! assert_eq!(states[3], DisplayState::ShowResult(270));
//! assert!(matches!(&states[4], DisplayState::LoadedHistory(records) if records.len() == 1));
//! # });
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod effects;

// Re-export commonly used types
pub use builder::CalculatorBuilder;
pub use crate::core::{CalculatorEvent, DisplayState, Evaluator, Expression, HistoryRecord, Operator};
pub use effects::{CalculatorMachine, DisplayStates, HistoryStore, MemoryHistoryStore};
