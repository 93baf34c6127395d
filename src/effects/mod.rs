//! Effectful calculator operations.
//!
//! This module provides the "imperative shell" around the pure core: the
//! history store contract and the machine that spawns store work and feeds
//! its results back into the single-writer session.
//!
//! # Key Concepts
//!
//! - **HistoryStore**: asynchronous save/load of history records
//! - **CalculatorMachine**: applies events, emits display states
//! - **DisplayStates**: one-shot consumption stream of emitted states

mod machine;
mod store;

pub use machine::{CalculatorMachine, DisplayStates};
pub use store::{HistoryStore, MemoryHistoryStore, StoreError, StoredRecord};
