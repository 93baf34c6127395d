//! Keypad Session
//!
//! This example drives a calculator from a keypad script.
//!
//! Key concepts:
//! - Events sent over a channel to the machine's run loop
//! - Display states consumed once from the display stream
//! - History saved and loaded through an async store
//!
//! Keys: digits, `+ - * /`, `<` (delete), `=` (calculate), `h` (history)
//!
//! Run with: cargo run --example session -- "12+3*4=h"
//! Set RUST_LOG=calcmind=debug to see the machine's tracing output.

use calcmind::builder::CalculatorBuilder;
use calcmind::core::{CalculatorEvent, DisplayState, Operator};
use calcmind::effects::{HistoryStore, MemoryHistoryStore};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

fn key_to_event(key: char) -> Option<CalculatorEvent> {
    match key {
        '0'..='9' => key.to_digit(10).map(CalculatorEvent::AddOperand),
        '<' => Some(CalculatorEvent::RemoveLast),
        '=' => Some(CalculatorEvent::Calculate),
        'h' => Some(CalculatorEvent::ToggleHistory),
        other => other
            .to_string()
            .parse::<Operator>()
            .ok()
            .map(CalculatorEvent::AddOperator),
    }
}

fn render(state: &DisplayState) -> String {
    match state {
        DisplayState::ShowExpression(expression) => format!("[{expression}]"),
        DisplayState::ShowResult(result) => format!("= {result}"),
        DisplayState::ShowIncompleteExpressionError => "incomplete expression".to_string(),
        DisplayState::ShowEvaluationError(error) => format!("error: {error}"),
        DisplayState::LoadedHistory(records) if records.is_empty() => "history: (empty)".to_string(),
        DisplayState::LoadedHistory(records) => records
            .iter()
            .map(|record| format!("history: {record}"))
            .collect::<Vec<_>>()
            .join("\n  "),
        DisplayState::HistoryUnavailable { reason } => format!("history unavailable: {reason}"),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let script = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "12+3*4=<5h h9/0=".to_string());

    println!("=== Keypad Session ===\n");
    println!("Script: {script}\n");

    let store = Arc::new(MemoryHistoryStore::new());
    let (machine, mut states) = CalculatorBuilder::new()
        .shared_store(store.clone())
        .build()
        .expect("store is set");
    let (events, receiver) = mpsc::channel(16);

    let driver = tokio::spawn(machine.run(receiver));

    for key in script.chars().filter(|c| !c.is_whitespace()) {
        match key_to_event(key) {
            Some(event) => {
                println!("  [Key] {key}");
                events.send(event).await.expect("machine is running");
            }
            None => println!("  [Key] {key} (ignored)"),
        }
    }
    drop(events);

    while let Some(state) = states.next().await {
        println!("  [Display] {}", render(&state));
    }
    driver.await.expect("machine task completed");

    let saved = store.load().await.unwrap_or_default();
    println!("\n{} record(s) in history", saved.len());
    for entry in store.entries().await {
        println!("  #{} at {}: {}", entry.id, entry.saved_at.format("%H:%M:%S"), entry.record);
    }
}
