//! Calculator state machine that performs store effects.

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{
    CalculatorEvent, DisplayState, Evaluator, Expression, HistoryRecord, Session, StoreCommand,
};
use crate::effects::store::{HistoryStore, StoreError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

/// Stream of display states emitted by a [`CalculatorMachine`].
///
/// Each state is delivered once and consumed on receipt; nothing is
/// replayed.
#[derive(Debug)]
pub struct DisplayStates {
    receiver: mpsc::UnboundedReceiver<DisplayState>,
}

impl DisplayStates {
    /// Wait for the next state. Returns `None` once the machine is gone
    /// and every state has been consumed.
    pub async fn next(&mut self) -> Option<DisplayState> {
        self.receiver.recv().await
    }

    /// Take the next state if one is already buffered.
    pub fn try_next(&mut self) -> Option<DisplayState> {
        self.receiver.try_recv().ok()
    }

    /// Take every state buffered so far.
    pub fn drain(&mut self) -> Vec<DisplayState> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

/// Outcome of a store task, folded back by the machine.
#[derive(Debug)]
enum Completion {
    Saved(Result<(), StoreError>),
    Loaded {
        generation: u64,
        result: Result<Vec<HistoryRecord>, StoreError>,
    },
}

/// Calculator that owns a [`Session`] and talks to a [`HistoryStore`].
///
/// Events are applied through `&mut self`, so a single owner serializes
/// them. Store operations run as Tokio tasks held by the machine; their
/// results only touch the session when the owner folds them back with
/// [`next_completion`](Self::next_completion), [`settle`](Self::settle) or
/// [`run`](Self::run). Dropping the machine aborts any operation still in
/// flight.
///
/// A toggle-on emits `LoadedHistory` only when its load resolves, and only
/// if it is still the latest toggle-on and the history view is still open.
///
/// # Example
///
/// ```rust
/// use calcmind::core::{CalculatorEvent, DisplayState, Operator};
/// use calcmind::effects::{CalculatorMachine, MemoryHistoryStore};
/// use std::sync::Arc;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let (mut machine, mut states) = CalculatorMachine::new(Arc::new(MemoryHistoryStore::new()));
///
/// machine.dispatch(CalculatorEvent::AddOperand(6));
/// machine.dispatch(CalculatorEvent::AddOperator(Operator::Multiply));
/// machine.dispatch(CalculatorEvent::AddOperand(7));
/// machine.dispatch(CalculatorEvent::Calculate);
/// machine.settle().await;
///
/// assert_eq!(states.drain().last(), Some(&DisplayState::ShowResult(42)));
/// # });
/// ```
pub struct CalculatorMachine {
    session: Session,
    evaluator: Evaluator,
    store: Arc<dyn HistoryStore>,
    states: mpsc::UnboundedSender<DisplayState>,
    tasks: JoinSet<Completion>,
    load_generation: u64,
}

impl CalculatorMachine {
    /// Create a machine with an empty expression and the history view closed.
    pub fn new(store: Arc<dyn HistoryStore>) -> (Self, DisplayStates) {
        Self::with_session(Session::default(), Evaluator::new(), store)
    }

    /// Create a machine starting from an existing session.
    pub fn with_session(
        session: Session,
        evaluator: Evaluator,
        store: Arc<dyn HistoryStore>,
    ) -> (Self, DisplayStates) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let machine = Self {
            session,
            evaluator,
            store,
            states: sender,
            tasks: JoinSet::new(),
            load_generation: 0,
        };
        (machine, DisplayStates { receiver })
    }

    /// Rebuild a machine from a checkpoint.
    pub fn resume(
        checkpoint: &Checkpoint,
        store: Arc<dyn HistoryStore>,
    ) -> Result<(Self, DisplayStates), CheckpointError> {
        let session = checkpoint.restore()?;
        debug!(checkpoint = %checkpoint.id, "resuming calculator session");
        Ok(Self::with_session(session, Evaluator::new(), store))
    }

    /// Snapshot the current session.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::capture(&self.session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn expression(&self) -> &Expression {
        &self.session.expression
    }

    pub fn is_viewing_history(&self) -> bool {
        self.session.viewing_history
    }

    /// Number of store operations still in flight.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Apply one event.
    ///
    /// Must be called within a Tokio runtime: store work is spawned onto it.
    pub fn dispatch(&mut self, event: CalculatorEvent) {
        debug!(event = event.name(), "dispatching event");

        let step = self.session.step(event, &self.evaluator);
        self.session = step.session;

        if let Some(state) = step.emit {
            self.emit(state);
        }
        if let Some(command) = step.command {
            self.perform(command);
        }
    }

    /// Wait for one store operation and fold its result back.
    ///
    /// Returns `false` when nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        match self.tasks.join_next().await {
            Some(joined) => {
                self.complete(joined);
                true
            }
            None => false,
        }
    }

    /// Wait for every in-flight store operation.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    /// Drive the machine from an event channel.
    ///
    /// Events and store completions are applied in arrival order. When the
    /// sender side closes, outstanding store work is settled and the loop
    /// returns.
    pub async fn run(mut self, mut events: mpsc::Receiver<CalculatorEvent>) {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.dispatch(event),
                    None => break,
                },
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    self.complete(joined);
                }
            }
        }
        self.settle().await;
        debug!("event channel closed, machine stopped");
    }

    fn emit(&self, state: DisplayState) {
        debug!(state = state.name(), "emitting display state");
        if self.states.send(state).is_err() {
            debug!("display stream dropped, state discarded");
        }
    }

    fn perform(&mut self, command: StoreCommand) {
        let store = Arc::clone(&self.store);
        match command {
            StoreCommand::Save(record) => {
                self.tasks.spawn(async move {
                    Completion::Saved(store.save(std::slice::from_ref(&record)).await)
                });
            }
            StoreCommand::Load => {
                self.load_generation += 1;
                let generation = self.load_generation;
                self.tasks.spawn(async move {
                    Completion::Loaded {
                        generation,
                        result: store.load().await,
                    }
                });
            }
        }
    }

    fn complete(&mut self, joined: Result<Completion, JoinError>) {
        let completion = match joined {
            Ok(completion) => completion,
            Err(error) if error.is_cancelled() => return,
            Err(error) => {
                warn!(%error, "history store task panicked");
                return;
            }
        };

        match completion {
            Completion::Saved(Ok(())) => debug!("history record saved"),
            Completion::Saved(Err(error)) => warn!(%error, "failed to save history record"),
            Completion::Loaded { generation, result } => {
                if generation != self.load_generation || !self.session.viewing_history {
                    debug!(generation, "discarding stale history load");
                    return;
                }
                match result {
                    Ok(records) => {
                        debug!(count = records.len(), "history loaded");
                        self.emit(DisplayState::LoadedHistory(records));
                    }
                    Err(error) => {
                        warn!(%error, "failed to load history");
                        self.session.viewing_history = false;
                        self.emit(DisplayState::HistoryUnavailable {
                            reason: error.to_string(),
                        });
                    }
                }
            }
        }
    }
}
