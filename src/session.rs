//! Binds the pure engine to the history tape and its storage.

use crate::engine::{Calculator, Event, TapeDelta, step};
use crate::state::TapeStore;
use crate::tape::Tape;

/// A running calculator. With a tape attached, every tape change is written
/// through to the store; storage failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct Session {
    calculator: Calculator,
    tape: Option<Tape>,
    store: Option<TapeStore>,
}

impl Session {
    /// Calculator without history.
    pub fn without_tape() -> Self {
        Self {
            calculator: Calculator::new(),
            tape: None,
            store: None,
        }
    }

    /// Calculator with a history tape restored once from `store`.
    pub fn with_tape(store: TapeStore) -> Self {
        let tape = store.load_or_empty();
        Self {
            calculator: Calculator::new(),
            tape: Some(tape),
            store: Some(store),
        }
    }

    /// Calculator with a history tape that is never persisted.
    pub fn with_memory_tape() -> Self {
        Self {
            calculator: Calculator::new(),
            tape: Some(Tape::new()),
            store: None,
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn display(&self) -> &str {
        self.calculator.display()
    }

    pub fn tape(&self) -> Option<&Tape> {
        self.tape.as_ref()
    }

    pub fn press(&mut self, event: Event) {
        let transition = step(&self.calculator, event);
        self.calculator = transition.state;
        self.record(&transition.tape);
    }

    pub fn press_all<I: IntoIterator<Item = Event>>(&mut self, events: I) {
        for event in events {
            self.press(event);
        }
    }

    /// Drop the recorded history without touching the calculator.
    pub fn clear_tape(&mut self) {
        self.record(&TapeDelta::Clear);
    }

    /// Apply `delta` to the stored tape and adopt the result, which includes
    /// entries other sessions wrote meanwhile. Without a usable store the
    /// in-memory tape alone is updated.
    fn record(&mut self, delta: &TapeDelta) {
        let Some(tape) = self.tape.as_mut() else {
            return;
        };
        if !tape.apply(delta) {
            return;
        }
        let Some(store) = &self.store else {
            return;
        };
        match store.update(|stored| {
            stored.apply(delta);
        }) {
            Ok(stored) => {
                tracing::debug!(entries = stored.len(), "Saved tape");
                *tape = stored;
            }
            Err(e) => tracing::warn!("Tape not saved: {}", e),
        }
    }
}
