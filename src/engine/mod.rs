//! Duration calculator engine.
//!
//! The whole calculator is a [`Calculator`] value and a pure [`step`] function.
//! Nothing here touches the terminal or the filesystem; adapters in
//! [`crate::session`] apply the returned [`TapeDelta`] to a persisted tape.

pub mod format;
pub mod keys;
pub mod parse;

use crate::tape::{Symbol, TapeEntry};
use format::format_hhmm;
use parse::parse_buffer;
use serde::Serialize;

/// Maximum number of digits held in the input buffer.
pub const MAX_BUFFER_DIGITS: usize = 6;

/// A single decimal digit key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digit(u8);

impl Digit {
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
}

impl Operator {
    fn apply(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Operator::Add => lhs.saturating_add(rhs),
            Operator::Subtract => lhs.saturating_sub(rhs),
        }
    }

    fn symbol(self) -> Symbol {
        match self {
            Operator::Add => Symbol::Add,
            Operator::Subtract => Symbol::Subtract,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Digit(Digit),
    Operator(Operator),
    Evaluate,
    Backspace,
    ClearEntry,
    ClearAll,
}

/// What a transition did to the history tape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapeDelta {
    Unchanged,
    Append(Vec<TapeEntry>),
    Clear,
}

/// Complete calculator state: input buffer, running accumulator, pending operator
/// and the text currently on the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculator {
    buffer: String,
    accumulator: Option<i64>,
    pending: Option<Operator>,
    display: String,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            buffer: String::new(),
            accumulator: None,
            pending: None,
            display: format_hhmm(0),
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn accumulator(&self) -> Option<i64> {
        self.accumulator
    }

    pub fn pending(&self) -> Option<Operator> {
        self.pending
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    fn show_buffer(&mut self) {
        self.display = format_hhmm(parse_buffer(&self.buffer));
    }

    /// Fold the buffer into the accumulator under the previously pending operator,
    /// then queue `next`.
    fn commit(&mut self, next: Operator) -> TapeDelta {
        let value = parse_buffer(&self.buffer);
        let mut appended = Vec::new();

        match (self.accumulator, self.pending) {
            (None, _) => {
                appended.push(TapeEntry::new(Symbol::Start, value));
                self.accumulator = Some(value);
                self.display = format_hhmm(value);
            }
            (Some(acc), Some(op)) => {
                appended.push(TapeEntry::new(op.symbol(), value));
                let acc = op.apply(acc, value);
                self.accumulator = Some(acc);
                self.display = format_hhmm(acc);
            }
            (Some(_), None) => {}
        }

        self.buffer.clear();
        self.pending = Some(next);

        if appended.is_empty() {
            TapeDelta::Unchanged
        } else {
            TapeDelta::Append(appended)
        }
    }

    fn evaluate(&mut self) -> TapeDelta {
        let (Some(acc), Some(op)) = (self.accumulator, self.pending) else {
            return TapeDelta::Unchanged;
        };

        let value = parse_buffer(&self.buffer);
        let result = op.apply(acc, value);
        self.display = format_hhmm(result);

        self.accumulator = None;
        self.pending = None;
        self.buffer.clear();

        TapeDelta::Append(vec![
            TapeEntry::new(op.symbol(), value),
            TapeEntry::new(Symbol::Equals, result),
        ])
    }

    fn apply(&mut self, event: Event) -> TapeDelta {
        match event {
            Event::Digit(d) => {
                if self.buffer.len() < MAX_BUFFER_DIGITS {
                    self.buffer.push(d.as_char());
                    self.show_buffer();
                }
                TapeDelta::Unchanged
            }
            Event::Backspace => {
                if self.buffer.pop().is_some() {
                    self.show_buffer();
                }
                TapeDelta::Unchanged
            }
            Event::ClearEntry => {
                self.buffer.clear();
                self.show_buffer();
                TapeDelta::Unchanged
            }
            Event::ClearAll => {
                *self = Self::default();
                TapeDelta::Clear
            }
            Event::Operator(op) => self.commit(op),
            Event::Evaluate => self.evaluate(),
        }
    }
}

/// Result of feeding one event to a calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: Calculator,
    pub tape: TapeDelta,
}

/// Pure transition function: the next state and the tape change for `event`.
pub fn step(state: &Calculator, event: Event) -> Transition {
    let mut next = state.clone();
    let tape = next.apply(event);
    Transition { state: next, tape }
}
