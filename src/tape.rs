//! History tape: the ordered log of committed operands and results.

use crate::engine::TapeDelta;
use crate::engine::format::format_hhmm;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker shown in front of a tape row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    /// First operand of a chain.
    #[serde(rename = "")]
    Start,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "=")]
    Equals,
}

impl Symbol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Start => "",
            Symbol::Add => "+",
            Symbol::Subtract => "-",
            Symbol::Equals => "=",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeEntry {
    pub sym: Symbol,
    pub val: i64,
}

impl TapeEntry {
    pub fn new(sym: Symbol, val: i64) -> Self {
        Self { sym, val }
    }
}

/// Append-only sequence of [`TapeEntry`]. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tape {
    entries: Vec<TapeEntry>,
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TapeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn extend<I: IntoIterator<Item = TapeEntry>>(&mut self, entries: I) {
        self.entries.extend(entries);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Apply a transition's tape change. Returns whether anything changed.
    pub fn apply(&mut self, delta: &TapeDelta) -> bool {
        match delta {
            TapeDelta::Unchanged => false,
            TapeDelta::Append(entries) => {
                self.entries.extend_from_slice(entries);
                true
            }
            TapeDelta::Clear => {
                self.entries.clear();
                true
            }
        }
    }

    /// Render the tape as text, newest entry last.
    ///
    /// `last` keeps only the most recent rows, the terminal stand-in for
    /// scrolling the history view to the bottom.
    pub fn render(&self, last: Option<usize>) -> String {
        if self.entries.is_empty() {
            return "No history yet".to_string();
        }

        let skip = last.map_or(0, |n| self.entries.len().saturating_sub(n));
        let rows: Vec<(String, String)> = self.entries[skip..]
            .iter()
            .map(|e| (e.sym.to_string(), format_hhmm(e.val)))
            .collect();
        let width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);

        rows.iter()
            .map(|(sym, val)| format!("{:<1} {:>width$}", sym, val, width = width))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<TapeEntry>> for Tape {
    fn from(entries: Vec<TapeEntry>) -> Self {
        Self { entries }
    }
}
