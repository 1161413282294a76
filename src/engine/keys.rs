//! Key-sequence language used by the command line and the interactive session.
//!
//! Single-character keys: `0`-`9`, `+`, `-`, `=` and `<` (backspace). Word keys:
//! `bs`/`backspace`, `ce`/`clear-entry`, `ca`/`ac`/`clear-all`. Whitespace only
//! separates words.

use super::{Digit, Event, Operator};
use crate::error::KeyError;

/// Word keys, longest first so `clear-all` wins over a shorter match.
const WORDS: &[(&str, Event)] = &[
    ("clear-entry", Event::ClearEntry),
    ("backspace", Event::Backspace),
    ("clear-all", Event::ClearAll),
    ("bs", Event::Backspace),
    ("ce", Event::ClearEntry),
    ("ca", Event::ClearAll),
    ("ac", Event::ClearAll),
];

/// Match a word key at the start of `rest`. The word must not run into
/// another letter, so `bsx` is not `bs` followed by `x`.
fn match_word(rest: &str) -> Option<(Event, usize)> {
    WORDS.iter().find_map(|&(word, event)| {
        let head = rest.get(..word.len())?;
        let ends_word = !rest[word.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());
        (head.eq_ignore_ascii_case(word) && ends_word).then_some((event, word.len()))
    })
}

/// Parse a key sequence into events. Fails on the first unknown key, before any
/// event could be applied.
pub fn parse_keys(input: &str) -> Result<Vec<Event>, KeyError> {
    let mut events = Vec::new();
    let mut pos = 0;

    while let Some(c) = input[pos..].chars().next() {
        let rest = &input[pos..];
        if c.is_whitespace() {
            pos += c.len_utf8();
            continue;
        }
        if let Some(d) = Digit::from_char(c) {
            events.push(Event::Digit(d));
            pos += 1;
            continue;
        }
        let event = match c {
            '+' => Event::Operator(Operator::Add),
            '-' => Event::Operator(Operator::Subtract),
            '=' => Event::Evaluate,
            '<' => Event::Backspace,
            c if c.is_ascii_alphabetic() => match match_word(rest) {
                Some((event, len)) => {
                    events.push(event);
                    pos += len;
                    continue;
                }
                None => {
                    let len = rest
                        .find(|c: char| !c.is_ascii_alphabetic())
                        .unwrap_or(rest.len());
                    return Err(KeyError::UnknownKey(rest[..len].to_string()));
                }
            },
            other => return Err(KeyError::UnknownKey(other.to_string())),
        };
        events.push(event);
        pos += c.len_utf8();
    }

    Ok(events)
}
