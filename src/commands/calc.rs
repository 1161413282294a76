use crate::OutputFormat;
use crate::config::Config;
use crate::engine::keys::parse_keys;
use crate::engine::Operator;
use crate::session::Session;
use crate::tape::Tape;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, BufRead, Write};

#[derive(Serialize)]
struct Report<'a> {
    display: &'a str,
    buffer: &'a str,
    accumulator: Option<i64>,
    pending: Option<Operator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tape: Option<&'a Tape>,
}

/// Start a session for this run. Storage problems fall back to an in-memory tape.
pub fn open_session(config: &Config, no_tape: bool) -> Session {
    if no_tape || !config.tape.enabled {
        return Session::without_tape();
    }
    match super::tape_store(config) {
        Ok(store) => Session::with_tape(store),
        Err(e) => {
            tracing::warn!("{:#}. History will not be saved.", e);
            Session::with_memory_tape()
        }
    }
}

fn print_state(session: &Session, show_tape: bool, format: OutputFormat) -> Result<()> {
    let calc = session.calculator();
    match format {
        OutputFormat::Json => {
            let report = Report {
                display: calc.display(),
                buffer: calc.buffer(),
                accumulator: calc.accumulator(),
                pending: calc.pending(),
                tape: if show_tape { session.tape() } else { None },
            };
            let json = serde_json::to_string(&report).context("Failed to serialize state")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("{}", calc.display());
            if show_tape {
                if let Some(tape) = session.tape() {
                    println!();
                    println!("{}", tape.render(None));
                }
            }
        }
    }
    Ok(())
}

/// Apply a key sequence to a fresh calculator and print the display.
pub fn keys(
    config: &Config,
    keys: &[String],
    no_tape: bool,
    show_tape: bool,
    format: OutputFormat,
) -> Result<()> {
    let input = keys.join(" ");
    let events = parse_keys(&input).with_context(|| format!("Invalid key sequence '{}'", input))?;

    let mut session = open_session(config, no_tape);
    session.press_all(events);

    print_state(&session, show_tape, format)
}

/// Line-oriented interactive calculator. Each line is a key sequence.
pub fn repl(config: &Config, no_tape: bool, format: OutputFormat) -> Result<()> {
    let mut session = open_session(config, no_tape);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if matches!(format, OutputFormat::Text) {
        println!("Keys: 0-9 + - = < (backspace), ce, ca. Commands: tape, quit.");
        println!("{}", session.display());
    }

    loop {
        if matches!(format, OutputFormat::Text) {
            print!("> ");
            stdout.flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "quit" | "exit" | "q" => break,
            "tape" => {
                print_state(&session, true, format)?;
                continue;
            }
            _ => {}
        }

        match parse_keys(&line) {
            Ok(events) => {
                session.press_all(events);
                print_state(&session, false, format)?;
            }
            Err(e) => eprintln!("✗ {}", e),
        }
    }

    Ok(())
}
