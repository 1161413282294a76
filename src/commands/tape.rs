use crate::OutputFormat;
use crate::config::Config;
use crate::tape::Tape;
use anyhow::{Context, Result};

pub fn show(config: &Config, last: Option<usize>, format: OutputFormat) -> Result<()> {
    let tape = match super::tape_store(config) {
        Ok(store) => store.load_or_empty(),
        Err(e) => {
            tracing::warn!("{:#}. Showing an empty tape.", e);
            Tape::new()
        }
    };

    match format {
        OutputFormat::Json => {
            let shown: Tape = match last {
                Some(n) => {
                    let skip = tape.len().saturating_sub(n);
                    Tape::from(tape.entries()[skip..].to_vec())
                }
                None => tape,
            };
            let json = serde_json::to_string(&shown).context("Failed to serialize tape")?;
            println!("{}", json);
        }
        OutputFormat::Text => println!("{}", tape.render(last)),
    }
    Ok(())
}

pub fn clear(config: &Config) -> Result<()> {
    let store = super::tape_store(config)?;
    store
        .save(&Tape::new())
        .with_context(|| format!("Failed to clear {}", store.path().display()))?;
    println!("✓ Tape cleared");
    Ok(())
}
