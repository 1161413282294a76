pub mod calc;
pub mod config;
pub mod tape;

use crate::config::Config;
use crate::platform::tape_dir;
use crate::state::TapeStore;
use anyhow::Result;

/// The tape storage slot selected by `config`.
pub fn tape_store(config: &Config) -> Result<TapeStore> {
    let dir = tape_dir(config.state.state_dir_override.as_deref())?;
    Ok(TapeStore::new(dir, &config.tape.storage_key))
}
