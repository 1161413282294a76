//! Where the history tape lives on disk.

use crate::config::APP_DIR;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const WRITE_CHECK_FILE: &str = ".tape_write_check";

/// Default homes for the tape, most preferred first: `~/.hhmm-calc`, the
/// platform data directory (`~/.local/share/hhmm-calc` on Linux), then
/// `./.hhmm-calc`.
fn default_tape_dirs() -> Vec<PathBuf> {
    home::home_dir()
        .map(|home| home.join(APP_DIR))
        .into_iter()
        .chain(dirs::data_local_dir().map(|data| data.join("hhmm-calc")))
        .chain(std::iter::once(PathBuf::from(APP_DIR)))
        .collect()
}

/// Pick the directory for the tape file.
///
/// An explicit `state.state_dir_override` is used as-is and must be writable.
/// Otherwise the first writable default wins.
pub fn tape_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        check_tape_dir(dir)
            .with_context(|| format!("Configured tape directory {} is unusable", dir.display()))?;
        return Ok(dir.to_path_buf());
    }

    for dir in default_tape_dirs() {
        match check_tape_dir(&dir) {
            Ok(()) => return Ok(dir),
            Err(e) => tracing::debug!("Skipping tape directory: {:#}", e),
        }
    }

    anyhow::bail!(
        "No writable directory for the history tape. \
         Set state.state_dir_override in config or run with --no-tape."
    )
}

/// Create `dir` if needed and check the tape could be written there.
pub fn check_tape_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create tape directory {}", dir.display()))?;

    let check_file = dir.join(WRITE_CHECK_FILE);
    fs::write(&check_file, b"")
        .with_context(|| format!("Tape directory {} is not writable", dir.display()))?;
    let _ = fs::remove_file(&check_file);

    Ok(())
}
