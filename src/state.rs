use crate::error::StoreError;
use crate::tape::Tape;
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// File-backed storage slot for the history tape.
///
/// The tape is stored as a JSON array in `<dir>/<key>.json`; writers serialize
/// on `<dir>/<key>.lock`.
#[derive(Debug, Clone)]
pub struct TapeStore {
    tape_path: PathBuf,
    lock_path: PathBuf,
}

impl TapeStore {
    pub fn new<P: AsRef<Path>>(dir: P, key: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            tape_path: dir.join(format!("{}.json", key)),
            lock_path: dir.join(format!("{}.lock", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.tape_path
    }

    /// Read the stored tape. A missing or empty file is an empty tape.
    pub fn load(&self) -> Result<Tape, StoreError> {
        let path = &self.tape_path;
        if !path.exists() {
            return Ok(Tape::new());
        }
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Tape::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: path.clone(),
            source,
        })
    }

    /// Read the stored tape, degrading to an empty one on any failure.
    pub fn load_or_empty(&self) -> Tape {
        match self.load() {
            Ok(tape) => {
                tracing::debug!(entries = tape.len(), path = %self.tape_path.display(), "Loaded tape");
                tape
            }
            Err(e) => {
                tracing::warn!("{}. Starting with an empty tape.", e);
                Tape::new()
            }
        }
    }

    /// Replace the stored tape with `tape`, under an exclusive lock.
    pub fn save(&self, tape: &Tape) -> Result<(), StoreError> {
        let content = serde_json::to_string(tape)?;
        with_lock(&self.lock_path, || self.write(&content))
    }

    /// Read, modify and write the stored tape while holding the lock, so
    /// concurrent writers never drop each other's entries. Returns the tape as
    /// written. Unreadable contents are replaced.
    pub fn update<F>(&self, f: F) -> Result<Tape, StoreError>
    where
        F: FnOnce(&mut Tape),
    {
        with_lock(&self.lock_path, || {
            let mut tape = match self.load() {
                Ok(tape) => tape,
                Err(e @ StoreError::Corrupt { .. }) => {
                    tracing::warn!("{}. Overwriting it.", e);
                    Tape::new()
                }
                Err(e) => return Err(e),
            };
            f(&mut tape);
            self.write(&serde_json::to_string(&tape)?)?;
            Ok(tape)
        })
    }

    /// Caller holds the lock.
    fn write(&self, content: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.tape_path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        // Write to a sibling then rename so readers never see a partial file.
        let temp_path = self.tape_path.with_extension("tmp");
        fs::write(&temp_path, content).map_err(|source| self.io_error(source))?;
        fs::rename(&temp_path, &self.tape_path).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.tape_path.clone(),
            source,
        }
    }
}

fn with_lock<F, R>(lock_path: &Path, f: F) -> Result<R, StoreError>
where
    F: FnOnce() -> Result<R, StoreError>,
{
    let io_error = |source| StoreError::Io {
        path: lock_path.to_path_buf(),
        source,
    };

    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(lock_path)
        .map_err(io_error)?;

    file.lock_exclusive().map_err(io_error)?;
    let result = f();
    file.unlock().map_err(io_error)?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::{Symbol, TapeEntry};
    use tempfile::tempdir;

    #[test]
    fn test_paths_follow_key() {
        let store = TapeStore::new("/tmp/x", "timecalc_tape");
        assert_eq!(store.path(), Path::new("/tmp/x/timecalc_tape.json"));
        assert_eq!(store.lock_path, Path::new("/tmp/x/timecalc_tape.lock"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = TapeStore::new(dir.path(), "tape");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = TapeStore::new(dir.path(), "tape");
        let tape = Tape::from(vec![TapeEntry::new(Symbol::Start, 5)]);
        store.save(&tape).unwrap();
        assert!(!dir.path().join("tape.tmp").exists());
        assert_eq!(store.load().unwrap(), tape);
    }

    #[test]
    fn test_update_builds_on_stored_tape() {
        let dir = tempdir().unwrap();
        let store = TapeStore::new(dir.path(), "tape");
        store
            .save(&Tape::from(vec![TapeEntry::new(Symbol::Start, 5)]))
            .unwrap();

        let written = store
            .update(|tape| tape.extend([TapeEntry::new(Symbol::Add, 10)]))
            .unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(store.load().unwrap(), written);
    }

    #[test]
    fn test_update_replaces_corrupt_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tape.json"), "[{").unwrap();
        let store = TapeStore::new(dir.path(), "tape");

        let written = store
            .update(|tape| tape.extend([TapeEntry::new(Symbol::Start, 1)]))
            .unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(store.load().unwrap(), written);
    }
}
