use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Unknown key '{0}'")]
    UnknownKey(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access tape file {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Tape file {path} is not valid JSON: {source}")]
    Corrupt {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize tape: {0}")]
    Serialize(#[from] serde_json::Error),
}
