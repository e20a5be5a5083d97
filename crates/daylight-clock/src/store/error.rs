use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure reported by a [`KeyValueStore`](super::KeyValueStore) backend.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    Io { path: PathBuf, source: io::Error },
    /// The backing file exists but does not hold a JSON object of strings.
    Corrupt { path: PathBuf, message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "store i/o error at {}: {source}", path.display())
            }
            StoreError::Corrupt { path, message } => {
                write!(f, "store file {} is corrupt: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Corrupt { .. } => None,
        }
    }
}
