use std::fmt;
use std::io;
use std::path::PathBuf;

/// Misuse of a hasher's lifecycle.
///
/// Every variant is a programming error on the caller's side; the hasher
/// is left exactly as it was before the offending call, so a `reset`
/// always recovers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashError {
    /// `update` was called after `finalize` without a `reset` in between.
    UpdateAfterFinalize,
    /// `finalize` was called a second time without a `reset` in between.
    AlreadyFinalized,
    /// The digest was requested before `finalize`.
    NotFinalized,
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashError::UpdateAfterFinalize => write!(f, "cannot update a finalized hasher"),
            HashError::AlreadyFinalized => write!(f, "hasher has already been finalized"),
            HashError::NotFinalized => write!(f, "digest requested before finalize"),
        }
    }
}

impl std::error::Error for HashError {}

/// Failure while streaming a file into a hasher.
#[derive(Debug)]
pub enum FileError {
    Open { path: PathBuf, source: io::Error },
    Read { path: PathBuf, source: io::Error },
    Hasher(HashError),
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::Open { path, source } => {
                write!(f, "could not open '{}' for reading: {source}", path.display())
            }
            FileError::Read { path, source } => {
                write!(f, "error reading from '{}': {source}", path.display())
            }
            FileError::Hasher(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::Open { source, .. } | FileError::Read { source, .. } => Some(source),
            FileError::Hasher(err) => Some(err),
        }
    }
}

impl From<HashError> for FileError {
    fn from(err: HashError) -> Self {
        FileError::Hasher(err)
    }
}
