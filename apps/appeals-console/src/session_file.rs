use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use appeals_client_core::session::{SessionStore, TokenPair};
use thiserror::Error;

/// Durable analogue of the browser's session storage: one JSON file holding
/// the token pair, replaced wholesale on every login.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

#[derive(Debug, Error)]
pub enum SessionFileError {
    #[error("failed to access session file: {0}")]
    Io(#[from] io::Error),
    #[error("session file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    type Error = SessionFileError;

    fn load_session(&self) -> Result<Option<TokenPair>, SessionFileError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn persist_session(&self, pair: &TokenPair) -> Result<(), SessionFileError> {
        let json = serde_json::to_vec_pretty(pair)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear_session(&self) -> Result<(), SessionFileError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
