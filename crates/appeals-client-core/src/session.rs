use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// The credential pair a logged-in operator holds for the rest of the
/// session. Both tokens travel together; a session either has a full pair or
/// nothing, so no partial credential is representable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

impl TokenPair {
    #[must_use]
    pub fn new(token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Durable home for the session credential. One writer (the login flow),
/// many readers; `persist_session` replaces the pair wholesale and must
/// survive a restart of the hosting process for the session's lifetime.
pub trait SessionStore {
    type Error;

    fn load_session(&self) -> Result<Option<TokenPair>, Self::Error>;
    fn persist_session(&self, pair: &TokenPair) -> Result<(), Self::Error>;
    fn clear_session(&self) -> Result<(), Self::Error>;
}

/// Non-durable store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<TokenPair>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<TokenPair>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    type Error = std::convert::Infallible;

    fn load_session(&self) -> Result<Option<TokenPair>, Self::Error> {
        Ok(self.lock().clone())
    }

    fn persist_session(&self, pair: &TokenPair) -> Result<(), Self::Error> {
        *self.lock() = Some(pair.clone());
        Ok(())
    }

    fn clear_session(&self) -> Result<(), Self::Error> {
        *self.lock() = None;
        Ok(())
    }
}
