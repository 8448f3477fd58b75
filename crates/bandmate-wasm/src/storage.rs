//! `localStorage` session provider

use bandmate_core::{Error, Result, SessionProvider};
use web_sys::Storage;

/// Reads the session token from `window.localStorage`
///
/// The login flow owns the key; this type never writes it. Storage that is
/// missing or throws (private mode, sandboxed iframes) reads as "no token".
#[derive(Debug, Clone)]
pub struct LocalStorageSession {
    key: String,
}

impl LocalStorageSession {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn storage() -> Result<Storage> {
        let window = web_sys::window().ok_or_else(|| Error::Storage("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| Error::Storage(format!("{:?}", e)))?
            .ok_or_else(|| Error::Storage("localStorage unavailable".to_string()))
    }

    /// Read the raw value, surfacing storage failures
    pub fn read(&self) -> Result<Option<String>> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }
}

impl Default for LocalStorageSession {
    fn default() -> Self {
        Self::new("token")
    }
}

impl SessionProvider for LocalStorageSession {
    fn token(&self) -> Option<String> {
        match self.read() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("reading `{}` failed: {}", self.key, e);
                None
            }
        }
    }
}
