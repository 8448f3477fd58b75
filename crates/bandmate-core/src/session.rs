//! Session state as seen by the router
//!
//! The router never writes the token. It only asks whether one is there;
//! issuing and clearing it belongs to the login flow.

use parking_lot::RwLock;
use std::rc::Rc;
use std::sync::Arc;

/// Read access to the current session token
pub trait SessionProvider {
    /// The stored token, if any
    fn token(&self) -> Option<String>;

    /// Whether a usable token is present. An empty string counts as absent.
    fn has_valid_token(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }
}

impl<S: SessionProvider + ?Sized> SessionProvider for &S {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

impl<S: SessionProvider + ?Sized> SessionProvider for Arc<S> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

impl<S: SessionProvider + ?Sized> SessionProvider for Rc<S> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

/// In-memory session slot
///
/// Clones share the same slot, so a login flow holding one clone and the
/// router's guard holding another see the same token.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    token: Arc<RwLock<Option<String>>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already stored
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Drop the token (logout)
    pub fn clear(&self) {
        *self.token.write() = None;
    }
}

impl SessionProvider for MemorySession {
    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session() {
        let session = MemorySession::new();
        assert_eq!(session.token(), None);
        assert!(!session.has_valid_token());
    }

    #[test]
    fn test_set_and_clear() {
        let session = MemorySession::new();
        session.set_token("abc123");
        assert_eq!(session.token().as_deref(), Some("abc123"));
        assert!(session.has_valid_token());

        session.clear();
        assert!(!session.has_valid_token());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let session = MemorySession::with_token("");
        assert_eq!(session.token().as_deref(), Some(""));
        assert!(!session.has_valid_token());
    }

    #[test]
    fn test_clones_share_slot() {
        let login_flow = MemorySession::new();
        let guard_view = login_flow.clone();

        login_flow.set_token("t");
        assert!(guard_view.has_valid_token());
    }

    #[test]
    fn test_smart_pointer_impls() {
        let session = Arc::new(MemorySession::with_token("t"));
        assert!(session.has_valid_token());

        let session = Rc::new(MemorySession::new());
        assert!(!session.has_valid_token());
        assert!(!(&*session).has_valid_token());
    }
}
