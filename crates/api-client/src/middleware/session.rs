//! Session token access

use std::sync::{Arc, RwLock};

/// Read/clear access to the application's session token
///
/// The pipeline never creates a session; it only reads the token before each
/// request and clears it when the gateway answers 401.
pub trait SessionProvider: Send + Sync {
    /// Current bearer token, if any
    fn token(&self) -> Option<String>;

    /// Drop the current token
    fn clear(&self);
}

/// Process-local session store
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    token: Arc<RwLock<Option<String>>>,
}

impl MemorySession {
    /// Create an anonymous session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session holding `token`
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    /// Replace the stored token
    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(token.into());
    }
}

impl SessionProvider for MemorySession {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_session_lifecycle() {
        let session = MemorySession::new();
        assert_eq!(session.token(), None);

        session.set_token("abc");
        assert_eq!(session.token().as_deref(), Some("abc"));

        session.clear();
        assert_eq!(session.token(), None);

        // clearing twice is harmless
        session.clear();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let session = MemorySession::with_token("shared");
        let other = session.clone();
        other.clear();
        assert_eq!(session.token(), None);
    }
}
