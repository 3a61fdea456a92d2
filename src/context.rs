//! Explicit session context shared by the gateway and the workflow services.
//!
//! The source of the auth token (device key/value storage) is opaque to this
//! crate; the embedding application writes it here once and every request
//! picks it up. The active cashier-session id follows the same path instead
//! of being re-read ad hoc at every call site.

use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct SessionContext {
    auth_token: RwLock<Option<String>>,
    active_session_id: RwLock<Option<i64>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let context = Self::default();
        context.set_auth_token(Some(token.into()));
        context
    }

    pub fn auth_token(&self) -> Option<String> {
        self.auth_token.read().ok().and_then(|guard| guard.clone())
    }

    pub fn set_auth_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.auth_token.write() {
            *guard = token;
        }
    }

    pub fn active_session_id(&self) -> Option<i64> {
        self.active_session_id.read().ok().and_then(|guard| *guard)
    }

    pub fn set_active_session_id(&self, session_id: Option<i64>) {
        if let Ok(mut guard) = self.active_session_id.write() {
            *guard = session_id;
        }
    }

    /// Called after a successful session close.
    pub fn clear_active_session_id(&self) {
        self.set_active_session_id(None);
    }
}
