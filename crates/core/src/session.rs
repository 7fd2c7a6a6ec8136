use secrecy::SecretString;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Holder of the bearer token for one signed-in user.
///
/// Passed to the client explicitly; an empty session is valid and means the
/// backend falls back to cookie auth.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<SecretString>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.sign_in(token);
        session
    }

    /// Blank tokens sign the session out.
    pub fn sign_in(&self, token: impl Into<String>) {
        let token = token.into();
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);

        if token.trim().is_empty() {
            *slot = None;
            return;
        }

        *slot = Some(SecretString::from(token.trim().to_string()));
        info!("Session token stored");
    }

    pub fn sign_out(&self) {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            info!("Session token cleared");
        }
    }

    pub fn token(&self) -> Option<SecretString> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Signs in for the lifetime of the returned guard.
    pub fn scope(self: &Arc<Self>, token: impl Into<String>) -> SessionScope {
        self.sign_in(token);
        SessionScope {
            session: Arc::clone(self),
        }
    }
}

#[derive(Debug)]
pub struct SessionScope {
    session: Arc<Session>,
}

impl SessionScope {
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl Drop for SessionScope {
    fn drop(&mut self) {
        self.session.sign_out();
    }
}
