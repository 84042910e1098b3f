//! Session context - the explicit per-request session handle.
//!
//! Carried by parameter through every account operation instead of living in
//! an ambient request bag. The opaque token is the only thing exchanged with
//! the client, via the session cookie; the session store owns what the token
//! maps to.

/// Server-side handle for one client's session state across requests.
///
/// State machine: Anonymous -> Authenticated (bind) -> Anonymous (destroy
/// or expiry). Reads never transition state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    token: Option<String>,
}

impl SessionContext {
    /// A fresh context with no session.
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// A context resumed from a client-supplied token.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// The opaque token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.token.is_none()
    }

    /// Attach a freshly issued token. Called by the session store on bind.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Take the token out, leaving the context anonymous.
    pub fn clear(&mut self) -> Option<String> {
        self.token.take()
    }
}
