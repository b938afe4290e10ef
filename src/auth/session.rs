//! Authenticated-session predicate
//!
//! The identity provider owns tokens; the router only asks "is there a
//! session?" and must see failures as failures.

use thiserror::Error;

use crate::router::Request;

/// Cookie set by the identity collaborator once a user has signed in.
pub const DEFAULT_SESSION_COOKIE: &str = "authjs.session-token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session check unavailable: {0}")]
    Unavailable(String),
}

/// Answers whether a request carries an authenticated session
pub trait SessionCheck {
    fn check(&self, request: &Request) -> Result<bool, SessionError>;
}

/// Authenticated iff some session cookie carries a non-empty value.
///
/// Besides the configured name this accepts its `__Secure-` form (set over
/// HTTPS) and the `<name>.<n>` chunks used for tokens too large for a
/// single cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSession {
    name: String,
}

/// Prefix browsers require on cookies set with `Secure` by some issuers.
const SECURE_PREFIX: &str = "__Secure-";

impl CookieSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `name`, `__Secure-name`, or either followed by `.<digits>`.
    pub fn is_session_cookie(&self, cookie: &str) -> bool {
        let cookie = cookie.strip_prefix(SECURE_PREFIX).unwrap_or(cookie);
        match cookie.strip_prefix(self.name.as_str()) {
            Some("") => true,
            Some(rest) => rest
                .strip_prefix('.')
                .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())),
            None => false,
        }
    }
}

impl Default for CookieSession {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

impl SessionCheck for CookieSession {
    fn check(&self, request: &Request) -> Result<bool, SessionError> {
        let Some(header) = request.cookie.as_deref() else {
            return Ok(false);
        };
        let found = header
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .any(|(name, value)| self.is_session_cookie(name.trim()) && !value.trim().is_empty());
        Ok(found)
    }
}

/// Fixed answer; used by the offline `route` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSession(pub bool);

impl SessionCheck for StaticSession {
    fn check(&self, _request: &Request) -> Result<bool, SessionError> {
        Ok(self.0)
    }
}
