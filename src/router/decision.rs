//! Router outcomes

use std::fmt;

use serde::Serialize;

/// Query parameter carrying the original destination across sign-in.
pub const CALLBACK_PARAM: &str = "callbackUrl";

/// Why a redirect was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    /// Path had no supported locale prefix
    Locale,
    /// Locale present, but no authenticated session
    Authentication,
}

impl fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locale => write!(f, "locale"),
            Self::Authentication => write!(f, "authentication"),
        }
    }
}

/// Redirect target: path plus an optional raw query string (no `?`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub path: String,
    pub query: Option<String>,
    pub reason: RedirectReason,
}

impl Redirect {
    /// Value for the `Location` header.
    pub fn location(&self) -> String {
        match self.query.as_deref() {
            Some(q) if !q.is_empty() => format!("{}?{q}", self.path),
            _ => self.path.clone(),
        }
    }

    /// Decoded `callbackUrl`, if this redirect carries one.
    pub fn callback_url(&self) -> Option<String> {
        let query = self.query.as_deref()?;
        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key != CALLBACK_PARAM {
                return None;
            }
            urlencoding::decode(value).ok().map(|v| v.into_owned())
        })
    }
}

/// What to do with a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    Redirect(Redirect),
    PassThrough,
}

impl Decision {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough)
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Redirect(r) => Some(r),
            Self::PassThrough => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redirect(r) => write!(f, "redirect ({}) -> {}", r.reason, r.location()),
            Self::PassThrough => write!(f, "pass through"),
        }
    }
}
