//! Locale and access router
//!
//! A pure decision over one request, evaluated in strict order:
//!
//! 1. excluded paths pass through untouched;
//! 2. a path without a supported locale prefix is redirected to the
//!    negotiated locale;
//! 3. a request without an authenticated session is redirected to the
//!    locale's sign-in page, carrying the original path as `callbackUrl`;
//! 4. everything else passes through.
//!
//! Session-check failures are returned as errors, never read as either
//! answer.

pub mod decision;
pub mod matcher;
pub mod path;

use std::sync::Arc;

use tracing::debug;

use crate::auth::session::{SessionCheck, SessionError};
use crate::i18n::negotiate;

pub use decision::{Decision, Redirect, RedirectReason, CALLBACK_PARAM};
pub use matcher::{ExclusionRule, Matcher};
pub use path::{switch_locale, with_locale, RoutePath};

/// The parts of an inbound request the router looks at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub path: String,
    /// Raw query string without the leading `?`
    pub query: Option<String>,
    pub accept_language: Option<String>,
    pub cookie: Option<String>,
}

impl Request {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_accept_language(mut self, value: impl Into<String>) -> Self {
        self.accept_language = Some(value.into());
        self
    }

    pub fn with_cookie(mut self, value: impl Into<String>) -> Self {
        self.cookie = Some(value.into());
        self
    }

    /// `path` or `path?query`, as the browser requested it.
    pub fn path_and_query(&self) -> String {
        match self.query.as_deref() {
            Some(q) if !q.is_empty() => format!("{}?{q}", self.path),
            _ => self.path.clone(),
        }
    }
}

/// Request router; cheap to clone and safe to share across requests.
#[derive(Clone)]
pub struct Router {
    matcher: Matcher,
    session: Arc<dyn SessionCheck + Send + Sync>,
}

impl Router {
    pub fn new(matcher: Matcher, session: Arc<dyn SessionCheck + Send + Sync>) -> Self {
        Self { matcher, session }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn decide(&self, request: &Request) -> Result<Decision, SessionError> {
        if let Some(rule) = self.matcher.matching_rule(&request.path) {
            debug!(path = %request.path, ?rule, "excluded");
            return Ok(Decision::PassThrough);
        }

        let Some(locale) = RoutePath::parse(&request.path).locale() else {
            let locale = negotiate(request.accept_language.as_deref());
            let redirect = Redirect {
                path: with_locale(locale, &request.path),
                query: request.query.clone().filter(|q| !q.is_empty()),
                reason: RedirectReason::Locale,
            };
            debug!(path = %request.path, %locale, "locale redirect");
            return Ok(Decision::Redirect(redirect));
        };

        if !self.session.check(request)? {
            let callback = urlencoding::encode(&request.path_and_query()).into_owned();
            let redirect = Redirect {
                path: format!("/{locale}/{}", matcher::SIGNIN_SEGMENT),
                query: Some(format!("{CALLBACK_PARAM}={callback}")),
                reason: RedirectReason::Authentication,
            };
            debug!(path = %request.path, %locale, "sign-in redirect");
            return Ok(Decision::Redirect(redirect));
        }

        debug!(path = %request.path, %locale, "pass through");
        Ok(Decision::PassThrough)
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::StaticSession;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn router(authenticated: bool) -> Router {
        Router::new(Matcher::default(), Arc::new(StaticSession(authenticated)))
    }

    struct Failing;

    impl SessionCheck for Failing {
        fn check(&self, _request: &Request) -> Result<bool, SessionError> {
            Err(SessionError::Unavailable("identity provider down".into()))
        }
    }

    struct Counting(AtomicUsize);

    impl SessionCheck for Counting {
        fn check(&self, _request: &Request) -> Result<bool, SessionError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        }
    }

    #[test]
    fn missing_locale_redirects_with_negotiated_prefix() {
        let req = Request::new("/chat").with_accept_language("en-US,en;q=0.9");
        let d = router(false).decide(&req).unwrap();
        let r = d.redirect().unwrap();
        assert_eq!(r.reason, RedirectReason::Locale);
        assert_eq!(r.location(), "/en/chat");
    }

    #[test]
    fn locale_redirect_keeps_query() {
        let req = Request::new("/chat").with_query("t=5&x=1");
        let d = router(true).decide(&req).unwrap();
        assert_eq!(d.redirect().unwrap().location(), "/ja/chat?t=5&x=1");
    }

    #[test]
    fn root_redirects_to_bare_locale() {
        let d = router(true).decide(&Request::new("/")).unwrap();
        assert_eq!(d.redirect().unwrap().location(), "/ja");
    }

    #[test]
    fn locale_redirect_skips_session_check() {
        let counting = Arc::new(Counting(AtomicUsize::new(0)));
        let router = Router::new(Matcher::default(), counting.clone());
        router.decide(&Request::new("/chat")).unwrap();
        assert_eq!(counting.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unauthenticated_redirects_to_signin_with_callback() {
        let req = Request::new("/en/chat").with_query("t=t-5");
        let d = router(false).decide(&req).unwrap();
        let r = d.redirect().unwrap();
        assert_eq!(r.reason, RedirectReason::Authentication);
        assert_eq!(r.path, "/en/signin");
        assert_eq!(r.location(), "/en/signin?callbackUrl=%2Fen%2Fchat%3Ft%3Dt-5");
        assert_eq!(r.callback_url().as_deref(), Some("/en/chat?t=t-5"));
    }

    #[test]
    fn authenticated_passes_through() {
        let d = router(true).decide(&Request::new("/ja/chat")).unwrap();
        assert!(d.is_pass_through());
    }

    #[test]
    fn excluded_paths_pass_regardless_of_state() {
        let failing = Router::new(Matcher::default(), Arc::new(Failing));
        for path in ["/_next/static/x.js", "/api/health", "/favicon.ico", "/ja/signin", "/signin"] {
            let d = failing.decide(&Request::new(path)).unwrap();
            assert!(d.is_pass_through(), "{path}");
        }
    }

    #[test]
    fn session_failure_propagates() {
        let router = Router::new(Matcher::default(), Arc::new(Failing));
        let err = router.decide(&Request::new("/ja/chat")).unwrap_err();
        assert!(matches!(err, SessionError::Unavailable(_)));
    }

    #[test]
    fn session_failure_irrelevant_before_locale() {
        let router = Router::new(Matcher::default(), Arc::new(Failing));
        let d = router.decide(&Request::new("/chat")).unwrap();
        assert_eq!(d.redirect().unwrap().reason, RedirectReason::Locale);
    }

    #[test]
    fn path_and_query() {
        assert_eq!(Request::new("/ja").path_and_query(), "/ja");
        assert_eq!(Request::new("/ja").with_query("").path_and_query(), "/ja");
        assert_eq!(Request::new("/ja").with_query("a=1").path_and_query(), "/ja?a=1");
    }
}
