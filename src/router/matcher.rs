//! Exclusion matcher
//!
//! Paths matched here bypass the router entirely: framework assets, API
//! routes, static files and the sign-in page (which would otherwise loop).

use super::path::RoutePath;

pub const DEFAULT_ASSET_PREFIX: &str = "/_next";
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Path segment of the sign-in page, under a locale or at the root.
pub const SIGNIN_SEGMENT: &str = "signin";

/// A single exclusion rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionRule {
    /// A path tree, matched on a segment boundary (`/api` and `/api/...`,
    /// not `/apiary`)
    Prefix(String),
    /// Final segment contains a literal `.`
    StaticFile,
    /// `/signin` or `/<locale>/signin`, with or without a trailing slash
    SignInPage,
}

impl ExclusionRule {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Prefix(prefix) => under_prefix(path, prefix),
            Self::StaticFile => path.rsplit('/').next().is_some_and(|s| s.contains('.')),
            Self::SignInPage => is_signin_page(path),
        }
    }
}

fn under_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return false;
    }
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn is_signin_page(path: &str) -> bool {
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };
    let route = RoutePath::parse(path);
    let rest = match route.locale() {
        Some(_) => route.remainder(),
        None => path,
    };
    rest.strip_prefix('/') == Some(SIGNIN_SEGMENT)
}

/// Ordered set of exclusion rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    rules: Vec<ExclusionRule>,
}

impl Matcher {
    pub fn new(asset_prefix: &str, api_prefix: &str) -> Self {
        Self::with_rules(vec![
            ExclusionRule::Prefix(asset_prefix.to_string()),
            ExclusionRule::Prefix(api_prefix.to_string()),
            ExclusionRule::StaticFile,
            ExclusionRule::SignInPage,
        ])
    }

    pub fn with_rules(rules: Vec<ExclusionRule>) -> Self {
        Self { rules }
    }

    /// The first rule that matches, if any.
    pub fn matching_rule(&self, path: &str) -> Option<&ExclusionRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.matching_rule(path).is_some()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_PREFIX, DEFAULT_API_PREFIX)
    }
}
