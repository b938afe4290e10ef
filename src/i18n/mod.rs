//! Supported locales
//!
//! The locale set is closed: every request resolves to exactly one of
//! [`Locale::ALL`], falling back to [`Locale::DEFAULT`].

pub mod dictionary;
pub mod negotiate;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use dictionary::{Dictionaries, Dictionary, DictionaryError};
pub use negotiate::negotiate;

/// A supported UI locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ja,
    En,
}

impl Locale {
    /// Every supported locale, in switcher order.
    pub const ALL: [Locale; 2] = [Locale::Ja, Locale::En];

    pub const DEFAULT: Locale = Locale::Ja;

    /// Canonical lowercase code, also used as the URL prefix.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }

    /// Display name shown by the language switcher.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ja => "日本語",
            Self::En => "English",
        }
    }

    /// Exact match against the canonical codes. No case folding, no region
    /// stripping: callers that need those do it themselves.
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == code)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale '{0}'")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_japanese() {
        assert_eq!(Locale::default(), Locale::Ja);
        assert!(Locale::ALL.contains(&Locale::DEFAULT));
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!(Locale::parse("ja"), Some(Locale::Ja));
        assert_eq!(Locale::parse("en"), Some(Locale::En));
        assert_eq!(Locale::parse("EN"), None);
        assert_eq!(Locale::parse("en-US"), None);
        assert_eq!(Locale::parse(""), None);
    }

    #[test]
    fn from_str_reports_the_code() {
        let err = "fr".parse::<Locale>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported locale 'fr'");
    }

    #[test]
    fn display_matches_code() {
        for locale in Locale::ALL {
            assert_eq!(locale.to_string(), locale.as_str());
        }
    }

    #[test]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&Locale::En).unwrap();
        assert_eq!(json, "\"en\"");
        let back: Locale = serde_json::from_str("\"ja\"").unwrap();
        assert_eq!(back, Locale::Ja);
    }
}
