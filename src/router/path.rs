//! Route path decomposition
//!
//! A path carries a locale iff its first segment is exactly a supported
//! code: `/ja` and `/ja/...` do, `/jam` and `/JA/...` do not.

use crate::i18n::Locale;

/// A request path split into its optional locale segment and the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePath<'a> {
    locale: Option<Locale>,
    remainder: &'a str,
}

impl<'a> RoutePath<'a> {
    pub fn parse(path: &'a str) -> Self {
        let split = path.strip_prefix('/').and_then(|rest| {
            let (first, remainder) = match rest.find('/') {
                Some(idx) => rest.split_at(idx),
                None => (rest, ""),
            };
            Locale::parse(first).map(|locale| (locale, remainder))
        });

        match split {
            Some((locale, remainder)) => Self {
                locale: Some(locale),
                remainder,
            },
            None => Self {
                locale: None,
                remainder: path,
            },
        }
    }

    pub fn locale(&self) -> Option<Locale> {
        self.locale
    }

    /// Everything after the locale segment (`""` for `/ja`, `"/chat"` for
    /// `/ja/chat`). Without a locale this is the whole path.
    pub fn remainder(&self) -> &'a str {
        self.remainder
    }
}

/// Prefix `path` with a locale segment. The root maps to `/<locale>`.
pub fn with_locale(locale: Locale, path: &str) -> String {
    match path {
        "" | "/" => format!("/{locale}"),
        p if p.starts_with('/') => format!("/{locale}{p}"),
        p => format!("/{locale}/{p}"),
    }
}

/// Replace the first path segment with `locale`, keeping the rest verbatim.
/// This is what the language switcher navigates to.
pub fn switch_locale(path: &str, locale: Locale) -> String {
    let mut segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 2 {
        return format!("/{locale}");
    }
    segments[1] = locale.as_str();
    segments.join("/")
}
