//! Identity providers and the sign-in handoff
//!
//! Providers are enabled from an explicit credential set, validated once at
//! startup. The handoff itself is opaque: we build the provider's sign-in
//! URL and never look at tokens.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::ConfigError;

/// Where the identity collaborator serves provider sign-in.
pub const SIGNIN_BASE: &str = "/api/auth/signin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Provider {
    #[serde(rename = "microsoft-entra-id")]
    MicrosoftEntraId,
    #[serde(rename = "github")]
    GitHub,
    #[serde(rename = "google")]
    Google,
}

impl Provider {
    /// Presentation order on the sign-in page.
    pub const ALL: [Provider; 3] = [Provider::MicrosoftEntraId, Provider::GitHub, Provider::Google];

    pub const fn id(self) -> &'static str {
        match self {
            Self::MicrosoftEntraId => "microsoft-entra-id",
            Self::GitHub => "github",
            Self::Google => "google",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MicrosoftEntraId => "Microsoft EntraID",
            Self::GitHub => "GitHub",
            Self::Google => "Google",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// OAuth client credentials for one provider
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    /// Tenant issuer URL; only Entra ID requires one
    pub issuer: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// Credentials per provider; `None` means the provider is not configured
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    pub entra_id: Option<Credentials>,
    pub github: Option<Credentials>,
    pub google: Option<Credentials>,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset, and a
    /// provider with any credential missing is left out.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let entra_id = match (
            get("AUTH_MICROSOFT_ENTRA_ID_ID"),
            get("AUTH_MICROSOFT_ENTRA_ID_SECRET"),
            get("AUTH_MICROSOFT_ENTRA_ID_ISSUER"),
        ) {
            (Some(client_id), Some(client_secret), Some(issuer)) => Some(Credentials {
                client_id,
                client_secret,
                issuer: Some(issuer),
            }),
            _ => None,
        };

        let pair = |id_key: &str, secret_key: &str| match (get(id_key), get(secret_key)) {
            (Some(client_id), Some(client_secret)) => Some(Credentials {
                client_id,
                client_secret,
                issuer: None,
            }),
            _ => None,
        };

        Self {
            entra_id,
            github: pair("AUTH_GITHUB_ID", "AUTH_GITHUB_SECRET"),
            google: pair("AUTH_GOOGLE_ID", "AUTH_GOOGLE_SECRET"),
        }
    }

    pub fn credentials(&self, provider: Provider) -> Option<&Credentials> {
        match provider {
            Provider::MicrosoftEntraId => self.entra_id.as_ref(),
            Provider::GitHub => self.github.as_ref(),
            Provider::Google => self.google.as_ref(),
        }
    }

    /// The fixed, ordered list of usable providers. Fails when empty: a
    /// sign-in page with no options is a misconfiguration.
    pub fn validate(&self) -> Result<Providers, ConfigError> {
        let enabled: Vec<Provider> = Provider::ALL
            .into_iter()
            .filter(|&p| {
                let present = self.credentials(p).is_some();
                if !present {
                    debug!(provider = %p, "provider not configured");
                }
                present
            })
            .collect();

        if enabled.is_empty() {
            return Err(ConfigError::NoProviders);
        }
        Ok(Providers { enabled })
    }
}

/// Validated, non-empty provider list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Providers {
    enabled: Vec<Provider>,
}

impl Providers {
    pub fn iter(&self) -> impl Iterator<Item = Provider> + '_ {
        self.enabled.iter().copied()
    }

    pub fn contains(&self, provider: Provider) -> bool {
        self.enabled.contains(&provider)
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Hand off to `provider`, returning to `return_path` afterwards.
    /// `None` if the provider is not enabled.
    pub fn sign_in_url(&self, provider: Provider, return_path: Option<&str>) -> Option<String> {
        if !self.contains(provider) {
            return None;
        }
        Some(format!(
            "{SIGNIN_BASE}/{}?callbackUrl={}",
            provider.id(),
            urlencoding::encode(safe_return_path(return_path))
        ))
    }
}

/// Only same-origin absolute paths survive; anything else returns home.
pub fn safe_return_path(raw: Option<&str>) -> &str {
    match raw {
        Some(p) if p.starts_with('/') && !p.starts_with("//") && !p.starts_with("/\\") => p,
        _ => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn nothing_configured_is_fatal() {
        let config = ProviderConfig::from_lookup(lookup(&[]));
        assert!(matches!(config.validate(), Err(ConfigError::NoProviders)));
    }

    #[test]
    fn entra_id_needs_issuer() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("AUTH_MICROSOFT_ENTRA_ID_ID", "id"),
            ("AUTH_MICROSOFT_ENTRA_ID_SECRET", "secret"),
        ]));
        assert!(config.entra_id.is_none());
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("AUTH_GITHUB_ID", "id"),
            ("AUTH_GITHUB_SECRET", ""),
        ]));
        assert!(config.github.is_none());
    }

    #[test]
    fn order_is_fixed() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("AUTH_GOOGLE_ID", "g"),
            ("AUTH_GOOGLE_SECRET", "gs"),
            ("AUTH_MICROSOFT_ENTRA_ID_ID", "e"),
            ("AUTH_MICROSOFT_ENTRA_ID_SECRET", "es"),
            ("AUTH_MICROSOFT_ENTRA_ID_ISSUER", "https://login.example/tenant/v2.0"),
        ]));
        let providers = config.validate().unwrap();
        let ids: Vec<_> = providers.iter().map(Provider::id).collect();
        assert_eq!(ids, vec!["microsoft-entra-id", "google"]);
    }

    #[test]
    fn secrets_are_redacted_in_debug() {
        let creds = Credentials {
            client_id: "id".into(),
            client_secret: "hunter2".into(),
            issuer: None,
        };
        let dbg = format!("{creds:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn sign_in_url_encodes_return_path() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("AUTH_GITHUB_ID", "id"),
            ("AUTH_GITHUB_SECRET", "s"),
        ]));
        let providers = config.validate().unwrap();
        assert_eq!(
            providers.sign_in_url(Provider::GitHub, Some("/ja/chat?t=1")).as_deref(),
            Some("/api/auth/signin/github?callbackUrl=%2Fja%2Fchat%3Ft%3D1")
        );
        assert_eq!(providers.sign_in_url(Provider::Google, Some("/ja")), None);
    }

    #[test]
    fn return_path_defaults_home() {
        assert_eq!(safe_return_path(None), "/");
        assert_eq!(safe_return_path(Some("/en/chat")), "/en/chat");
        assert_eq!(safe_return_path(Some("https://evil.example")), "/");
        assert_eq!(safe_return_path(Some("//evil.example")), "/");
        assert_eq!(safe_return_path(Some("/\\evil.example")), "/");
        assert_eq!(safe_return_path(Some("")), "/");
    }
}
