//! User-facing error codes
//!
//! Codes follow `ERR_{CATEGORY}_{NNN}`. Messages are looked up by code
//! string with a generic fallback, so unknown codes still render.

use std::fmt;

use serde::Serialize;

use crate::auth::SessionError;
use crate::config::ConfigError;
use crate::i18n::DictionaryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "ERR_AUTH_001")]
    Auth001,
    #[serde(rename = "ERR_AUTH_002")]
    Auth002,
    #[serde(rename = "ERR_AUTH_003")]
    Auth003,
    #[serde(rename = "ERR_VALIDATION_001")]
    Validation001,
    #[serde(rename = "ERR_VALIDATION_002")]
    Validation002,
    #[serde(rename = "ERR_NETWORK_001")]
    Network001,
    #[serde(rename = "ERR_NETWORK_002")]
    Network002,
}

/// Message shown for codes that are not in the catalog.
pub const FALLBACK_MESSAGE: &str = "An unexpected error has occurred.";

struct Entry {
    code: ErrorCode,
    id: &'static str,
    message: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        code: ErrorCode::Auth001,
        id: "ERR_AUTH_001",
        message: "Authentication failed. Please log in again.",
    },
    Entry {
        code: ErrorCode::Auth002,
        id: "ERR_AUTH_002",
        message: "Your session has expired. Please log in again.",
    },
    Entry {
        code: ErrorCode::Auth003,
        id: "ERR_AUTH_003",
        message: "You do not have permission to access this resource.",
    },
    Entry {
        code: ErrorCode::Validation001,
        id: "ERR_VALIDATION_001",
        message: "There was an error in your input. Please check and try again.",
    },
    Entry {
        code: ErrorCode::Validation002,
        id: "ERR_VALIDATION_002",
        message: "A required field is missing.",
    },
    Entry {
        code: ErrorCode::Network001,
        id: "ERR_NETWORK_001",
        message: "A network error has occurred. Please check your connection.",
    },
    Entry {
        code: ErrorCode::Network002,
        id: "ERR_NETWORK_002",
        message: "Unable to connect to the server. Please try again later.",
    },
];

impl ErrorCode {
    // ENTRIES is in declaration order
    fn entry(self) -> &'static Entry {
        &ENTRIES[self as usize]
    }

    pub fn id(self) -> &'static str {
        self.entry().id
    }

    pub fn message(self) -> &'static str {
        self.entry().message
    }

    pub fn parse(id: &str) -> Option<Self> {
        ENTRIES.iter().find(|e| e.id == id).map(|e| e.code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Message for a code string, falling back to [`FALLBACK_MESSAGE`].
pub fn message_for(id: &str) -> &'static str {
    ErrorCode::parse(id).map_or(FALLBACK_MESSAGE, ErrorCode::message)
}

/// Code for the first cause in `err`'s chain that the catalog knows about.
pub fn code_for_error(err: &anyhow::Error) -> Option<ErrorCode> {
    err.chain().find_map(|cause| {
        if let Some(config) = cause.downcast_ref::<ConfigError>() {
            return Some(match config {
                ConfigError::NoProviders => ErrorCode::Validation002,
                ConfigError::Invalid { .. } | ConfigError::BadPrefix { .. } => {
                    ErrorCode::Validation001
                }
            });
        }
        if cause.is::<SessionError>() {
            return Some(ErrorCode::Auth001);
        }
        if cause.is::<DictionaryError>() {
            return Some(ErrorCode::Network002);
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorCode; 7] = [
        ErrorCode::Auth001,
        ErrorCode::Auth002,
        ErrorCode::Auth003,
        ErrorCode::Validation001,
        ErrorCode::Validation002,
        ErrorCode::Network001,
        ErrorCode::Network002,
    ];

    #[test]
    fn every_code_has_its_own_entry() {
        assert_eq!(ENTRIES.len(), ALL.len());
        for code in ALL {
            assert_eq!(code.entry().code, code);
            assert_eq!(ErrorCode::parse(code.id()), Some(code));
        }
    }

    #[test]
    fn ids_follow_naming_rule() {
        for code in ALL {
            let id = code.id();
            assert!(id.starts_with("ERR_"), "{id}");
            let suffix = id.rsplit('_').next().unwrap();
            assert_eq!(suffix.len(), 3);
            assert!(suffix.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn session_expired_message() {
        assert_eq!(
            message_for("ERR_AUTH_002"),
            "Your session has expired. Please log in again."
        );
    }

    #[test]
    fn unknown_code_falls_back() {
        assert_eq!(message_for("ERR_AUTH_999"), FALLBACK_MESSAGE);
        assert_eq!(message_for(""), FALLBACK_MESSAGE);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(ErrorCode::parse("err_auth_001"), None);
    }

    #[test]
    fn codes_for_startup_errors() {
        let err = anyhow::Error::from(ConfigError::NoProviders).context("identity providers");
        assert_eq!(code_for_error(&err), Some(ErrorCode::Validation002));

        let err = anyhow::Error::from(ConfigError::BadPrefix {
            key: "CHATFRONT_API_PREFIX",
            value: "api".into(),
        });
        assert_eq!(code_for_error(&err), Some(ErrorCode::Validation001));

        let err = anyhow::Error::from(SessionError::Unavailable("down".into()));
        assert_eq!(code_for_error(&err), Some(ErrorCode::Auth001));

        let err = anyhow::Error::from(DictionaryError::Io {
            path: "ja.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        })
        .context("loading dictionaries");
        assert_eq!(code_for_error(&err), Some(ErrorCode::Network002));
    }

    #[test]
    fn unrelated_errors_have_no_code() {
        let err = anyhow::anyhow!("bind failed");
        assert_eq!(code_for_error(&err), None);
    }

    #[test]
    fn display_and_serde_agree() {
        for code in ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{code}\""));
        }
    }
}
