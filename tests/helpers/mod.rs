//! Test helper utilities
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chatfront::auth::{SessionCheck, SessionError, StaticSession};
use chatfront::i18n::Dictionaries;
use chatfront::router::{Matcher, Request, Router};

/// Returns the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Returns the path to the fixture dictionaries directory
pub fn dictionaries_dir() -> PathBuf {
    fixtures_dir().join("dictionaries")
}

/// Reads a fixture file as a string
pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_dir().join(name)).expect("Failed to read fixture")
}

/// Both fixture dictionaries, loaded
pub fn dictionaries() -> Dictionaries {
    Dictionaries::load_dir(&dictionaries_dir()).expect("fixture dictionaries should load")
}

/// Router with default exclusions and a fixed session answer
pub fn router(authenticated: bool) -> Router {
    Router::new(Matcher::default(), Arc::new(StaticSession(authenticated)))
}

/// Session backend that is always down
pub struct Unavailable;

impl SessionCheck for Unavailable {
    fn check(&self, _request: &Request) -> Result<bool, SessionError> {
        Err(SessionError::Unavailable("identity backend timed out".into()))
    }
}

pub fn failing_router() -> Router {
    Router::new(Matcher::default(), Arc::new(Unavailable))
}
