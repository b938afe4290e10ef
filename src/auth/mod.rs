//! Identity collaborator boundary: session presence and provider handoff

pub mod providers;
pub mod session;

pub use providers::{Provider, ProviderConfig, Providers};
pub use session::{CookieSession, SessionCheck, SessionError, StaticSession};
