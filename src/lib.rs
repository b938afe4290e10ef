//! Locale-aware access gate and three-pane layout controller for the chat
//! front-end.
//!
//! The crate has two cooperating halves:
//!
//! - [`router`]: a pure per-request decision (locale redirect, sign-in
//!   redirect or pass-through), served over HTTP by [`server`].
//! - [`layout`]: the collapse/expand state machine for the left and right
//!   panes of the chat screen, previewed in the terminal by [`ui`].

pub mod app;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod data;
pub mod event;
pub mod i18n;
pub mod init;
pub mod layout;
pub mod router;
pub mod server;
pub mod ui;
