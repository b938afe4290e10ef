//! Chat data shown in the panes

pub mod threads;

pub use threads::{Thread, ThreadList};
