//! The shared library for Rollcall, a classroom attendance tracker.
//!
//! This crate holds everything the web client and the reference backend agree on:
//! wire types, the HTTP client, input validation, error classification, the polling
//! primitive and the view flows that drive the Yew pages. None of it touches the DOM,
//! so the view logic is tested natively.

pub mod actions;
pub mod api;
pub mod config;
pub mod confirm;
pub mod data;
pub mod errors;
pub mod feedback;
pub mod format;
pub mod id;
pub mod log;
pub mod macros;
pub mod poll;
pub mod validate;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use serde;
pub use serde_json;
pub use tracing;
