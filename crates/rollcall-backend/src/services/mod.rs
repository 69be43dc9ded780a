//! Backend services for attendance sessions.
//!
//! The service trait describes the session lifecycle; the in-memory
//! implementation is what the server runs with.

pub mod sessions;

pub use sessions::*;
