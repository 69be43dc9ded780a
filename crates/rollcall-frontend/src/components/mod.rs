//! Reusable UI components for the attendance pages.

pub mod checkin_modal;
pub mod confirm_dialog;
pub mod navbar;
pub mod status_badge;

pub use checkin_modal::*;
pub use confirm_dialog::*;
pub use navbar::*;
pub use status_badge::*;
