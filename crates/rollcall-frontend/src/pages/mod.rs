//! Page components for different routes in the application.

pub mod home;
pub mod not_found;
pub mod session;

pub use home::*;
pub use not_found::*;
pub use session::*;
