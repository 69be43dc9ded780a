//! Application-wide state owned by the root component and passed down as props.

pub mod theme;
pub mod toasts;

use std::rc::Rc;

use rollcall::api::Api;

pub use theme::*;
pub use toasts::*;

/// Everything a page needs from the root: the backend client, the theme handle and
/// the toast sink.
#[derive(Clone)]
pub struct AppState {
    pub api: Rc<Api>,
    pub theme: ThemeHandle,
    pub toasts: Toasts,
}

impl PartialEq for AppState {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api) && self.theme == other.theme && self.toasts == other.toasts
    }
}
