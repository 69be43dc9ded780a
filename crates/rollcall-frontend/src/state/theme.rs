use gloo_storage::{LocalStorage, Storage};
use rollcall::log::warn;
use web_sys::window;
use yew::prelude::*;

const STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` is treated as light.
    pub fn parse(value: &str) -> Self {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The current theme plus the control that flips it.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeHandle {
    theme: Theme,
    toggle: Callback<()>,
}

impl ThemeHandle {
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle(&self) {
        self.toggle.emit(());
    }
}

fn stored_or_preferred() -> Theme {
    if let Ok(stored) = LocalStorage::get::<String>(STORAGE_KEY) {
        return Theme::parse(&stored);
    }
    let prefers_dark = window()
        .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|query| query.matches());
    if prefers_dark { Theme::Dark } else { Theme::Light }
}

fn apply(theme: Theme) {
    let Some(root) = window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };
    let class_list = root.class_list();
    let result = match theme {
        Theme::Dark => class_list.add_1("dark"),
        Theme::Light => class_list.remove_1("dark"),
    };
    if result.is_err() {
        warn!(theme = theme.as_str(), "could not update the root element's class list");
    }
}

/// Theme state for the root component: restored from local storage (or the OS
/// preference), applied to `<html>`, and persisted on every toggle.
#[hook]
pub fn use_theme_state() -> ThemeHandle {
    let theme = use_state(stored_or_preferred);

    use_effect_with(*theme, |theme| apply(*theme));

    let toggle = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = theme.toggled();
            if let Err(err) = LocalStorage::set(STORAGE_KEY, next.as_str()) {
                warn!(error = %err, "failed to persist theme");
            }
            theme.set(next);
        })
    };

    ThemeHandle {
        theme: *theme,
        toggle,
    }
}
