use rollcall::data::Session;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::StatusBadge;
use crate::routes::Route;
use crate::state::{Theme, ThemeHandle};

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub theme: ThemeHandle,
    /// Status and attendee count are shown only when a session is supplied.
    #[prop_or_default]
    pub session: Option<Session>,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let route = use_route::<Route>();
    let navigator = use_navigator();
    let is_home = matches!(route, Some(Route::Home));

    let on_back = Callback::from(move |_: MouseEvent| {
        if let Some(navigator) = &navigator {
            navigator.replace(&Route::Home);
        }
    });

    let on_toggle = {
        let theme = props.theme.clone();
        Callback::from(move |_: MouseEvent| theme.toggle())
    };

    html! {
        <nav class="bg-white dark:bg-gray-800 border-b border-gray-200 dark:border-gray-700 sticky top-0 z-10">
            <div class="max-w-4xl mx-auto px-4 py-3 flex items-center justify-between">
                <div class="flex items-center space-x-3">
                    if !is_home {
                        <button
                            class="p-1.5 rounded-md text-gray-600 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-gray-700"
                            title="Back"
                            onclick={on_back}
                        >
                            <svg class="h-5 w-5" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                                <path d="M19 12H5M12 19l-7-7 7-7" />
                            </svg>
                        </button>
                    }
                    <Link<Route> to={Route::Home} classes="text-lg font-semibold text-gray-900 dark:text-gray-100">
                        { "Attendance Manager" }
                    </Link<Route>>
                </div>

                <div class="flex items-center space-x-4">
                    if let Some(session) = &props.session {
                        <StatusBadge status={session.status} />
                        <span class="text-sm text-gray-600 dark:text-gray-400">
                            { "Attendees: " }
                            <span class="font-semibold text-gray-900 dark:text-gray-100">{ session.attendees_count }</span>
                        </span>
                    }
                    <button
                        class="p-1.5 rounded-md text-gray-600 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-gray-700"
                        title="Toggle theme"
                        onclick={on_toggle}
                    >
                        if props.theme.theme() == Theme::Dark {
                            <svg class="h-5 w-5" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                                <circle cx="12" cy="12" r="5" />
                                <path d="M12 1v2M12 21v2M4.22 4.22l1.42 1.42M18.36 18.36l1.42 1.42M1 12h2M21 12h2M4.22 19.78l1.42-1.42M18.36 5.64l1.42-1.42" />
                            </svg>
                        } else {
                            <svg class="h-5 w-5" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                                <path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z" />
                            </svg>
                        }
                    </button>
                </div>
            </div>
        </nav>
    }
}
