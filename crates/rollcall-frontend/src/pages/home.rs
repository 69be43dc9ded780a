use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use rollcall::actions::{FormField, start_session};
use rollcall::async_callback;
use rollcall::validate::SUBJECT_MAX_CHARS;

use crate::components::Navbar;
use crate::routes::Route;
use crate::state::AppState;

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    pub state: AppState,
}

#[function_component(HomePage)]
pub fn home_page(props: &HomeProps) -> Html {
    let form = use_state(FormField::default);
    let navigator = use_navigator();

    let api = props.state.api.clone();
    let toasts = props.state.toasts.clone();
    let submit = async_callback!([api, toasts, form, navigator] |_submit: ()| {
        let setter = form.setter();
        let started = start_session(&*api, &toasts, &form, |next| setter.set(next)).await;
        if let (Some(id), Some(navigator)) = (started, navigator) {
            navigator.push(&Route::Session {
                id: id.into_string(),
            });
        }
    });

    let on_input = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                form.set(form.edited(input.value()));
            }
        })
    };

    let on_keypress = {
        let submit = submit.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                submit.emit(());
            }
        })
    };

    let busy = form.is_busy();

    html! {
        <>
            <Navbar theme={props.state.theme.clone()} />
            <div class="max-w-xl mx-auto px-4 py-12">
                <div class="text-center mb-8">
                    <svg class="h-12 w-12 mx-auto text-blue-600 dark:text-blue-400 mb-4" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.5">
                        <path d="M16 21v-2a4 4 0 0 0-4-4H6a4 4 0 0 0-4 4v2" />
                        <circle cx="9" cy="7" r="4" />
                        <path d="m22 21-2-2" />
                        <path d="M16 16h4" />
                    </svg>
                    <h1 class="text-3xl font-bold text-gray-900 dark:text-gray-100">{ "Attendance Session Manager" }</h1>
                    <p class="text-gray-600 dark:text-gray-400 mt-2">
                        { "Professional attendance tracking for modern classrooms" }
                    </p>
                </div>

                <div class="bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700 rounded-xl p-6 shadow-sm">
                    <h2 class="text-xl font-semibold mb-1">{ "Start New Session" }</h2>
                    <p class="text-gray-500 dark:text-gray-400 mb-6">{ "Create a new attendance session for your class" }</p>

                    <label for="subject" class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1">
                        { "Subject Name" }
                    </label>
                    <input
                        id="subject"
                        type="text"
                        class="w-full px-3 py-2 mb-4 border border-gray-300 dark:border-gray-600 rounded-md bg-white dark:bg-gray-700 focus:outline-none focus:ring-2 focus:ring-blue-500"
                        placeholder="Enter subject name (e.g., Artificial Intelligence)"
                        maxlength={SUBJECT_MAX_CHARS.to_string()}
                        value={form.value().to_string()}
                        disabled={busy}
                        oninput={on_input}
                        onkeypress={on_keypress}
                    />

                    <button
                        class="w-full bg-blue-600 text-white px-4 py-2 rounded-md hover:bg-blue-700 disabled:opacity-50 cursor-pointer"
                        onclick={submit.reform(|_: MouseEvent| ())}
                        disabled={!form.can_submit()}
                    >
                        { if busy { "Starting Session..." } else { "Start Session" } }
                    </button>
                </div>
            </div>
        </>
    }
}
