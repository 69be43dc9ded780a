use web_sys::HtmlInputElement;
use yew::prelude::*;

use rollcall::actions::{FormField, check_in};
use rollcall::id::SessionId;
use rollcall::validate::ROLL_NO_MAX_CHARS;

use crate::state::AppState;

#[derive(Properties, PartialEq)]
pub struct CheckinModalProps {
    pub state: AppState,
    pub session_id: SessionId,
    pub open: bool,
    pub on_close: Callback<()>,
    /// Fired once per successful check-in; the dialog stays open for the next student.
    pub on_checked_in: Callback<()>,
}

#[function_component(CheckinModal)]
pub fn checkin_modal(props: &CheckinModalProps) -> Html {
    let form = use_state(FormField::default);

    let submit = {
        let api = props.state.api.clone();
        let toasts = props.state.toasts.clone();
        let session_id = props.session_id.clone();
        let on_checked_in = props.on_checked_in.clone();
        let form = form.clone();
        Callback::from(move |_: ()| {
            if form.is_busy() {
                return;
            }
            let api = api.clone();
            let toasts = toasts.clone();
            let session_id = session_id.clone();
            let on_checked_in = on_checked_in.clone();
            let snapshot = (*form).clone();
            let setter = form.setter();
            wasm_bindgen_futures::spawn_local(async move {
                check_in(
                    &*api,
                    &toasts,
                    &session_id,
                    &snapshot,
                    |next| setter.set(next),
                    || on_checked_in.emit(()),
                )
                .await;
            });
        })
    };

    if !props.open {
        return html! {};
    }

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

    let on_submit = submit.reform(|_: MouseEvent| ());
    let on_dismiss = props.on_close.reform(|_: MouseEvent| ());
    let keep_open = Callback::from(|event: MouseEvent| event.stop_propagation());
    let busy = form.is_busy();

    html! {
        <div class="fixed inset-0 z-40 bg-black/50 flex items-center justify-center p-4" onclick={on_dismiss.clone()}>
            <div
                class="bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700 rounded-xl shadow-lg w-full max-w-md"
                role="dialog"
                onclick={keep_open}
            >
                <div class="flex items-center justify-between px-6 pt-5">
                    <h3 class="text-lg font-semibold text-gray-900 dark:text-gray-100">{ "Check-in Student" }</h3>
                    <button
                        class="text-2xl leading-none text-gray-500 hover:text-gray-700 dark:hover:text-gray-300"
                        title="Close"
                        onclick={on_dismiss.clone()}
                    >
                        { "×" }
                    </button>
                </div>

                <div class="px-6 py-4">
                    <label for="roll-no" class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1">
                        { "Roll Number" }
                    </label>
                    <input
                        id="roll-no"
                        type="text"
                        class="w-full px-3 py-2 border border-gray-300 dark:border-gray-600 rounded-md bg-white dark:bg-gray-700 focus:outline-none focus:ring-2 focus:ring-blue-500"
                        placeholder="Enter roll number (e.g., AIE22039)"
                        maxlength={ROLL_NO_MAX_CHARS.to_string()}
                        value={form.value().to_string()}
                        disabled={busy}
                        autofocus=true
                        oninput={on_input}
                        onkeypress={on_keypress}
                    />
                </div>

                <div class="flex justify-end space-x-3 px-6 pb-5">
                    <button
                        class="px-4 py-2 rounded-md border border-gray-300 dark:border-gray-600 text-gray-700 dark:text-gray-200 hover:bg-gray-100 dark:hover:bg-gray-700 disabled:opacity-50"
                        onclick={on_dismiss}
                        disabled={busy}
                    >
                        { "Cancel" }
                    </button>
                    <button
                        class="px-4 py-2 rounded-md bg-blue-600 text-white hover:bg-blue-700 disabled:opacity-50"
                        onclick={on_submit}
                        disabled={!form.can_submit()}
                    >
                        { if busy { "Checking In..." } else { "Check-in" } }
                    </button>
                </div>
            </div>
        </div>
    }
}
