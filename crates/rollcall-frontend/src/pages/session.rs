use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;
use yew_router::prelude::*;

use rollcall::actions::end_session;
use rollcall::api::Api;
use rollcall::confirm::ConfirmGate;
use rollcall::data::Session;
use rollcall::format::display_timestamp;
use rollcall::id::SessionId;
use rollcall::log::debug;
use rollcall::poll::{POLL_INTERVAL, Poller};
use rollcall::view::{SessionView, attendee_rows, load_session};

use crate::components::{CheckinModal, ConfirmDialog, Navbar, StatusBadge};
use crate::routes::Route;
use crate::scheduler::BrowserScheduler;
use crate::state::{AppState, Toasts};

const CARD_CLASSES: &str = "bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700 rounded-xl p-6 shadow-sm";
const LABEL_CLASSES: &str = "text-xs font-semibold tracking-wide text-gray-500 dark:text-gray-400 mb-1";

/// Fetches `id` and stores the result, unless the page has moved on to another
/// session in the meantime.
fn spawn_refresh(
    api: Rc<Api>,
    toasts: Toasts,
    view: UseStateSetter<SessionView>,
    current: Rc<RefCell<SessionId>>,
    id: SessionId,
) {
    wasm_bindgen_futures::spawn_local(async move {
        let next = load_session(&*api, &toasts, &id).await;
        if *current.borrow() == id {
            view.set(next);
        } else {
            debug!(%id, "dropping response for a session that is no longer shown");
        }
    });
}

#[derive(Properties, PartialEq)]
pub struct SessionProps {
    pub state: AppState,
    pub id: String,
}

#[function_component(SessionPage)]
pub fn session_page(props: &SessionProps) -> Html {
    let session_id = SessionId::from(props.id.as_str());
    let view = use_state(SessionView::default);
    let current = use_mut_ref(|| session_id.clone());
    let checkin_open = use_state(|| false);
    let end_gate = use_state(ConfirmGate::closed);
    let ending = use_state(|| false);
    let navigator = use_navigator();

    // Poll for as long as this session is shown; the cleanup drops the timer.
    use_effect_with(session_id.clone(), {
        let api = props.state.api.clone();
        let toasts = props.state.toasts.clone();
        let view = view.clone();
        let current = current.clone();

        move |id: &SessionId| {
            *current.borrow_mut() = id.clone();
            view.set(SessionView::Loading);

            let setter = view.setter();
            let id = id.clone();
            let poller = Poller::start(&BrowserScheduler, POLL_INTERVAL, move || {
                spawn_refresh(
                    api.clone(),
                    toasts.clone(),
                    setter.clone(),
                    current.clone(),
                    id.clone(),
                )
            });

            move || poller.stop()
        }
    });

    let refresh = {
        let api = props.state.api.clone();
        let toasts = props.state.toasts.clone();
        let setter = view.setter();
        let current = current.clone();
        let id = session_id.clone();
        Callback::from(move |_: ()| {
            spawn_refresh(
                api.clone(),
                toasts.clone(),
                setter.clone(),
                current.clone(),
                id.clone(),
            )
        })
    };

    let on_open_checkin = {
        let checkin_open = checkin_open.clone();
        Callback::from(move |_: MouseEvent| checkin_open.set(true))
    };
    let on_close_checkin = {
        let checkin_open = checkin_open.clone();
        Callback::from(move |_: ()| checkin_open.set(false))
    };

    let on_request_end = {
        let end_gate = end_gate.clone();
        Callback::from(move |_: MouseEvent| end_gate.set(end_gate.open()))
    };
    let on_cancel_end = {
        let end_gate = end_gate.clone();
        Callback::from(move |_: ()| end_gate.set(end_gate.cancel()))
    };
    let on_confirm_end = {
        let api = props.state.api.clone();
        let toasts = props.state.toasts.clone();
        let id = session_id.clone();
        let end_gate = end_gate.clone();
        let ending = ending.setter();
        let refresh = refresh.clone();
        Callback::from(move |_: ()| {
            let next = end_gate.confirm(|| {
                let (api, toasts, id, ending, refresh) = (
                    api.clone(),
                    toasts.clone(),
                    id.clone(),
                    ending.clone(),
                    refresh.clone(),
                );
                wasm_bindgen_futures::spawn_local(async move {
                    if end_session(&*api, &toasts, &id, |busy| ending.set(busy)).await {
                        refresh.emit(());
                    }
                });
            });
            end_gate.set(next);
        })
    };

    let on_go_home = Callback::from(move |_: MouseEvent| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Home);
        }
    });

    let body = match &*view {
        SessionView::Loading => html! {
            <div class="flex items-center justify-center py-12">
                <div class="flex items-center space-x-2">
                    <svg class="animate-spin h-6 w-6 text-blue-600" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                        <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
                        <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2 5.291A7.962 7.962 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3-2.647z"></path>
                    </svg>
                    <span class="text-gray-600 dark:text-gray-400">{ "Loading session..." }</span>
                </div>
            </div>
        },
        SessionView::Failed(reason) => html! {
            <div class="bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800 rounded-lg p-6">
                <h2 class="text-lg font-medium text-red-800 dark:text-red-300 mb-2">{ "Error" }</h2>
                <p class="text-red-700 dark:text-red-400 mb-4">{ reason.message() }</p>
                <button
                    class="px-4 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700 focus:outline-none focus:ring-2 focus:ring-blue-500"
                    onclick={on_go_home}
                >
                    { "Go Home" }
                </button>
            </div>
        },
        SessionView::Loaded(session) => html! {
            <SessionDetails
                session_id={session_id.clone()}
                session={session.clone()}
                ending={*ending}
                on_check_in={on_open_checkin}
                on_end={on_request_end}
            />
        },
    };

    html! {
        <>
            <Navbar theme={props.state.theme.clone()} session={view.session().cloned()} />
            <div class="max-w-4xl mx-auto p-8">
                { body }
            </div>

            <CheckinModal
                state={props.state.clone()}
                session_id={session_id.clone()}
                open={*checkin_open}
                on_close={on_close_checkin}
                on_checked_in={refresh}
            />

            <ConfirmDialog
                open={end_gate.is_open()}
                title="End Session"
                message="Are you sure you want to end this session? This action cannot be undone."
                confirm_label="End Session"
                on_confirm={on_confirm_end}
                on_close={on_cancel_end}
            />
        </>
    }
}

#[derive(Properties, PartialEq)]
struct SessionDetailsProps {
    session_id: SessionId,
    session: Session,
    ending: bool,
    on_check_in: Callback<MouseEvent>,
    on_end: Callback<MouseEvent>,
}

#[function_component(SessionDetails)]
fn session_details(props: &SessionDetailsProps) -> Html {
    let session = &props.session;
    let rows = attendee_rows(session);

    html! {
        <div class="space-y-6">
            <div class={CARD_CLASSES}>
                <h2 class="text-2xl font-bold mb-4">{ "Session Details" }</h2>
                <div class="grid grid-cols-2 sm:grid-cols-4 gap-4">
                    <div>
                        <h4 class={LABEL_CLASSES}>{ "SESSION ID" }</h4>
                        <p class="font-mono">{ props.session_id.as_str() }</p>
                    </div>
                    <div>
                        <h4 class={LABEL_CLASSES}>{ "SUBJECT" }</h4>
                        <p>{ &session.subject }</p>
                    </div>
                    <div>
                        <h4 class={LABEL_CLASSES}>{ "STATUS" }</h4>
                        <StatusBadge status={session.status} />
                    </div>
                    <div>
                        <h4 class={LABEL_CLASSES}>{ "ATTENDEES" }</h4>
                        <p>{ session.attendees_count }</p>
                    </div>
                </div>
            </div>

            <div class={CARD_CLASSES}>
                <h3 class="text-lg font-semibold mb-1">{ "Started At" }</h3>
                <p class="text-gray-700 dark:text-gray-300">{ display_timestamp(&session.started_at) }</p>
            </div>

            if session.is_active() {
                <div class={CARD_CLASSES}>
                    <h3 class="text-lg font-semibold mb-3">{ "Session Management" }</h3>
                    <div class="flex flex-wrap gap-3">
                        <button
                            class="px-4 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700"
                            onclick={props.on_check_in.clone()}
                        >
                            { "Check-in Student" }
                        </button>
                        <button
                            class="px-4 py-2 bg-red-600 text-white rounded-md hover:bg-red-700 disabled:opacity-50"
                            onclick={props.on_end.clone()}
                            disabled={props.ending}
                        >
                            { if props.ending { "Ending..." } else { "End Session" } }
                        </button>
                    </div>
                </div>
            }

            <div class={CARD_CLASSES}>
                <h3 class="text-lg font-semibold mb-3">{ "Attendees List" }</h3>
                if rows.is_empty() {
                    <p class="text-center text-gray-500 dark:text-gray-400 py-5">{ "No attendees yet" }</p>
                } else {
                    <ul class="divide-y divide-gray-200 dark:divide-gray-700">
                        { for rows.iter().enumerate().map(|(index, row)| html! {
                            <li key={index} class="flex justify-between py-2">
                                <span class="font-mono font-medium">{ &row.roll_no }</span>
                                <span class="text-gray-600 dark:text-gray-400">{ &row.checked_in }</span>
                            </li>
                        }) }
                    </ul>
                }
            </div>
        </div>
    }
}
