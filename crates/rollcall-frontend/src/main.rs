mod components;
mod pages;
mod routes;
mod scheduler;
mod state;

use std::rc::Rc;

use yew::prelude::*;
use yew_router::prelude::*;

use rollcall::{api::Api, config, log::info};

use routes::{Route, switch};
use state::{AppState, ToastStack, use_theme_state, use_toasts};

#[function_component(App)]
fn app() -> Html {
    let api = use_memo((), |_| {
        let base_url = config::api_base_url();
        info!(%base_url, "using attendance backend");
        Api::new(base_url)
    });
    let theme = use_theme_state();
    let (toasts, queue) = use_toasts();

    let state = AppState {
        api: Rc::clone(&api),
        theme,
        toasts: toasts.clone(),
    };

    html! {
        <BrowserRouter>
            <div class="min-h-screen bg-gray-50 dark:bg-gray-900 text-gray-900 dark:text-gray-100">
                <Switch<Route> render={move |route| switch(route, state.clone())} />
            </div>
            <ToastStack {queue} {toasts} />
        </BrowserRouter>
    }
}

fn main() {
    rollcall::log::setup().expect("Failed to setup logging");
    yew::Renderer::<App>::new().render();
}
