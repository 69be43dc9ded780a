use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{HomePage, NotFoundPage, SessionPage};
use crate::state::AppState;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/session/:id")]
    Session { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: Route, state: AppState) -> Html {
    match route {
        Route::Home => html! { <HomePage {state} /> },
        Route::Session { id } => html! { <SessionPage {state} {id} /> },
        Route::NotFound => html! { <NotFoundPage {state} /> },
    }
}
