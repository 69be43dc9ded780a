use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::Navbar;
use crate::routes::Route;
use crate::state::AppState;

#[derive(Properties, PartialEq)]
pub struct NotFoundProps {
    pub state: AppState,
}

#[function_component(NotFoundPage)]
pub fn not_found_page(props: &NotFoundProps) -> Html {
    html! {
        <>
            <Navbar theme={props.state.theme.clone()} />
            <div class="max-w-4xl mx-auto p-8 text-center">
                <h1 class="text-2xl font-bold mb-4">{ "404 Not Found" }</h1>
                <Link<Route> to={Route::Home} classes="text-blue-600 dark:text-blue-400 hover:underline">
                    { "Go Home" }
                </Link<Route>>
            </div>
        </>
    }
}
