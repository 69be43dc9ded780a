use rollcall::data::SessionStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub status: SessionStatus,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    let tone = if props.status.is_active() {
        "bg-green-100 dark:bg-green-900/40 text-green-800 dark:text-green-300"
    } else {
        "bg-red-100 dark:bg-red-900/40 text-red-800 dark:text-red-300"
    };

    html! {
        <span class={classes!("inline-flex", "items-center", "px-2.5", "py-0.5", "rounded-full", "text-xs", "font-medium", tone)}>
            { props.status.label() }
        </span>
    }
}
