use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use rollcall::feedback::{Level, Notice, Notifier};
use yew::prelude::*;

/// How long a toast stays on screen.
const TOAST_MILLIS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u64),
}

#[derive(Debug, Default, PartialEq)]
pub struct ToastQueue {
    pub toasts: Vec<Toast>,
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Push(toast) => toasts.push(toast),
            ToastAction::Dismiss(id) => toasts.retain(|toast| toast.id != id),
        }
        Rc::new(Self { toasts })
    }
}

/// Handle the pages notify through. Every notice becomes a toast that dismisses
/// itself after a few seconds.
#[derive(Clone)]
pub struct Toasts {
    dispatch: UseReducerDispatcher<ToastQueue>,
    next_id: Rc<Cell<u64>>,
}

impl PartialEq for Toasts {
    fn eq(&self, other: &Self) -> bool {
        self.dispatch == other.dispatch && Rc::ptr_eq(&self.next_id, &other.next_id)
    }
}

impl Toasts {
    pub fn dismiss(&self, id: u64) {
        self.dispatch.dispatch(ToastAction::Dismiss(id));
    }
}

impl Notifier for Toasts {
    fn notify(&self, notice: Notice) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        self.dispatch.dispatch(ToastAction::Push(Toast { id, notice }));

        let dispatch = self.dispatch.clone();
        Timeout::new(TOAST_MILLIS, move || dispatch.dispatch(ToastAction::Dismiss(id))).forget();
    }
}

/// Toast queue for the root component: the [`Toasts`] handle for notifying, and
/// the queue itself for rendering a [`ToastStack`].
#[hook]
pub fn use_toasts() -> (Toasts, UseReducerHandle<ToastQueue>) {
    let queue = use_reducer(ToastQueue::default);
    let next_id = use_memo((), |_| Cell::new(0));
    let toasts = Toasts {
        dispatch: queue.dispatcher(),
        next_id: next_id.clone(),
    };
    (toasts, queue)
}

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub queue: UseReducerHandle<ToastQueue>,
    pub toasts: Toasts,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 w-80">
            { for props.queue.toasts.iter().map(|toast| {
                let onclick = {
                    let toasts = props.toasts.clone();
                    let id = toast.id;
                    Callback::from(move |_| toasts.dismiss(id))
                };
                let tone = match toast.notice.level {
                    Level::Success => "bg-green-50 dark:bg-green-900/40 border-green-300 dark:border-green-700 text-green-800 dark:text-green-200",
                    Level::Error => "bg-red-50 dark:bg-red-900/40 border-red-300 dark:border-red-700 text-red-800 dark:text-red-200",
                };
                html! {
                    <div
                        key={toast.id}
                        role="status"
                        class={classes!("border", "rounded-lg", "px-4", "py-3", "shadow-md", "text-sm", "cursor-pointer", tone)}
                        {onclick}
                    >
                        { &toast.notice.message }
                    </div>
                }
            }) }
        </div>
    }
}
