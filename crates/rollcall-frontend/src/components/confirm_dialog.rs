use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub open: bool,
    pub title: AttrValue,
    pub message: AttrValue,
    pub confirm_label: AttrValue,
    #[prop_or(AttrValue::Static("Cancel"))]
    pub cancel_label: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
}

/// Yes/no modal. Renders nothing while closed.
#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    if !props.open {
        return html! {};
    }

    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_cancel = on_backdrop.clone();
    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };
    let keep_open = Callback::from(|event: MouseEvent| event.stop_propagation());

    html! {
        <div class="fixed inset-0 z-40 bg-black/50 flex items-center justify-center p-4" onclick={on_backdrop}>
            <div
                class="bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700 rounded-xl p-6 shadow-lg w-full max-w-md"
                role="dialog"
                onclick={keep_open}
            >
                <h3 class="text-lg font-semibold text-gray-900 dark:text-gray-100 mb-2">{ &props.title }</h3>
                <p class="text-gray-600 dark:text-gray-400 mb-6">{ &props.message }</p>
                <div class="flex justify-end space-x-3">
                    <button
                        class="px-4 py-2 rounded-md border border-gray-300 dark:border-gray-600 text-gray-700 dark:text-gray-200 hover:bg-gray-100 dark:hover:bg-gray-700"
                        onclick={on_cancel}
                    >
                        { &props.cancel_label }
                    </button>
                    <button
                        class="px-4 py-2 rounded-md bg-red-600 text-white hover:bg-red-700"
                        onclick={on_confirm}
                    >
                        { &props.confirm_label }
                    </button>
                </div>
            </div>
        </div>
    }
}
