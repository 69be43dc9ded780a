#[macro_export]
/// Builds a Yew `Callback` that clones the listed handles and runs its body on
/// `wasm_bindgen_futures::spawn_local`.
///
/// The body runs after the event has been dispatched, so anything that must happen
/// synchronously such as `prevent_default` belongs outside the macro.
///
/// Every listed variable is cloned once when the callback is built and once more
/// per invocation, so the async block owns its own copies.
///
/// Without an event parameter:
/// ```compile_fail
/// let refresh = async_callback!([api, toasts, view, session_id] {
///     let next = load_session(&*api, &toasts, &session_id).await;
///     view.set(next);
/// });
/// ```
///
/// With an event parameter:
/// ```compile_fail
/// let on_start = async_callback!([api, toasts, form, navigator] |_click: MouseEvent| {
///     let setter = form.setter();
///     if let Some(id) = start_session(&*api, &toasts, &form, |next| setter.set(next)).await {
///         navigator.push(&Route::Session { id: id.into_string() });
///     }
/// });
/// ```
macro_rules! async_callback {
    ([$($var:ident),* $(,)?] |$event:ident $(: $ty:ty)?| $body:expr) => {
        {
            $(let $var = $var.clone();)*
            Callback::from(move |$event $(: $ty)?| {
                $(let $var = $var.clone();)*
                wasm_bindgen_futures::spawn_local(async move {
                    $body
                });
            })
        }
    };

    ([$($var:ident),* $(,)?] $body:expr) => {
        {
            $(let $var = $var.clone();)*
            Callback::from(move |_| {
                $(let $var = $var.clone();)*
                wasm_bindgen_futures::spawn_local(async move {
                    $body
                });
            })
        }
    };
}
