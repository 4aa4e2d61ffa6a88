use dioxus::prelude::*;
use store::Notice;

use crate::icons::FaXmark;
use crate::Icon;

#[cfg(target_arch = "wasm32")]
const TOAST_MILLIS: u64 = 3000;

/// Shows a view's current notice, if any.
#[component]
pub fn Toast(notice: Option<Notice>, on_dismiss: EventHandler<()>) -> Element {
    let Some(notice) = notice else {
        return rsx! {};
    };

    rsx! {
        ToastMessage {
            key: "{notice.message}",
            notice,
            on_dismiss,
        }
    }
}

/// Keyed by message so each new notice gets its own timer.
#[component]
fn ToastMessage(notice: Notice, on_dismiss: EventHandler<()>) -> Element {
    use_hook(move || {
        #[cfg(target_arch = "wasm32")]
        spawn(async move {
            gloo_timers::future::sleep(std::time::Duration::from_millis(TOAST_MILLIS)).await;
            on_dismiss.call(());
        });
    });

    let class = if notice.is_error() {
        "toast toast--error"
    } else {
        "toast toast--success"
    };

    rsx! {
        div {
            class: "{class}",
            role: "status",
            span { "{notice.message}" }
            button {
                class: "toast__close",
                title: "Fechar",
                onclick: move |_| on_dismiss.call(()),
                Icon { icon: FaXmark, width: 12, height: 12 }
            }
        }
    }
}
