use dioxus::prelude::*;

use crate::state::use_store;

/// Non-blocking banner for persistence problems.
#[component]
pub fn NoticeBanner() -> Element {
    let mut store = use_store();
    let Some(message) = store.notice() else {
        return rsx! {};
    };

    rsx! {
        div { class: "notice", role: "status",
            span { class: "notice__text", "{message}" }
            button {
                r#type: "button",
                class: "button button--ghost button--small",
                onclick: move |_| store.dismiss_notice(),
                "Dismiss"
            }
        }
    }
}
