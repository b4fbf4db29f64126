use dioxus::prelude::*;

use crate::goals::GoalsPanel;

#[component]
pub fn Goals() -> Element {
    let _lang = super::use_lang_marker();

    rsx! {
        section { class: "page page-goals",
            header { class: "page__header",
                h1 { {crate::t!("goals-title")} }
                p { class: "page__intro", {crate::t!("goals-intro")} }
            }

            GoalsPanel {}
        }
    }
}
