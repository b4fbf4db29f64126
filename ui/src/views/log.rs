use dioxus::prelude::*;

use crate::log::{EntryForm, ExportPanel, HistoryTable};

#[component]
pub fn Log() -> Element {
    let _lang = super::use_lang_marker();

    rsx! {
        section { class: "page page-log",
            header { class: "page__header",
                h1 { {crate::t!("log-title")} }
                p { class: "page__intro", {crate::t!("log-intro")} }
            }

            EntryForm {}
            HistoryTable {}
            ExportPanel {}
        }
    }
}
