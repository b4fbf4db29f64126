use dioxus::prelude::*;

use crate::core::format;
use crate::core::model::DEFAULT_PARTS;
use crate::dashboard::SectionHeader;
use crate::state::use_store;

/// Every recorded entry, newest first.
#[component]
pub fn HistoryTable() -> Element {
    let store = use_store();
    let snapshot = store.state().read().clone();
    let total = snapshot.entries.len();
    let subtitle = format!("{total} ENTRIES ON RECORD");

    let rows = snapshot.entries.iter().rev().map(|entry| {
        let cells = DEFAULT_PARTS.iter().map(|&part| {
            let text = entry
                .value(part)
                .map(|value| format::format_number(value, 1))
                .unwrap_or_else(|| "--".to_string());
            rsx! { td { key: "{part.slug()}", "{text}" } }
        });
        rsx! {
            tr { key: "{entry.id}",
                th { scope: "row", "{entry.date}" }
                {cells}
            }
        }
    });

    rsx! {
        section { class: "panel history",
            SectionHeader { title: "Sync History", subtitle }
            if total == 0 {
                p { class: "panel__placeholder", "No entries recorded yet." }
            } else {
                div { class: "history__scroll",
                    table { class: "history__table",
                        thead {
                            tr {
                                th { scope: "col", "Date" }
                                for part in DEFAULT_PARTS {
                                    th { key: "{part.slug()}", scope: "col", "{part.label()}" }
                                }
                            }
                        }
                        tbody { {rows} }
                    }
                }
            }
        }
    }
}
