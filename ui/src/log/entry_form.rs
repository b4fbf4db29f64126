use dioxus::prelude::*;

use crate::core::format;
use crate::core::model::DEFAULT_PARTS;
use crate::dashboard::SectionHeader;
use crate::state::{edit_text, use_store, Draft};

/// "Update Stream": record a new entry dated today. Blank fields carry the
/// latest value forward.
#[component]
pub fn EntryForm() -> Element {
    let mut store = use_store();
    let snapshot = store.state().read().clone();
    let mut open = use_signal(|| false);
    let mut draft = use_signal(Draft::new);

    let toggle_label = if open() { "Cancel" } else { "New Sync" };

    let fields = DEFAULT_PARTS.iter().map(|&part| {
        let placeholder = snapshot
            .latest_value(part)
            .map(edit_text)
            .unwrap_or_else(|| "0".to_string());
        let value = draft.read().get(&part).cloned().unwrap_or_default();
        let unit = part.unit().label();
        let id = format!("entry-{}", part.slug());
        rsx! {
            label { key: "{id}", class: "field", r#for: "{id}",
                span { class: "field__label", "{part.label()} ({unit})" }
                input {
                    id: "{id}",
                    class: "field__input",
                    r#type: "number",
                    step: "0.1",
                    placeholder: "{placeholder}",
                    value: "{value}",
                    oninput: move |evt| {
                        draft.write().insert(part, evt.value());
                    },
                }
            }
        }
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        store.append_entry(&draft.read());
        draft.set(Draft::new());
        open.set(false);
    };

    let today = format::iso_day(format::today_utc());

    rsx! {
        section { class: "panel entry-form",
            SectionHeader { title: "Update Stream", subtitle: "MANUAL BIOMETRIC NODE SYNC",
                button {
                    r#type: "button",
                    class: "button button--small",
                    onclick: move |_| {
                        if open() {
                            draft.set(Draft::new());
                        }
                        open.set(!open());
                    },
                    "{toggle_label}"
                }
            }
            if open() {
                form { class: "entry-form__form", onsubmit: submit,
                    p { class: "panel__meta", "Entry date: {today}" }
                    div { class: "entry-form__grid", {fields} }
                    button { r#type: "submit", class: "button button--primary",
                        "Initialize Neural Integration"
                    }
                }
            }
        }
    }
}
