use dioxus::prelude::*;

use crate::state::{use_insights, use_store};

/// Narrative summary, refreshed whenever committed state changes.
#[component]
pub fn InsightPanel() -> Element {
    let store = use_store();
    let insights = use_insights();
    let state = store.state();

    let mut summary = use_resource(move || {
        let snapshot = state.read().clone();
        let service = insights.0.clone();
        async move { service.summarize(&snapshot).await }
    });

    let body = summary.read().clone();
    let pending = body.is_none();

    rsx! {
        section { class: "panel insight",
            div { class: "insight__badge", "AI" }
            div { class: "insight__body",
                span { class: "panel__subtitle", "NEURAL ANALYSIS" }
                if let Some(text) = body {
                    p { class: "insight__text", "{text}" }
                } else {
                    p { class: "insight__text insight__text--pending", "Synthesizing biometric trends…" }
                }
            }
            button {
                r#type: "button",
                class: "button button--ghost button--small",
                disabled: pending,
                onclick: move |_| summary.restart(),
                "Refresh"
            }
        }
    }
}
