use dioxus::prelude::*;

use super::SectionHeader;
use crate::core::color::color_for;
use crate::core::format;
use crate::core::model::{BodyPart, DEFAULT_PARTS};
use crate::state::{latest_draft, use_store, Draft};

#[component]
pub fn SnapshotPanel() -> Element {
    let mut store = use_store();
    let snapshot = store.state().read().clone();
    let mut editing = use_signal(|| false);
    let mut draft = use_signal(Draft::new);

    let latest_date = snapshot
        .latest()
        .map(|entry| entry.date.clone())
        .unwrap_or_else(|| "--".to_string());
    let has_latest = snapshot.latest().is_some();
    let subtitle = format!("REAL-TIME FEED // LATEST SYNC: {latest_date}");

    let cards = DEFAULT_PARTS.iter().map(|&part| {
        let value = snapshot.latest_value(part).unwrap_or(0.0);
        let goal = snapshot.goal_for(part);
        let draft_value = draft.read().get(&part).cloned().unwrap_or_default();
        rsx! {
            MetricCard {
                key: "{part.slug()}",
                part,
                value,
                goal,
                editing: editing(),
                draft_value,
                on_input: move |text: String| {
                    draft.write().insert(part, text);
                },
            }
        }
    });

    let start_edit = {
        let snapshot = snapshot.clone();
        move |_| {
            draft.set(latest_draft(&snapshot));
            editing.set(true);
        }
    };

    let save = move |_| {
        store.overwrite_latest(&draft.read());
        editing.set(false);
    };

    rsx! {
        section { class: "panel snapshot",
            SectionHeader { title: "Biometric Snapshot", subtitle,
                if editing() {
                    button {
                        r#type: "button",
                        class: "button button--primary button--small",
                        onclick: save,
                        "Save Snapshot"
                    }
                    button {
                        r#type: "button",
                        class: "button button--ghost button--small",
                        onclick: move |_| editing.set(false),
                        "Cancel"
                    }
                } else if has_latest {
                    button {
                        r#type: "button",
                        class: "button button--small",
                        onclick: start_edit,
                        "Sync Current"
                    }
                }
            }
            div { class: "snapshot__grid", {cards} }
        }
    }
}

/// One tracked part: current value, goal proximity color and progress.
#[component]
pub fn MetricCard(
    part: BodyPart,
    value: f64,
    goal: f64,
    #[props(default)] editing: bool,
    #[props(default)] draft_value: String,
    on_input: EventHandler<String>,
) -> Element {
    let color = color_for(part.baseline_color(), value, goal);
    let progress = format::progress_percent(value, goal);
    let class_name = if format::is_closing(value, goal) {
        "metric-card metric-card--closing"
    } else {
        "metric-card"
    };
    let unit = part.unit().label();
    let shown = format::format_number(value, 1);
    let diff = format::diff_label(part, value, goal);
    let goal_text = format::goal_label(part, goal);

    rsx! {
        div { class: "{class_name}", "data-part": "{part.slug()}",
            div { class: "metric-card__head",
                span { class: "metric-card__swatch", style: "background: {color}" }
                span { class: "metric-card__label", "{part.label()}" }
                span { class: "metric-card__diff", "{diff}" }
            }
            if editing {
                input {
                    class: "metric-card__input",
                    r#type: "number",
                    step: "0.1",
                    aria_label: "{part.label()}",
                    value: "{draft_value}",
                    oninput: move |evt| on_input.call(evt.value()),
                }
            } else {
                div { class: "metric-card__value",
                    strong { style: "color: {color}", "{shown}" }
                    span { class: "metric-card__unit", "{unit}" }
                }
            }
            div { class: "metric-card__bar",
                div {
                    class: "metric-card__fill",
                    style: "width: {progress}%; background: {color}",
                }
            }
            div { class: "metric-card__meta",
                span { "{goal_text}" }
                span { "{progress}%" }
            }
        }
    }
}
