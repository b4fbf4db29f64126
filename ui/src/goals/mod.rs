//! "Neural Calibration": edit goal targets.

use dioxus::prelude::*;

use crate::core::color::color_for;
use crate::core::format;
use crate::core::model::DEFAULT_PARTS;
use crate::dashboard::SectionHeader;
use crate::state::{goals_draft, use_store, Draft};

#[component]
pub fn GoalsPanel() -> Element {
    let mut store = use_store();
    let snapshot = store.state().read().clone();
    let mut draft = use_signal(Draft::new);
    let mut dirty = use_signal(|| false);

    // Untouched fields mirror the committed goals.
    let committed = goals_draft(&snapshot);

    let rows = DEFAULT_PARTS.iter().map(|&part| {
        let current = snapshot.latest_value(part);
        let goal = snapshot.goal_for(part);
        let has_goal = snapshot.goals.iter().any(|g| g.part == part);
        let buffer = if dirty() { draft.read().clone() } else { committed.clone() };
        let value = buffer.get(&part).cloned().unwrap_or_default();
        let color = color_for(
            part.baseline_color(),
            current.unwrap_or(0.0),
            goal,
        );
        let current_text = current
            .map(|value| format::format_value(part, value))
            .unwrap_or_else(|| "--".to_string());
        let id = format!("goal-{}", part.slug());
        rsx! {
            div { key: "{id}", class: "goal-row",
                span { class: "goal-row__swatch", style: "background: {color}" }
                label { class: "goal-row__label", r#for: "{id}", "{part.label()}" }
                span { class: "goal-row__current", "NOW {current_text}" }
                input {
                    id: "{id}",
                    class: "field__input goal-row__input",
                    r#type: "number",
                    step: "0.1",
                    disabled: !has_goal,
                    value: "{value}",
                    oninput: move |evt| {
                        if !dirty() {
                            draft.set(buffer.clone());
                            dirty.set(true);
                        }
                        draft.write().insert(part, evt.value());
                    },
                }
                span { class: "goal-row__unit", "{part.unit().label()}" }
            }
        }
    });

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        store.overwrite_goals(&draft.read());
        dirty.set(false);
    };

    let reset = move |_| {
        dirty.set(false);
    };

    rsx! {
        section { class: "panel goals",
            SectionHeader {
                title: "Neural Calibration",
                subtitle: "REMAP TARGET BIOMETRIC OBJECTIVES",
            }
            form { class: "goals__form", onsubmit: save,
                div { class: "goals__list", {rows} }
                div { class: "goals__actions",
                    button {
                        r#type: "submit",
                        class: "button button--primary",
                        disabled: !dirty(),
                        "Commit Targets"
                    }
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        disabled: !dirty(),
                        onclick: reset,
                        "Discard"
                    }
                }
            }
        }
    }
}
