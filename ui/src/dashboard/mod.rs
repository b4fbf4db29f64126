//! Dashboard panels: biometric snapshot, projection chart, the two area
//! charts and the insight feed.

mod area_chart;
mod insight_panel;
mod snapshot;
mod trend_chart;

pub use area_chart::AreaChart;
pub use insight_panel::InsightPanel;
pub use snapshot::{MetricCard, SnapshotPanel};
pub use trend_chart::TrendChart;

use dioxus::prelude::*;

#[component]
pub fn SectionHeader(title: String, subtitle: String, children: Element) -> Element {
    rsx! {
        div { class: "panel__header",
            div { class: "panel__titles",
                h2 { class: "panel__title", "{title}" }
                span { class: "panel__subtitle", "{subtitle}" }
            }
            div { class: "panel__actions", {children} }
        }
    }
}

/// Toggles a chart between the recent window and the full history.
#[component]
pub fn ZoomButton(zoomed_out: bool, on_toggle: EventHandler<()>) -> Element {
    let label = if zoomed_out { "Focus View" } else { "All Time" };
    rsx! {
        button {
            r#type: "button",
            class: "button button--ghost button--small",
            aria_pressed: "{zoomed_out}",
            onclick: move |_| on_toggle.call(()),
            "{label}"
        }
    }
}
