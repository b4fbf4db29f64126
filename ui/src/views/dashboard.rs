use dioxus::prelude::*;

use crate::core::model::{BodyPart, SECONDARY_CHART_PARTS};
use crate::dashboard::{AreaChart, InsightPanel, SnapshotPanel, TrendChart};

fn area_headings(part: BodyPart) -> (&'static str, &'static str) {
    match part {
        BodyPart::BodyFat => ("Composition", "ADIPOSE TISSUE RATIO"),
        _ => ("Mass Vector", "TOTAL BIOMASS TRENDLINE"),
    }
}

#[component]
pub fn Dashboard() -> Element {
    let lang = super::use_lang_marker();
    tracing::debug!(%lang, "dashboard render");

    rsx! {
        section { class: "page page-dashboard",
            header { class: "page__header",
                h1 { {crate::t!("dashboard-title")} }
                p { class: "page__intro", {crate::t!("dashboard-intro")} }
            }

            InsightPanel {}
            SnapshotPanel {}
            TrendChart {}

            div { class: "dashboard__split",
                for part in SECONDARY_CHART_PARTS {
                    AreaChart {
                        key: "{part.slug()}",
                        part,
                        title: area_headings(part).0.to_string(),
                        subtitle: area_headings(part).1.to_string(),
                    }
                }
            }
        }
    }
}
