use dioxus::prelude::*;

use super::{SectionHeader, ZoomButton};
use crate::core::chart::{
    area_path, axis_ticks, compute_domain, gradient_stops, line_path, plot_points, select_window,
    ChartFrame,
};
use crate::core::format;
use crate::core::model::BodyPart;
use crate::state::use_store;

/// Single-series area chart with its own zoom state (weight and body fat).
#[component]
pub fn AreaChart(part: BodyPart, title: String, subtitle: String) -> Element {
    let store = use_store();
    let snapshot = store.state().read().clone();
    let mut zoomed_out = use_signal(|| false);

    let frame = ChartFrame::COMPACT;
    let goal = snapshot.goal_for(part);
    let displayed = select_window(&snapshot.entries, zoomed_out());
    let bounds = compute_domain(displayed, &[part], |p| snapshot.goal_for(p))
        .resolve(std::iter::empty());

    let count = displayed.len();
    let points = plot_points(displayed, part, &frame, bounds);
    let line = line_path(&points);
    let area = area_path(&points, &frame);
    let stops = gradient_stops(displayed, part, goal);
    let gradient_id = format!("area-{}", part.slug());
    let x1 = frame.x_at(0, count);
    let x2 = frame.x_at(count.saturating_sub(1), count);

    let goal_y = frame.y_at(goal, bounds);
    let goal_text = format::goal_label(part, goal);
    let goal_label_x = frame.right() - 4.0;
    let goal_label_y = goal_y - 6.0;

    let tick_x = frame.left() - 6.0;
    let ticks: Vec<(f64, String)> = axis_ticks(bounds, 3)
        .into_iter()
        .map(|tick| (frame.y_at(tick, bounds), format::format_number(tick, 1)))
        .collect();

    let latest = snapshot
        .latest_value(part)
        .map(|value| format::format_value(part, value))
        .unwrap_or_else(|| "--".to_string());

    rsx! {
        section { class: "panel area-chart", "data-part": "{part.slug()}",
            SectionHeader { title, subtitle,
                span { class: "area-chart__latest", "{latest}" }
                ZoomButton {
                    zoomed_out: zoomed_out(),
                    on_toggle: move |_| zoomed_out.set(!zoomed_out()),
                }
            }
            if points.is_empty() {
                p { class: "panel__placeholder", "No {part.label()} data yet." }
            } else {
                svg { class: "chart chart--compact", view_box: "{frame.view_box()}",
                    defs {
                        linearGradient {
                            id: "{gradient_id}",
                            "gradientUnits": "userSpaceOnUse",
                            x1: "{x1}",
                            x2: "{x2}",
                            y1: "0",
                            y2: "0",
                            for grad in stops {
                                stop { offset: "{grad.offset_pct}%", stop_color: "{grad.color}" }
                            }
                        }
                    }
                    for (y, label) in ticks {
                        line {
                            class: "chart__grid",
                            x1: "{frame.left()}",
                            x2: "{frame.right()}",
                            y1: "{y}",
                            y2: "{y}",
                        }
                        text { class: "chart__tick", x: "{tick_x}", y: "{y}", text_anchor: "end", "{label}" }
                    }
                    path { class: "chart__area", d: "{area}", fill: "url(#{gradient_id})", fill_opacity: "0.18" }
                    path {
                        d: "{line}",
                        fill: "none",
                        stroke: "url(#{gradient_id})",
                        stroke_width: "2.5",
                        stroke_linejoin: "round",
                    }
                    line {
                        class: "chart__goal",
                        x1: "{frame.left()}",
                        x2: "{frame.right()}",
                        y1: "{goal_y}",
                        y2: "{goal_y}",
                        stroke_dasharray: "4 4",
                    }
                    text {
                        class: "chart__goal-label",
                        x: "{goal_label_x}",
                        y: "{goal_label_y}",
                        text_anchor: "end",
                        "{goal_text}"
                    }
                }
            }
        }
    }
}
