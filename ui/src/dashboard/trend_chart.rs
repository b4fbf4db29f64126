use dioxus::prelude::*;

use super::{SectionHeader, ZoomButton};
use crate::core::chart::{
    axis_ticks, compute_domain, gradient_stops, line_path, plot_points, select_window, ChartFrame,
};
use crate::core::color::color_for;
use crate::core::format;
use crate::core::model::{BodyPart, DEFAULT_SELECTED_PARTS, MAIN_CHART_PARTS};

const Y_TICKS: usize = 5;
const MAX_DATE_LABELS: usize = 7;

/// Message shown in place of the plot, if there is nothing to draw.
fn placeholder_text(has_entries: bool, has_parts: bool) -> Option<&'static str> {
    if !has_entries {
        Some("No entries recorded yet.")
    } else if !has_parts {
        Some("Select a metric to project.")
    } else {
        None
    }
}

/// Multi-series projection of the length measurements. Each line is stroked
/// with a per-entry gradient that whitens as the part nears its goal.
#[component]
pub fn TrendChart() -> Element {
    let store = crate::state::use_store();
    let snapshot = store.state().read().clone();
    let mut selected = use_signal(|| DEFAULT_SELECTED_PARTS.to_vec());
    let mut zoomed_out = use_signal(|| false);

    let frame = ChartFrame::MAIN;
    let parts: Vec<BodyPart> = MAIN_CHART_PARTS
        .iter()
        .copied()
        .filter(|part| selected.read().contains(part))
        .collect();
    let displayed = select_window(&snapshot.entries, zoomed_out());
    let bounds = compute_domain(displayed, &parts, |part| snapshot.goal_for(part))
        .resolve(std::iter::empty());

    let toggles = MAIN_CHART_PARTS.iter().map(|&part| {
        let active = parts.contains(&part);
        let class_name = if active {
            "chip chip--active"
        } else {
            "chip"
        };
        let color = part.baseline_color();
        rsx! {
            button {
                key: "{part.slug()}",
                r#type: "button",
                class: "{class_name}",
                style: "--chip-color: {color}",
                aria_pressed: "{active}",
                onclick: move |_| {
                    let mut chosen = selected.write();
                    if let Some(index) = chosen.iter().position(|p| *p == part) {
                        chosen.remove(index);
                    } else {
                        chosen.push(part);
                    }
                },
                "{part.label()}"
            }
        }
    });

    let placeholder = placeholder_text(!displayed.is_empty(), !parts.is_empty());

    let tick_x = frame.left() - 8.0;
    let date_y = frame.bottom() + 24.0;
    let gridlines = axis_ticks(bounds, Y_TICKS).into_iter().map(|tick| {
        let y = frame.y_at(tick, bounds);
        let label_y = y + 4.0;
        let label = format::format_number(tick, 1);
        rsx! {
            line {
                class: "chart__grid",
                x1: "{frame.left()}",
                x2: "{frame.right()}",
                y1: "{y}",
                y2: "{y}",
            }
            text {
                class: "chart__tick",
                x: "{tick_x}",
                y: "{label_y}",
                text_anchor: "end",
                "{label}"
            }
        }
    });

    let count = displayed.len();
    let label_step = count.div_ceil(MAX_DATE_LABELS).max(1);
    let date_labels = displayed
        .iter()
        .enumerate()
        .filter(|(idx, _)| idx % label_step == 0 || *idx + 1 == count)
        .map(|(idx, entry)| {
            let x = frame.x_at(idx, count);
            let label = format::date_tick(&entry.date);
            rsx! {
                text {
                    key: "{entry.id}",
                    class: "chart__tick",
                    x: "{x}",
                    y: "{date_y}",
                    text_anchor: "middle",
                    "{label}"
                }
            }
        });

    let gradients = parts.iter().map(|&part| {
        let stops = gradient_stops(displayed, part, snapshot.goal_for(part));
        let id = format!("trend-{}", part.slug());
        let x1 = frame.x_at(0, count);
        let x2 = frame.x_at(count.saturating_sub(1), count);
        rsx! {
            linearGradient {
                key: "{id}",
                id: "{id}",
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
    });

    let goal_lines = parts.iter().map(|&part| {
        let goal = snapshot.goal_for(part);
        let y = frame.y_at(goal, bounds);
        let color = part.baseline_color();
        rsx! {
            line {
                key: "goal-{part.slug()}",
                class: "chart__goal",
                x1: "{frame.left()}",
                x2: "{frame.right()}",
                y1: "{y}",
                y2: "{y}",
                stroke: "{color}",
                stroke_dasharray: "6 6",
            }
        }
    });

    let series = parts.iter().map(|&part| {
        let goal = snapshot.goal_for(part);
        let points = plot_points(displayed, part, &frame, bounds);
        let path = line_path(&points);
        let baseline = part.baseline_color();
        let dots: Vec<(f64, f64, String)> = points
            .iter()
            .map(|point| (point.x, point.y, color_for(baseline, point.value, goal).css()))
            .collect();
        rsx! {
            g { key: "series-{part.slug()}", class: "chart__series",
                path {
                    d: "{path}",
                    fill: "none",
                    stroke: "url(#trend-{part.slug()})",
                    stroke_width: "3",
                    stroke_linecap: "round",
                    stroke_linejoin: "round",
                }
                for (cx, cy, fill) in dots {
                    circle { cx: "{cx}", cy: "{cy}", r: "4", fill: "{fill}" }
                }
            }
        }
    });

    rsx! {
        section { class: "panel trend",
            SectionHeader {
                title: "Metric Projection",
                subtitle: "DYNAMIC COLOR SYNTHESIS // WHITE = TARGET ACQUIRED",
                ZoomButton {
                    zoomed_out: zoomed_out(),
                    on_toggle: move |_| zoomed_out.set(!zoomed_out()),
                }
            }
            div { class: "trend__toggles", {toggles} }
            if let Some(message) = placeholder {
                p { class: "panel__placeholder", "{message}" }
            } else {
                svg {
                    class: "chart chart--main",
                    view_box: "{frame.view_box()}",
                    defs { {gradients} }
                    {gridlines}
                    {goal_lines}
                    {series}
                    {date_labels}
                }
            }
        }
    }
}
