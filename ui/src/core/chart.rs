//! Chart data selection: display windows, y-axis domains, gradient stops and
//! the SVG geometry the dashboard charts are drawn with.
//!
//! Everything here is a pure projection over a snapshot of `AppState`; the
//! components recompute on every committed change.

use super::color::{color_for, Rgb};
use super::model::{BodyPart, MeasurementEntry};

/// Number of most recent entries shown while a chart is focused.
pub const FOCUS_WINDOW: usize = 13;
/// Share of the value span added above and below the data.
pub const DOMAIN_PADDING_RATIO: f64 = 0.15;
/// Padding used when the span is zero (flat series).
pub const FLAT_SERIES_PADDING: f64 = 2.0;

/// The entries a chart should plot: the full history when zoomed out,
/// otherwise the last [`FOCUS_WINDOW`] entries.
pub fn select_window(entries: &[MeasurementEntry], zoomed_out: bool) -> &[MeasurementEntry] {
    if zoomed_out {
        entries
    } else {
        let start = entries.len().saturating_sub(FOCUS_WINDOW);
        &entries[start..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisDomain {
    /// Nothing meaningful to bound; defer to [`AxisDomain::resolve`].
    Auto,
    Bounds { min: f64, max: f64 },
}

impl AxisDomain {
    /// Concrete bounds for drawing. Auto domains fit the supplied values with
    /// a small margin; with no values at all the range is `[0, 1]`.
    pub fn resolve(self, values: impl IntoIterator<Item = f64>) -> (f64, f64) {
        match self {
            AxisDomain::Bounds { min, max } => (min, max),
            AxisDomain::Auto => {
                let (min, max) = match min_max(values) {
                    Some(bounds) => bounds,
                    None => return (0.0, 1.0),
                };
                let span = max - min;
                if span == 0.0 {
                    (min - 1.0, max + 1.0)
                } else {
                    (min - span * 0.05, max + span * 0.05)
                }
            }
        }
    }
}

/// Y-axis domain for the selected parts over the displayed entries. Goals are
/// always part of the range so their reference lines stay on screen.
pub fn compute_domain<F>(
    displayed: &[MeasurementEntry],
    selected: &[BodyPart],
    goal_for: F,
) -> AxisDomain
where
    F: Fn(BodyPart) -> f64,
{
    if selected.is_empty() || displayed.is_empty() {
        return AxisDomain::Auto;
    }

    let mut values = Vec::with_capacity(selected.len() * (displayed.len() + 1));
    for &part in selected {
        values.extend(displayed.iter().filter_map(|entry| entry.value(part)));
        values.push(goal_for(part));
    }

    let Some((min, max)) = min_max(values) else {
        return AxisDomain::Auto;
    };

    let mut padding = (max - min) * DOMAIN_PADDING_RATIO;
    if padding == 0.0 {
        padding = FLAT_SERIES_PADDING;
    }

    AxisDomain::Bounds {
        min: min - padding,
        max: max + padding,
    }
}

fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the series, 0–100.
    pub offset_pct: f64,
    pub color: Rgb,
}

/// One horizontal gradient stop per entry, colored by goal proximity. A
/// missing value is drawn as zero.
pub fn gradient_stops(entries: &[MeasurementEntry], part: BodyPart, goal: f64) -> Vec<GradientStop> {
    let last_index = entries.len().saturating_sub(1).max(1) as f64;
    let baseline = part.baseline_color();

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| GradientStop {
            offset_pct: idx as f64 / last_index * 100.0,
            color: color_for(baseline, entry.value(part).unwrap_or(0.0), goal),
        })
        .collect()
}

/// Drawing area of an SVG chart, in viewBox units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub pad_left: f64,
    pub pad_right: f64,
    pub pad_top: f64,
    pub pad_bottom: f64,
}

impl ChartFrame {
    pub const MAIN: ChartFrame = ChartFrame {
        width: 960.0,
        height: 420.0,
        pad_left: 56.0,
        pad_right: 24.0,
        pad_top: 16.0,
        pad_bottom: 40.0,
    };

    pub const COMPACT: ChartFrame = ChartFrame {
        width: 480.0,
        height: 240.0,
        pad_left: 48.0,
        pad_right: 24.0,
        pad_top: 12.0,
        pad_bottom: 32.0,
    };

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    pub fn left(&self) -> f64 {
        self.pad_left
    }

    pub fn right(&self) -> f64 {
        self.width - self.pad_right
    }

    pub fn top(&self) -> f64 {
        self.pad_top
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.pad_bottom
    }

    /// Horizontal position of the `index`-th of `count` evenly spaced points.
    pub fn x_at(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return (self.left() + self.right()) / 2.0;
        }
        let step = (self.right() - self.left()) / (count - 1) as f64;
        self.left() + step * index as f64
    }

    /// Vertical position of `value` inside `[min, max]`, clamped to the frame.
    pub fn y_at(&self, value: f64, (min, max): (f64, f64)) -> f64 {
        let span = max - min;
        if span <= 0.0 || !value.is_finite() {
            return (self.top() + self.bottom()) / 2.0;
        }
        let ratio = ((value - min) / span).clamp(0.0, 1.0);
        self.bottom() - ratio * (self.bottom() - self.top())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Screen points for `part` across `entries`. Entries without a value for
/// the part are skipped; x positions still follow the entry index so series
/// line up with the shared date axis.
pub fn plot_points(
    entries: &[MeasurementEntry],
    part: BodyPart,
    frame: &ChartFrame,
    bounds: (f64, f64),
) -> Vec<PlotPoint> {
    let count = entries.len();
    entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            entry.value(part).map(|value| PlotPoint {
                x: frame.x_at(idx, count),
                y: frame.y_at(value, bounds),
                value,
            })
        })
        .collect()
}

/// SVG path data through `points` with straight segments.
pub fn line_path(points: &[PlotPoint]) -> String {
    let mut path = String::new();
    for (idx, point) in points.iter().enumerate() {
        let command = if idx == 0 { 'M' } else { 'L' };
        if idx > 0 {
            path.push(' ');
        }
        path.push_str(&format!("{command}{:.2},{:.2}", point.x, point.y));
    }
    path
}

/// Closed SVG path for the area between the line and the frame bottom.
pub fn area_path(points: &[PlotPoint], frame: &ChartFrame) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return String::new();
    };
    format!(
        "{} L{:.2},{:.2} L{:.2},{:.2} Z",
        line_path(points),
        last.x,
        frame.bottom(),
        first.x,
        frame.bottom()
    )
}

/// `count` evenly spaced tick values from `min` to `max` inclusive.
pub fn axis_ticks((min, max): (f64, f64), count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![(min + max) / 2.0],
        _ => {
            let step = (max - min) / (count - 1) as f64;
            (0..count).map(|idx| min + step * idx as f64).collect()
        }
    }
}
