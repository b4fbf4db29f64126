//! Formatting helpers for presenting measurements.

use time::{macros::format_description, Date, OffsetDateTime};

use super::model::{BodyPart, Unit};

/// Distance to goal under which a card reads "MET".
const MET_TOLERANCE: f64 = 0.05;

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// `YYYY-MM-DD`, the storage form of an entry date.
pub fn iso_day(date: Date) -> String {
    date.format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Axis tick label: `2025-03-14` → `03/14`.
pub fn date_tick(iso: &str) -> String {
    iso.split('-').skip(1).collect::<Vec<_>>().join("/")
}

pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        "—".to_string()
    }
}

pub fn format_value(part: BodyPart, value: f64) -> String {
    format!("{}{}", format_number(value, 1), part.unit().suffix())
}

/// Remaining distance to the goal, or `MET` once within tolerance.
pub fn diff_label(part: BodyPart, value: f64, goal: f64) -> String {
    let diff = (goal - value).abs();
    if diff <= MET_TOLERANCE {
        "MET".to_string()
    } else {
        format!("{:.1}{}", diff, part.unit().suffix())
    }
}

/// Progress bar fill, capped at 100. A zero goal has no meaningful ratio.
pub fn progress_percent(value: f64, goal: f64) -> u32 {
    if goal == 0.0 || !value.is_finite() || !goal.is_finite() {
        return 0;
    }
    let pct = (value / goal * 100.0).round();
    pct.clamp(0.0, 100.0) as u32
}

/// Within half a unit of the goal.
pub fn is_closing(value: f64, goal: f64) -> bool {
    (value - goal).abs() < 0.5
}

pub fn goal_label(part: BodyPart, goal: f64) -> String {
    match part.unit() {
        Unit::Inches => format!("GOAL: {}\"", format_number(goal, 1)),
        unit => format!("TARGET: {} {}", format_number(goal, 1), unit.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn iso_day_is_zero_padded() {
        assert_eq!(iso_day(date!(2025 - 03 - 04)), "2025-03-04");
    }

    #[test]
    fn date_tick_drops_year() {
        assert_eq!(date_tick("2025-03-14"), "03/14");
        assert_eq!(date_tick("garbage"), "");
    }

    #[test]
    fn diff_label_reports_met_within_tolerance() {
        assert_eq!(diff_label(BodyPart::Waist, 32.04, 32.0), "MET");
        assert_eq!(diff_label(BodyPart::Waist, 34.0, 32.0), "2.0\"");
        assert_eq!(diff_label(BodyPart::Weight, 195.0, 180.0), "15.0LBS");
        assert_eq!(diff_label(BodyPart::BodyFat, 18.0, 12.0), "6.0%");
    }

    #[test]
    fn progress_caps_at_hundred() {
        assert_eq!(progress_percent(42.0, 44.0), 95);
        assert_eq!(progress_percent(195.0, 180.0), 100);
        assert_eq!(progress_percent(10.0, 0.0), 0);
    }

    #[test]
    fn values_carry_unit_suffix() {
        assert_eq!(format_value(BodyPart::Arms, 15.24), "15.2\"");
        assert_eq!(format_value(BodyPart::BodyFat, 18.0), "18.0%");
        assert_eq!(format_number(f64::NAN, 2), "—");
    }

    #[test]
    fn goal_labels_follow_unit() {
        assert_eq!(goal_label(BodyPart::Chest, 44.0), "GOAL: 44.0\"");
        assert_eq!(goal_label(BodyPart::Weight, 180.0), "TARGET: 180.0 LBS");
    }

    #[test]
    fn closing_threshold() {
        assert!(is_closing(31.6, 32.0));
        assert!(!is_closing(31.5, 32.0));
    }
}
