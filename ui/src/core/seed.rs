//! Seed state shown on first launch (or after the persisted payload turns out
//! to be unreadable): thirteen synthetic entries two days apart, ending
//! today, plus one goal per tracked part.

use std::collections::BTreeMap;

use time::{Date, Duration};

use super::format;
use super::model::{AppState, BodyPart, Goal, MeasurementEntry, DEFAULT_PARTS};

const SEED_POINTS: i64 = 13;
const SEED_SPACING_DAYS: i64 = 2;

pub fn seed_state() -> AppState {
    seed_state_for(format::today_utc())
}

pub fn seed_state_for(today: Date) -> AppState {
    let entries = (0..SEED_POINTS)
        .rev()
        .map(|i| {
            let date = today
                .checked_sub(Duration::days(i * SEED_SPACING_DAYS))
                .unwrap_or(today);
            MeasurementEntry::new(format::iso_day(date), seed_values(i as f64))
        })
        .collect();

    let goals = DEFAULT_PARTS
        .iter()
        .map(|&part| Goal {
            part,
            target: seed_goal(part),
        })
        .collect();

    AppState { entries, goals }
}

fn seed_values(i: f64) -> BTreeMap<BodyPart, f64> {
    [
        (BodyPart::Chest, 42.0 - i * 0.05),
        (BodyPart::Shoulders, 48.0 - i * 0.08),
        (BodyPart::Arms, 15.0 + i * 0.02),
        (BodyPart::Waist, 34.0 + i * 0.05),
        (BodyPart::Thighs, 24.0 - i * 0.03),
        (BodyPart::Calves, 15.5 - i * 0.01),
        (BodyPart::Weight, 195.0 - i * 0.2),
        (BodyPart::BodyFat, 18.0 + i * 0.1),
    ]
    .into_iter()
    .collect()
}

fn seed_goal(part: BodyPart) -> f64 {
    match part {
        BodyPart::Waist => 32.0,
        BodyPart::Weight => 180.0,
        BodyPart::BodyFat => 12.0,
        BodyPart::Arms => 16.5,
        BodyPart::Calves => 16.0,
        BodyPart::Shoulders => 50.0,
        BodyPart::Thighs => 25.0,
        BodyPart::Chest => 44.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn seed_spans_thirteen_entries_ending_today() {
        let state = seed_state_for(date!(2025 - 03 - 01));
        assert_eq!(state.entries.len(), 13);
        assert_eq!(state.entries.last().unwrap().date, "2025-03-01");
        assert_eq!(state.entries.first().unwrap().date, "2025-02-05");

        let mut dates: Vec<_> = state.entries.iter().map(|e| e.date.clone()).collect();
        let sorted = {
            let mut copy = dates.clone();
            copy.sort();
            copy
        };
        assert_eq!(dates, sorted);
        dates.dedup();
        assert_eq!(dates.len(), 13);
    }

    #[test]
    fn every_part_has_exactly_one_goal() {
        let state = seed_state_for(date!(2025 - 03 - 01));
        assert_eq!(state.goals.len(), DEFAULT_PARTS.len());
        for part in DEFAULT_PARTS {
            assert_eq!(state.goals.iter().filter(|g| g.part == part).count(), 1);
        }
        assert_eq!(state.goal_for(BodyPart::Weight), 180.0);
        assert_eq!(state.goal_for(BodyPart::Chest), 44.0);
    }

    #[test]
    fn latest_seed_entry_uses_base_values() {
        let state = seed_state_for(date!(2025 - 03 - 01));
        let latest = state.latest().unwrap();
        assert_eq!(latest.value(BodyPart::Weight), Some(195.0));
        assert_eq!(latest.value(BodyPart::BodyFat), Some(18.0));
        assert_eq!(latest.values.len(), DEFAULT_PARTS.len());

        let oldest = state.entries.first().unwrap();
        assert!((oldest.value(BodyPart::Weight).unwrap() - 192.6).abs() < 1e-9);
    }
}
