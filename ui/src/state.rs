//! Shared application state.
//!
//! The root component installs one [`Store`] (the persisted `AppState` plus a
//! transient notice line) and one [`Insights`] handle via context. Views
//! mutate the store only through its commit methods, each of which writes
//! the whole state back through `core::storage`.

use std::collections::BTreeMap;
use std::rc::Rc;

use dioxus::prelude::*;
use tracing::{info, warn};

use crate::core::format;
use crate::core::model::{AppState, BodyPart, DEFAULT_PARTS};
use crate::core::storage;
use crate::insight::{InsightConfig, InsightService};

/// Raw text typed into a per-part form field.
pub type Draft = BTreeMap<BodyPart, String>;

#[derive(Clone, Copy, PartialEq)]
pub struct Store {
    state: Signal<AppState>,
    notice: Signal<Option<String>>,
}

/// Load persisted state and share it with every descendant.
pub fn use_store_provider() -> Store {
    let state = use_signal(storage::load);
    let notice = use_signal(|| Option::<String>::None);
    use_context_provider(|| Store { state, notice })
}

pub fn use_store() -> Store {
    use_context::<Store>()
}

impl Store {
    pub fn state(&self) -> Signal<AppState> {
        self.state
    }

    pub fn notice(&self) -> Option<String> {
        self.notice.read().clone()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice.set(None);
    }

    /// Record a new entry dated today from the "Update Stream" form.
    pub fn append_entry(&mut self, draft: &Draft) {
        let today = format::iso_day(format::today_utc());
        self.state.with_mut(|state| append_from_draft(state, draft, &today));
        info!(date = %today, "appended entry");
        self.persist();
    }

    pub fn overwrite_latest(&mut self, draft: &Draft) {
        let replaced = self
            .state
            .with_mut(|state| apply_latest_edits(state, draft));
        if replaced {
            info!("overwrote latest entry");
            self.persist();
        }
    }

    pub fn overwrite_goals(&mut self, draft: &Draft) {
        self.state
            .with_mut(|state| state.overwrite_goals(&parse_edits(draft)));
        info!("updated goals");
        self.persist();
    }

    fn persist(&mut self) {
        match storage::save(&self.state.read()) {
            Ok(()) => self.notice.set(None),
            Err(err) => {
                warn!(error = %err, "failed to persist state");
                self.notice
                    .set(Some(format!("Changes kept for this session only: {err}")));
            }
        }
    }
}

/// The shared insight capability.
#[derive(Clone)]
pub struct Insights(pub Rc<dyn InsightService>);

pub fn use_insights_provider() -> Insights {
    use_context_provider(|| Insights(InsightConfig::from_env().into_service()))
}

pub fn use_insights() -> Insights {
    use_context::<Insights>()
}

/// Append a dated entry; blank or non-numeric fields are omitted so they
/// carry the latest value forward.
pub fn append_from_draft(state: &mut AppState, draft: &Draft, today: &str) {
    state.append_entry(today, &parse_draft(draft));
}

/// Strict parse: only finite numbers survive.
pub fn parse_draft(draft: &Draft) -> BTreeMap<BodyPart, f64> {
    draft
        .iter()
        .filter_map(|(&part, text)| {
            text.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(|value| (part, value))
        })
        .collect()
}

/// Lenient parse for edit buffers: anything unreadable becomes zero.
pub fn parse_edits(draft: &Draft) -> BTreeMap<BodyPart, f64> {
    draft
        .iter()
        .map(|(&part, text)| (part, parse_lenient(text)))
        .collect()
}

pub fn parse_lenient(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Text shown in an edit field for an existing value. Uses the shortest
/// representation that parses back to the same `f64`.
pub fn edit_text(value: f64) -> String {
    value.to_string()
}

/// Edit buffer pre-filled with the parts the latest entry recorded.
pub fn latest_draft(state: &AppState) -> Draft {
    let Some(latest) = state.latest() else {
        return Draft::new();
    };
    DEFAULT_PARTS
        .iter()
        .filter_map(|&part| latest.value(part).map(|value| (part, edit_text(value))))
        .collect()
}

/// Overwrite the latest entry from an edit buffer. Blank fields for parts the
/// entry never recorded stay unrecorded; every other field parses leniently.
pub fn apply_latest_edits(state: &mut AppState, draft: &Draft) -> bool {
    let Some(latest) = state.latest() else {
        return false;
    };
    let values = draft
        .iter()
        .filter(|(part, text)| latest.value(**part).is_some() || !text.trim().is_empty())
        .map(|(&part, text)| (part, parse_lenient(text)))
        .collect();
    state.overwrite_latest(values)
}

/// Edit buffer pre-filled with the current goals.
pub fn goals_draft(state: &AppState) -> Draft {
    state
        .goals
        .iter()
        .map(|goal| (goal.part, edit_text(goal.target)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::MeasurementEntry;
    use crate::core::seed::seed_state_for;
    use time::macros::date;

    fn draft(fields: &[(BodyPart, &str)]) -> Draft {
        fields
            .iter()
            .map(|&(part, text)| (part, text.to_string()))
            .collect()
    }

    #[test]
    fn strict_parse_drops_blank_and_garbage() {
        let parsed = parse_draft(&draft(&[
            (BodyPart::Chest, " 43.2 "),
            (BodyPart::Waist, ""),
            (BodyPart::Arms, "abc"),
            (BodyPart::Weight, "NaN"),
        ]));
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[&BodyPart::Chest], 43.2);
    }

    #[test]
    fn lenient_parse_maps_garbage_to_zero() {
        assert_eq!(parse_lenient("31.5"), 31.5);
        assert_eq!(parse_lenient(""), 0.0);
        assert_eq!(parse_lenient("thirty"), 0.0);
        assert_eq!(parse_lenient("inf"), 0.0);
    }

    #[test]
    fn append_from_draft_carries_forward_and_dates_today() {
        let mut state = seed_state_for(date!(2025 - 03 - 01));
        let before = state.latest().cloned().unwrap();

        append_from_draft(&mut state, &draft(&[(BodyPart::Waist, "33.1"), (BodyPart::Chest, "x")]), "2025-03-02");

        let added = state.latest().unwrap();
        assert_eq!(state.entries.len(), 14);
        assert_eq!(added.date, "2025-03-02");
        assert_eq!(added.value(BodyPart::Waist), Some(33.1));
        assert_eq!(added.value(BodyPart::Chest), before.value(BodyPart::Chest));
        assert_ne!(added.id, before.id);
    }

    #[test]
    fn goal_edits_apply_leniently() {
        let mut state = seed_state_for(date!(2025 - 03 - 01));
        state.overwrite_goals(&parse_edits(&draft(&[
            (BodyPart::Waist, "30"),
            (BodyPart::Arms, "oops"),
        ])));
        assert_eq!(state.goal_for(BodyPart::Waist), 30.0);
        assert_eq!(state.goal_for(BodyPart::Arms), 0.0);
        assert_eq!(state.goal_for(BodyPart::Chest), 44.0);
    }

    #[test]
    fn drafts_prefill_from_state() {
        let state = seed_state_for(date!(2025 - 03 - 01));
        let latest = latest_draft(&state);
        assert_eq!(latest[&BodyPart::Weight], "195");
        assert_eq!(latest[&BodyPart::Arms], "15");
        assert_eq!(latest.len(), DEFAULT_PARTS.len());
        assert_eq!(parse_edits(&latest), state.latest().unwrap().values);

        let goals = goals_draft(&state);
        assert_eq!(goals[&BodyPart::Arms], "16.5");
        assert!(latest_draft(&AppState::default()).is_empty());
    }

    #[test]
    fn edit_text_keeps_full_precision() {
        assert_eq!(edit_text(180.0), "180");
        assert_eq!(edit_text(0.05), "0.05");
        assert_eq!(edit_text(15.127), "15.127");
        assert_eq!(parse_lenient(&edit_text(41.400000000000006)), 41.400000000000006);
    }

    fn sparse_state() -> AppState {
        let mut state = AppState::default();
        state.entries.push(MeasurementEntry::new(
            "2025-03-01",
            BTreeMap::from([(BodyPart::Chest, 42.0), (BodyPart::Arms, 15.127)]),
        ));
        state
    }

    #[test]
    fn untouched_latest_edit_leaves_entry_unchanged() {
        let mut state = sparse_state();
        let before = state.latest().cloned().unwrap();

        let draft = latest_draft(&state);
        assert_eq!(draft.len(), 2);
        assert!(apply_latest_edits(&mut state, &draft));

        assert_eq!(state.latest().unwrap(), &before);
    }

    #[test]
    fn latest_edit_ignores_blank_unrecorded_parts() {
        let mut state = sparse_state();
        let mut draft = latest_draft(&state);
        draft.insert(BodyPart::Waist, "  ".to_string());
        draft.insert(BodyPart::Weight, "190.5".to_string());
        draft.insert(BodyPart::Chest, "".to_string());

        assert!(apply_latest_edits(&mut state, &draft));

        let latest = state.latest().unwrap();
        assert_eq!(latest.value(BodyPart::Waist), None);
        assert_eq!(latest.value(BodyPart::Weight), Some(190.5));
        assert_eq!(latest.value(BodyPart::Chest), Some(0.0));
        assert_eq!(latest.value(BodyPart::Arms), Some(15.127));
        assert!(!apply_latest_edits(&mut AppState::default(), &draft));
    }

    #[test]
    fn untouched_goal_edit_keeps_precision() {
        let mut state = seed_state_for(date!(2025 - 03 - 01));
        state.overwrite_goals(&BTreeMap::from([(BodyPart::Arms, 16.125)]));
        let before = state.goals.clone();

        let mut draft = goals_draft(&state);
        draft.insert(BodyPart::Waist, "31".to_string());
        state.overwrite_goals(&parse_edits(&draft));

        assert_eq!(state.goal_for(BodyPart::Arms), 16.125);
        assert_eq!(state.goals.len(), before.len());
        assert_eq!(state.goal_for(BodyPart::Waist), 31.0);
    }
}
