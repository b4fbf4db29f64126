//! Measurement data model: tracked parts, dated entries, goals and the
//! aggregate `AppState` that gets persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    Chest,
    Shoulders,
    Arms,
    Waist,
    Thighs,
    Calves,
    Weight,
    #[serde(rename = "Body Fat %")]
    BodyFat,
}

/// Parts plotted together on the main projection chart.
pub const MAIN_CHART_PARTS: [BodyPart; 6] = [
    BodyPart::Chest,
    BodyPart::Shoulders,
    BodyPart::Arms,
    BodyPart::Waist,
    BodyPart::Thighs,
    BodyPart::Calves,
];

/// Parts that get their own area chart.
pub const SECONDARY_CHART_PARTS: [BodyPart; 2] = [BodyPart::Weight, BodyPart::BodyFat];

/// Display order for snapshot cards, forms and goal editors.
pub const DEFAULT_PARTS: [BodyPart; 8] = [
    BodyPart::Chest,
    BodyPart::Shoulders,
    BodyPart::Arms,
    BodyPart::Weight,
    BodyPart::Thighs,
    BodyPart::Calves,
    BodyPart::Waist,
    BodyPart::BodyFat,
];

/// Main-chart parts selected on first render.
pub const DEFAULT_SELECTED_PARTS: [BodyPart; 3] =
    [BodyPart::Waist, BodyPart::Chest, BodyPart::Shoulders];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Inches,
    Pounds,
    Percent,
}

impl Unit {
    pub fn label(self) -> &'static str {
        match self {
            Unit::Inches => "IN",
            Unit::Pounds => "LBS",
            Unit::Percent => "%",
        }
    }

    /// Compact suffix used right after a number (`12.5"`, `180LBS`).
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Inches => "\"",
            Unit::Pounds => "LBS",
            Unit::Percent => "%",
        }
    }
}

impl BodyPart {
    pub fn label(self) -> &'static str {
        match self {
            BodyPart::Chest => "Chest",
            BodyPart::Shoulders => "Shoulders",
            BodyPart::Arms => "Arms",
            BodyPart::Waist => "Waist",
            BodyPart::Thighs => "Thighs",
            BodyPart::Calves => "Calves",
            BodyPart::Weight => "Weight",
            BodyPart::BodyFat => "Body Fat %",
        }
    }

    /// Identifier safe for DOM ids and CSS modifiers.
    pub fn slug(self) -> &'static str {
        match self {
            BodyPart::Chest => "chest",
            BodyPart::Shoulders => "shoulders",
            BodyPart::Arms => "arms",
            BodyPart::Waist => "waist",
            BodyPart::Thighs => "thighs",
            BodyPart::Calves => "calves",
            BodyPart::Weight => "weight",
            BodyPart::BodyFat => "body-fat",
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            BodyPart::Weight => Unit::Pounds,
            BodyPart::BodyFat => Unit::Percent,
            _ => Unit::Inches,
        }
    }

    pub fn baseline_color(self) -> Rgb {
        match self {
            BodyPart::Chest => Rgb::new(0xff, 0x00, 0x00),
            BodyPart::Shoulders => Rgb::new(0xff, 0xff, 0x00),
            BodyPart::Arms => Rgb::new(0xff, 0x7b, 0x00),
            BodyPart::Waist => Rgb::new(0x00, 0xff, 0x00),
            BodyPart::Thighs => Rgb::new(0x00, 0xa2, 0xff),
            BodyPart::Calves => Rgb::new(0xaf, 0x00, 0xff),
            BodyPart::Weight | BodyPart::BodyFat => Rgb::new(0xce, 0xd4, 0xda),
        }
    }
}

/// One dated snapshot of measured values. `date` is a `YYYY-MM-DD` string so
/// lexical order equals chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementEntry {
    pub id: String,
    pub date: String,
    pub values: BTreeMap<BodyPart, f64>,
}

impl MeasurementEntry {
    pub fn new(date: impl Into<String>, values: BTreeMap<BodyPart, f64>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date: date.into(),
            values,
        }
    }

    pub fn value(&self, part: BodyPart) -> Option<f64> {
        self.values.get(&part).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub part: BodyPart,
    pub target: f64,
}

/// The unit of persistence: the full entry history plus the goal table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub entries: Vec<MeasurementEntry>,
    pub goals: Vec<Goal>,
}

impl AppState {
    /// Target for `part`; the first matching goal wins and a missing goal reads as zero.
    pub fn goal_for(&self, part: BodyPart) -> f64 {
        self.goals
            .iter()
            .find(|goal| goal.part == part)
            .map(|goal| goal.target)
            .unwrap_or(0.0)
    }

    pub fn goal_map(&self) -> BTreeMap<BodyPart, f64> {
        DEFAULT_PARTS
            .iter()
            .map(|&part| (part, self.goal_for(part)))
            .collect()
    }

    pub fn latest(&self) -> Option<&MeasurementEntry> {
        self.entries.last()
    }

    pub fn latest_value(&self, part: BodyPart) -> Option<f64> {
        self.latest().and_then(|entry| entry.value(part))
    }

    /// Append a new entry dated `date`. Parts missing from `values` carry the
    /// latest recorded value forward, or zero when nothing was ever recorded.
    pub fn append_entry(
        &mut self,
        date: impl Into<String>,
        values: &BTreeMap<BodyPart, f64>,
    ) -> &MeasurementEntry {
        let filled: BTreeMap<BodyPart, f64> = DEFAULT_PARTS
            .iter()
            .map(|&part| {
                let value = values
                    .get(&part)
                    .copied()
                    .or_else(|| self.latest_value(part))
                    .unwrap_or(0.0);
                (part, value)
            })
            .collect();

        let entry = MeasurementEntry::new(date, filled);
        let id = entry.id.clone();
        self.entries.push(entry);
        self.sort_entries();

        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .unwrap_or(self.entries.len() - 1);
        &self.entries[index]
    }

    /// Replace the values of the most recent entry. Returns `false` when there
    /// is no entry to overwrite.
    pub fn overwrite_latest(&mut self, values: BTreeMap<BodyPart, f64>) -> bool {
        match self.entries.last_mut() {
            Some(latest) => {
                latest.values = values;
                true
            }
            None => false,
        }
    }

    /// Apply edited targets to the existing goals; goals without an edit keep
    /// their current target.
    pub fn overwrite_goals(&mut self, edits: &BTreeMap<BodyPart, f64>) {
        for goal in &mut self.goals {
            if let Some(&target) = edits.get(&goal.part) {
                goal.target = target;
            }
        }
    }

    /// Stable sort by date string, so same-day entries keep insertion order.
    pub fn sort_entries(&mut self) {
        self.entries.sort_by(|a, b| a.date.cmp(&b.date));
    }

    /// Collapse duplicate goals (first wins) and restore date ordering.
    /// Missing goals are left missing and read as zero through `goal_for`.
    pub fn normalized(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.goals.len());
        self.goals.retain(|goal| {
            if seen.contains(&goal.part) {
                false
            } else {
                seen.push(goal.part);
                true
            }
        });
        self.sort_entries();
        self
    }
}
