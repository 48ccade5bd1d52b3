//! Contribution cycles

use crate::{CycleId, Frequency, MemberId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display format of a cycle start date, e.g. "Oct 17, 2026"
pub const START_DATE_FORMAT: &str = "%b %-d, %Y";

/// One collection period
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub id: CycleId,
    /// Display label such as "Month 3"
    pub label: String,
    /// Creation date, formatted for display
    pub start_date: String,
    #[serde(default)]
    pub is_completed: bool,
    /// Present iff `is_completed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<MemberId>,
}

impl Cycle {
    /// Create the `number`-th cycle of a committee, started at `now`.
    pub fn new(number: usize, frequency: Frequency, now: DateTime<Utc>) -> Self {
        Self {
            id: CycleId::generate(),
            label: Self::label_for(number, frequency),
            start_date: now.format(START_DATE_FORMAT).to_string(),
            is_completed: false,
            winner_id: None,
        }
    }

    pub fn with_id(mut self, id: CycleId) -> Self {
        self.id = id;
        self
    }

    /// `Month N` for monthly committees, `Day N` otherwise.
    pub fn label_for(number: usize, frequency: Frequency) -> String {
        let unit = match frequency {
            Frequency::Monthly => "Month",
            Frequency::Daily | Frequency::Weekly => "Day",
        };
        format!("{} {}", unit, number)
    }

    pub fn has_winner(&self) -> bool {
        self.winner_id.is_some()
    }
}
