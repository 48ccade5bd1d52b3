//! Payment records

use crate::{CycleId, MemberId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored payment status. Unpaid is represented by the absence of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Paid,
}

/// Proof that a member paid a cycle, keyed by (`member_id`, `cycle_id`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub member_id: MemberId,
    pub cycle_id: CycleId,
    pub status: PaymentStatus,
    pub date_paid: DateTime<Utc>,
}

impl PaymentRecord {
    pub fn paid(member_id: MemberId, cycle_id: CycleId, date_paid: DateTime<Utc>) -> Self {
        Self {
            member_id,
            cycle_id,
            status: PaymentStatus::Paid,
            date_paid,
        }
    }

    pub fn matches(&self, member_id: &MemberId, cycle_id: &CycleId) -> bool {
        self.member_id == *member_id && self.cycle_id == *cycle_id
    }

    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Paid).unwrap(),
            "\"PAID\""
        );
    }

    #[test]
    fn test_record_parses_persisted_shape() {
        let json = r#"{"memberId":"m1","cycleId":"cycle-1","status":"PAID","datePaid":"2024-06-10T08:00:00.000Z"}"#;
        let record: PaymentRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_paid());
        assert!(record.matches(&MemberId::new("m1"), &CycleId::new("cycle-1")));
        assert!(!record.matches(&MemberId::new("m2"), &CycleId::new("cycle-1")));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{"memberId":"m1","cycleId":"c1","status":"PENDING","datePaid":"2024-06-10T08:00:00Z"}"#;
        assert!(serde_json::from_str::<PaymentRecord>(json).is_err());
    }
}
