//! Payment Ledger: who paid which cycle
//!
//! A record's existence is the only source of truth for "paid". Toggling
//! deletes or inserts a record; no history of earlier toggles is kept.

use chrono::{DateTime, Utc};
use qisst_types::{CycleId, MemberId, PaymentRecord};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Collection of payment records keyed by (member, cycle)
#[derive(Clone, Debug, Default)]
pub struct PaymentLedger {
    records: Arc<Vec<PaymentRecord>>,
}

impl PaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from a loaded collection. Only the first record of
    /// each (member, cycle) pair is kept.
    pub fn from_records(records: Vec<PaymentRecord>) -> Self {
        let loaded = records.len();
        let mut seen = HashSet::new();
        let records: Vec<PaymentRecord> = records
            .into_iter()
            .filter(|r| seen.insert((r.member_id.clone(), r.cycle_id.clone())))
            .collect();

        if records.len() < loaded {
            warn!(
                dropped = loaded - records.len(),
                "Duplicate payment records dropped on load"
            );
        }
        Self {
            records: Arc::new(records),
        }
    }

    pub fn is_paid(&self, member_id: &MemberId, cycle_id: &CycleId) -> bool {
        self.records
            .iter()
            .any(|r| r.matches(member_id, cycle_id) && r.is_paid())
    }

    /// Flip the paid state of a (member, cycle) pair and return the new state.
    ///
    /// No cross-entity validation happens here: either id may be dangling.
    pub fn toggle(&mut self, member_id: &MemberId, cycle_id: &CycleId, now: DateTime<Utc>) -> bool {
        let records = Arc::make_mut(&mut self.records);

        let before = records.len();
        records.retain(|r| !r.matches(member_id, cycle_id));
        let paid = records.len() == before;
        if paid {
            records.push(PaymentRecord::paid(
                member_id.clone(),
                cycle_id.clone(),
                now,
            ));
        }

        debug!(member = %member_id, cycle = %cycle_id, paid, "Payment toggled");
        paid
    }

    /// Number of paid records for a cycle
    pub fn collected_count(&self, cycle_id: &CycleId) -> usize {
        self.records
            .iter()
            .filter(|r| r.cycle_id == *cycle_id && r.is_paid())
            .count()
    }

    /// Cycles a member has paid, in record order
    pub fn paid_cycles_for(&self, member_id: &MemberId) -> Vec<&CycleId> {
        self.records
            .iter()
            .filter(|r| r.member_id == *member_id && r.is_paid())
            .map(|r| &r.cycle_id)
            .collect()
    }

    pub fn references_member(&self, member_id: &MemberId) -> bool {
        self.records.iter().any(|r| r.member_id == *member_id)
    }

    /// Delete every record of a member and return how many were removed
    pub fn remove_member_records(&mut self, member_id: &MemberId) -> usize {
        if !self.references_member(member_id) {
            return 0;
        }
        let records = Arc::make_mut(&mut self.records);
        let before = records.len();
        records.retain(|r| r.member_id != *member_id);
        before - records.len()
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn snapshot(&self) -> Arc<Vec<PaymentRecord>> {
        Arc::clone(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
