//! Cycle Ledger: contribution periods and their winners

use chrono::{DateTime, Utc};
use qisst_types::{CommitteeError, CommitteeResult, Cycle, CycleId, Frequency, MemberId};
use std::sync::Arc;
use tracing::{info, warn};

/// Ordered collection of cycles, newest first
#[derive(Clone, Debug, Default)]
pub struct CycleLedger {
    cycles: Arc<Vec<Cycle>>,
    /// Cycle selected for display; not persisted
    active: Option<CycleId>,
}

impl CycleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from a loaded collection (already newest first)
    pub fn from_cycles(cycles: Vec<Cycle>) -> Self {
        Self {
            cycles: Arc::new(cycles),
            active: None,
        }
    }

    /// Open a new cycle at the front of the ledger and make it active.
    pub fn create(&mut self, frequency: Frequency, now: DateTime<Utc>) -> CycleId {
        let mut cycle = Cycle::new(self.cycles.len() + 1, frequency, now);
        while self.get(&cycle.id).is_some() {
            cycle.id = CycleId::generate();
        }
        let id = cycle.id.clone();

        info!(cycle = %id, label = %cycle.label, "Cycle created");
        Arc::make_mut(&mut self.cycles).insert(0, cycle);
        self.active = Some(id.clone());

        id
    }

    /// Fail unless the cycle exists and has no winner yet.
    pub fn ensure_open(&self, cycle_id: &CycleId) -> CommitteeResult<&Cycle> {
        let cycle = self
            .get(cycle_id)
            .ok_or_else(|| CommitteeError::CycleNotFound(cycle_id.clone()))?;
        if let Some(winner) = &cycle.winner_id {
            warn!(cycle = %cycle_id, winner = %winner, "Cycle already has a winner");
            return Err(CommitteeError::CycleAlreadyDrawn {
                cycle: cycle_id.clone(),
                winner: winner.clone(),
            });
        }
        Ok(cycle)
    }

    /// Record the winner of a cycle and complete it. An existing winner is
    /// never overwritten.
    pub fn set_winner(&mut self, cycle_id: &CycleId, winner_id: &MemberId) -> CommitteeResult<()> {
        self.ensure_open(cycle_id)?;

        let cycles = Arc::make_mut(&mut self.cycles);
        if let Some(cycle) = cycles.iter_mut().find(|c| c.id == *cycle_id) {
            cycle.winner_id = Some(winner_id.clone());
            cycle.is_completed = true;
        }
        Ok(())
    }

    /// Change the active cycle
    pub fn select(&mut self, cycle_id: &CycleId) -> CommitteeResult<()> {
        if self.get(cycle_id).is_none() {
            return Err(CommitteeError::CycleNotFound(cycle_id.clone()));
        }
        self.active = Some(cycle_id.clone());
        Ok(())
    }

    /// The selected cycle, falling back to the newest one
    pub fn active(&self) -> Option<&Cycle> {
        self.active
            .as_ref()
            .and_then(|id| self.get(id))
            .or_else(|| self.current())
    }

    /// The most recently created cycle
    pub fn current(&self) -> Option<&Cycle> {
        self.cycles.first()
    }

    pub fn get(&self, cycle_id: &CycleId) -> Option<&Cycle> {
        self.cycles.iter().find(|c| c.id == *cycle_id)
    }

    /// Whether any cycle names `member_id` as its winner
    pub fn has_winner(&self, member_id: &MemberId) -> bool {
        self.cycles
            .iter()
            .any(|c| c.winner_id.as_ref() == Some(member_id))
    }

    /// The cycle won by a member, if any
    pub fn won_by(&self, member_id: &MemberId) -> Option<&Cycle> {
        self.cycles
            .iter()
            .find(|c| c.winner_id.as_ref() == Some(member_id))
    }

    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn snapshot(&self) -> Arc<Vec<Cycle>> {
        Arc::clone(&self.cycles)
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_are_numbered_and_newest_first() {
        let mut ledger = CycleLedger::new();
        let first = ledger.create(Frequency::Monthly, Utc::now());
        let second = ledger.create(Frequency::Monthly, Utc::now());

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.cycles()[0].id, second);
        assert_eq!(ledger.cycles()[0].label, "Month 2");
        assert_eq!(ledger.cycles()[1].id, first);
        assert_eq!(ledger.current().unwrap().id, second);
        assert_eq!(ledger.active().unwrap().id, second);
    }

    #[test]
    fn test_non_monthly_cycles_use_day_label() {
        let mut ledger = CycleLedger::new();
        ledger.create(Frequency::Weekly, Utc::now());
        assert_eq!(ledger.current().unwrap().label, "Day 1");
    }

    #[test]
    fn test_winner_is_set_once() {
        let mut ledger = CycleLedger::new();
        let cycle = ledger.create(Frequency::Daily, Utc::now());
        let first = MemberId::new("m-1");
        let second = MemberId::new("m-2");

        ledger.set_winner(&cycle, &first).unwrap();
        let again = ledger.set_winner(&cycle, &second);
        assert!(matches!(
            again,
            Err(CommitteeError::CycleAlreadyDrawn { ref winner, .. }) if *winner == first
        ));

        let stored = ledger.get(&cycle).unwrap();
        assert!(stored.is_completed);
        assert_eq!(stored.winner_id, Some(first.clone()));
        assert!(ledger.has_winner(&first));
        assert!(!ledger.has_winner(&second));
    }

    #[test]
    fn test_select_cycle() {
        let mut ledger = CycleLedger::new();
        let older = ledger.create(Frequency::Monthly, Utc::now());
        ledger.create(Frequency::Monthly, Utc::now());

        ledger.select(&older).unwrap();
        assert_eq!(ledger.active().unwrap().id, older);

        let missing = CycleId::new("cycle-missing");
        assert_eq!(
            ledger.select(&missing),
            Err(CommitteeError::CycleNotFound(missing))
        );
        assert_eq!(ledger.active().unwrap().id, older);
    }

    #[test]
    fn test_winner_on_unknown_cycle() {
        let mut ledger = CycleLedger::new();
        let result = ledger.set_winner(&CycleId::new("nope"), &MemberId::new("m"));
        assert!(matches!(result, Err(CommitteeError::CycleNotFound(_))));
    }
}
