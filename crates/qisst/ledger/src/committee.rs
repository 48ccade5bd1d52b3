//! Committee: the application state and its command surface
//!
//! [`Committee`] owns the settings and the three ledgers. Every command goes
//! through it, and every command records which collections it replaced in a
//! [`ChangeSet`] so a persistence layer can re-save exactly those blobs.

use chrono::Utc;
use qisst_types::{
    CommitteeError, CommitteeResult, Cycle, CycleId, Member, MemberId, NewMember,
    PaymentRecord, Settings,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{LedgerConfig, RemovalPolicy};
use crate::confirm::{Confirm, ConfirmRequest};
use crate::cycle_ledger::CycleLedger;
use crate::member_registry::MemberRegistry;
use crate::payment_ledger::PaymentLedger;
use crate::projector::FinancialProjector;
use crate::rotation_engine::{DrawOutcome, DrawSource, RotationEngine};

/// Collections replaced since the last drain
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub settings: bool,
    pub members: bool,
    pub cycles: bool,
    pub payments: bool,
}

impl ChangeSet {
    pub fn all() -> Self {
        Self {
            settings: true,
            members: true,
            cycles: true,
            payments: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.settings || self.members || self.cycles || self.payments)
    }

    pub fn merge(&mut self, other: ChangeSet) {
        self.settings |= other.settings;
        self.members |= other.members;
        self.cycles |= other.cycles;
        self.payments |= other.payments;
    }
}

/// Result of a member removal request
#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    Removed {
        member: Member,
        /// Payment records deleted alongside the member
        payments_removed: usize,
    },
    Declined,
}

/// The committee's complete state
#[derive(Clone, Debug, Default)]
pub struct Committee {
    settings: Settings,
    members: MemberRegistry,
    cycles: CycleLedger,
    payments: PaymentLedger,
    config: LedgerConfig,
    changes: ChangeSet,
}

impl Committee {
    /// An empty committee with the given settings
    pub fn new(settings: Settings, config: LedgerConfig) -> Self {
        Self {
            settings,
            config,
            ..Self::default()
        }
    }

    /// Rebuild a committee from loaded collections
    pub fn from_parts(
        settings: Settings,
        members: Vec<Member>,
        cycles: Vec<Cycle>,
        payments: Vec<PaymentRecord>,
        config: LedgerConfig,
    ) -> Self {
        Self {
            settings,
            members: MemberRegistry::from_members(members),
            cycles: CycleLedger::from_cycles(cycles),
            payments: PaymentLedger::from_records(payments),
            config,
            changes: ChangeSet::default(),
        }
    }

    // --- Commands ---

    pub fn add_member(&mut self, new_member: NewMember) -> CommitteeResult<MemberId> {
        let id = self.members.add(new_member, Utc::now())?;
        self.changes.members = true;
        Ok(id)
    }

    /// Remove a member after explicit confirmation.
    ///
    /// References held by payments and cycle winners are handled according to
    /// the configured [`RemovalPolicy`].
    pub fn remove_member(
        &mut self,
        member_id: &MemberId,
        confirm: &mut impl Confirm,
    ) -> CommitteeResult<Removal> {
        let member = self
            .members
            .get(member_id)
            .ok_or_else(|| CommitteeError::MemberNotFound(member_id.clone()))?;

        if self.config.removal_policy == RemovalPolicy::Block
            && (self.payments.references_member(member_id) || self.cycles.has_winner(member_id))
        {
            warn!(member = %member_id, "Removal blocked by existing references");
            return Err(CommitteeError::MemberReferenced(member_id.clone()));
        }

        if !confirm.confirm(&ConfirmRequest::RemoveMember { member }) {
            return Ok(Removal::Declined);
        }

        let member = self.members.remove(member_id)?;
        self.changes.members = true;

        let payments_removed = match self.config.removal_policy {
            RemovalPolicy::Cascade => self.payments.remove_member_records(member_id),
            RemovalPolicy::Tolerate | RemovalPolicy::Block => 0,
        };
        if payments_removed > 0 {
            info!(member = %member_id, count = payments_removed, "Cascaded payment removal");
            self.changes.payments = true;
        }

        Ok(Removal::Removed {
            member,
            payments_removed,
        })
    }

    /// Open the next cycle; it becomes the active cycle.
    pub fn create_cycle(&mut self) -> CycleId {
        let id = self.cycles.create(self.settings.frequency, Utc::now());
        self.changes.cycles = true;
        id
    }

    pub fn select_cycle(&mut self, cycle_id: &CycleId) -> CommitteeResult<()> {
        self.cycles.select(cycle_id)
    }

    /// Flip the paid state of a (member, cycle) pair and return the new state
    pub fn toggle_payment(&mut self, member_id: &MemberId, cycle_id: &CycleId) -> bool {
        let paid = self.payments.toggle(member_id, cycle_id, Utc::now());
        self.changes.payments = true;
        paid
    }

    /// Draw, confirm, and record the pot winner of a cycle.
    pub fn draw_winner(
        &mut self,
        cycle_id: &CycleId,
        source: &mut impl DrawSource,
        confirm: &mut impl Confirm,
    ) -> CommitteeResult<DrawOutcome> {
        let outcome = RotationEngine::draw(
            &mut self.members,
            &mut self.cycles,
            cycle_id,
            source,
            confirm,
            Utc::now(),
        )?;

        if outcome.is_winner() {
            self.changes.members = true;
            self.changes.cycles = true;
        }
        Ok(outcome)
    }

    pub fn update_settings(&mut self, settings: Settings) -> CommitteeResult<()> {
        settings.validate()?;
        info!(
            committee = %settings.committee_name,
            installment = settings.installment_amount,
            frequency = %settings.frequency,
            "Settings updated"
        );
        self.settings = settings;
        self.changes.settings = true;
        Ok(())
    }

    /// Drain the record of replaced collections
    pub fn take_changes(&mut self) -> ChangeSet {
        std::mem::take(&mut self.changes)
    }

    // --- Queries ---

    pub fn is_paid(&self, member_id: &MemberId, cycle_id: &CycleId) -> bool {
        self.payments.is_paid(member_id, cycle_id)
    }

    pub fn collected_count(&self, cycle_id: &CycleId) -> usize {
        self.payments.collected_count(cycle_id)
    }

    pub fn projector(&self) -> FinancialProjector<'_> {
        FinancialProjector::new(&self.settings, &self.members, &self.cycles, &self.payments)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn members(&self) -> &MemberRegistry {
        &self.members
    }

    pub fn cycles(&self) -> &CycleLedger {
        &self.cycles
    }

    pub fn payments(&self) -> &PaymentLedger {
        &self.payments
    }

    pub fn member(&self, member_id: &MemberId) -> Option<&Member> {
        self.members.get(member_id)
    }

    pub fn cycle(&self, cycle_id: &CycleId) -> Option<&Cycle> {
        self.cycles.get(cycle_id)
    }

    pub fn active_cycle(&self) -> Option<&Cycle> {
        self.cycles.active()
    }
}
