//! Financial Projector: pot value, contributions, and collection progress
//!
//! Every figure is derived on demand from the current settings, members,
//! cycles, and payments. Nothing here is stored, and nothing here mutates.
//!
//! The period multiplier is a fixed approximation (30 days or 4 weeks per
//! month), not calendar-accurate.

use chrono::{DateTime, Utc};
use qisst_types::{Cycle, CycleId, Frequency, MemberId, Settings};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::cycle_ledger::CycleLedger;
use crate::member_registry::MemberRegistry;
use crate::payment_ledger::PaymentLedger;

/// Installment periods per month for a contribution frequency
pub fn period_multiplier(frequency: Frequency) -> u32 {
    match frequency {
        Frequency::Daily => 30,
        Frequency::Weekly => 4,
        Frequency::Monthly => 1,
    }
}

/// Collection state of one cycle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CycleStatus {
    pub cycle_id: CycleId,
    pub label: String,
    pub start_date: String,
    pub is_completed: bool,
    pub winner_id: Option<MemberId>,
    /// Winner's current name; `None` when there is no winner or the winner
    /// was removed
    pub winner_name: Option<String>,
    pub collected_count: usize,
    pub collected_amount: f64,
    /// Fraction of members who paid, in `0.0..=1.0` for consistent data
    pub progress: f64,
}

/// Committee overview
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub committee_name: String,
    pub currency: String,
    pub frequency: Frequency,
    pub installment_amount: f64,
    pub multiplier: u32,
    pub member_count: usize,
    pub eligible_count: usize,
    pub per_member_monthly: f64,
    pub total_pot_value: f64,
    pub current_cycle: Option<CycleStatus>,
}

/// Contribution history of a single member
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberStatement {
    pub member_id: MemberId,
    pub name: String,
    pub has_received_pot: bool,
    pub received_date: Option<DateTime<Utc>>,
    /// Cycle the member won, if any
    pub won_cycle: Option<CycleId>,
    /// Paid cycles, newest first
    pub paid_cycles: Vec<CycleId>,
    /// Unpaid cycles, newest first
    pub unpaid_cycles: Vec<CycleId>,
    pub total_contributed: f64,
}

/// Read-only projection over the committee state
#[derive(Clone, Copy, Debug)]
pub struct FinancialProjector<'a> {
    settings: &'a Settings,
    members: &'a MemberRegistry,
    cycles: &'a CycleLedger,
    payments: &'a PaymentLedger,
}

impl<'a> FinancialProjector<'a> {
    pub fn new(
        settings: &'a Settings,
        members: &'a MemberRegistry,
        cycles: &'a CycleLedger,
        payments: &'a PaymentLedger,
    ) -> Self {
        Self {
            settings,
            members,
            cycles,
            payments,
        }
    }

    pub fn multiplier(&self) -> u32 {
        period_multiplier(self.settings.frequency)
    }

    /// What one member contributes per month
    pub fn per_member_monthly_contribution(&self) -> f64 {
        self.settings.installment_amount * f64::from(self.multiplier())
    }

    /// What the winner of a cycle receives
    pub fn total_pot_value(&self) -> f64 {
        self.members.len() as f64 * self.per_member_monthly_contribution()
    }

    pub fn collected_count(&self, cycle_id: &CycleId) -> usize {
        self.payments.collected_count(cycle_id)
    }

    /// Amount collected so far in a cycle
    pub fn collected_today(&self, cycle_id: &CycleId) -> f64 {
        self.collected_count(cycle_id) as f64 * self.settings.installment_amount
    }

    /// Share of members who paid a cycle; zero members yields zero
    pub fn collection_progress(&self, cycle_id: &CycleId) -> f64 {
        self.collected_count(cycle_id) as f64 / self.members.len().max(1) as f64
    }

    pub fn cycle_status(&self, cycle: &Cycle) -> CycleStatus {
        CycleStatus {
            cycle_id: cycle.id.clone(),
            label: cycle.label.clone(),
            start_date: cycle.start_date.clone(),
            is_completed: cycle.is_completed,
            winner_id: cycle.winner_id.clone(),
            winner_name: cycle
                .winner_id
                .as_ref()
                .and_then(|id| self.members.resolve_name(id))
                .map(str::to_string),
            collected_count: self.collected_count(&cycle.id),
            collected_amount: self.collected_today(&cycle.id),
            progress: self.collection_progress(&cycle.id),
        }
    }

    pub fn dashboard(&self) -> DashboardSnapshot {
        let snapshot = DashboardSnapshot {
            committee_name: self.settings.committee_name.clone(),
            currency: self.settings.currency.clone(),
            frequency: self.settings.frequency,
            installment_amount: self.settings.installment_amount,
            multiplier: self.multiplier(),
            member_count: self.members.len(),
            eligible_count: self.members.eligible().len(),
            per_member_monthly: self.per_member_monthly_contribution(),
            total_pot_value: self.total_pot_value(),
            current_cycle: self.cycles.current().map(|c| self.cycle_status(c)),
        };

        debug!(
            members = snapshot.member_count,
            pot = snapshot.total_pot_value,
            "Dashboard projected"
        );
        snapshot
    }

    /// Contribution history of a member; `None` if the member is unknown
    pub fn member_statement(&self, member_id: &MemberId) -> Option<MemberStatement> {
        let member = self.members.get(member_id)?;
        let paid: HashSet<&CycleId> = self.payments.paid_cycles_for(member_id).into_iter().collect();

        let (paid_cycles, unpaid_cycles): (Vec<CycleId>, Vec<CycleId>) = self
            .cycles
            .cycles()
            .iter()
            .map(|c| c.id.clone())
            .partition(|id| paid.contains(id));

        let total_contributed = paid_cycles.len() as f64 * self.settings.installment_amount;

        Some(MemberStatement {
            member_id: member.id.clone(),
            name: member.name.clone(),
            has_received_pot: member.has_received_pot,
            received_date: member.received_date,
            won_cycle: self.cycles.won_by(member_id).map(|c| c.id.clone()),
            paid_cycles,
            unpaid_cycles,
            total_contributed,
        })
    }
}
