//! Rotation Engine: drawing the pot winner of a cycle
//!
//! A draw picks uniformly among members who have not received the pot yet,
//! asks for confirmation naming the candidate, and then records the winner on
//! the cycle and the member together.
//!
//! ## Invariants
//!
//! - A member receives the pot at most once.
//! - A cycle's winner is set at most once; a won cycle is refused before any
//!   randomness is consumed.
//! - Cycle winner and member receipt land together or not at all.
//! - Payment status never affects eligibility.

use chrono::{DateTime, Utc};
use qisst_types::{CommitteeResult, CycleId, Member, MemberId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::confirm::{Confirm, ConfirmRequest};
use crate::cycle_ledger::CycleLedger;
use crate::member_registry::MemberRegistry;

/// Source of the draw index
pub trait DrawSource {
    /// Return an index uniformly distributed over `0..len`. Never called with
    /// `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Uniform draw backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RandomDraw<R = StdRng> {
    rng: R,
}

impl RandomDraw<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sequence of draws
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomDraw<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DrawSource for RandomDraw<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always picks the same position (modulo the pool size)
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDraw(pub usize);

impl DrawSource for FixedDraw {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

/// A drawn candidate that has not been committed yet
#[derive(Debug, Clone, PartialEq)]
pub struct DrawProposal {
    pub cycle_id: CycleId,
    pub candidate: Member,
    /// Size of the pool the candidate was drawn from
    pub pool_size: usize,
}

/// Result of a draw request
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    /// Winner recorded on both the cycle and the member
    Winner {
        cycle_id: CycleId,
        member_id: MemberId,
        received_date: DateTime<Utc>,
    },
    /// The candidate was not confirmed; nothing changed
    Declined {
        cycle_id: CycleId,
        candidate: MemberId,
    },
    /// Everyone already received the pot; nothing changed
    PoolExhausted { cycle_id: CycleId },
}

impl DrawOutcome {
    pub fn is_winner(&self) -> bool {
        matches!(self, DrawOutcome::Winner { .. })
    }

    pub fn winner(&self) -> Option<&MemberId> {
        match self {
            DrawOutcome::Winner { member_id, .. } => Some(member_id),
            _ => None,
        }
    }
}

/// Stateless draw logic over the registry and the cycle ledger
#[derive(Debug, Default, Clone, Copy)]
pub struct RotationEngine;

impl RotationEngine {
    /// Pick a candidate for `cycle_id` without mutating anything.
    ///
    /// Returns `Ok(None)` when the pool is exhausted. A cycle that already has
    /// a winner is an error.
    pub fn propose(
        members: &MemberRegistry,
        cycles: &CycleLedger,
        cycle_id: &CycleId,
        source: &mut impl DrawSource,
    ) -> CommitteeResult<Option<DrawProposal>> {
        cycles.ensure_open(cycle_id)?;

        let eligible = members.eligible();
        if eligible.is_empty() {
            warn!(cycle = %cycle_id, "Draw requested but everyone has received the pot");
            return Ok(None);
        }

        let pool_size = eligible.len();
        let index = source.pick_index(pool_size).min(pool_size - 1);
        let candidate = eligible[index].clone();

        Ok(Some(DrawProposal {
            cycle_id: cycle_id.clone(),
            candidate,
            pool_size,
        }))
    }

    /// Record a confirmed proposal on the cycle and the member as one update.
    ///
    /// Both preconditions are checked before either collection is touched, so
    /// a failure leaves both unchanged.
    pub fn commit(
        proposal: &DrawProposal,
        members: &mut MemberRegistry,
        cycles: &mut CycleLedger,
        now: DateTime<Utc>,
    ) -> CommitteeResult<DrawOutcome> {
        let winner = &proposal.candidate.id;
        cycles.ensure_open(&proposal.cycle_id)?;
        members.ensure_can_receive(winner)?;

        cycles.set_winner(&proposal.cycle_id, winner)?;
        members.mark_received_pot(winner, now)?;

        info!(
            cycle = %proposal.cycle_id,
            winner = %winner,
            pool = proposal.pool_size,
            "Pot winner drawn"
        );

        Ok(DrawOutcome::Winner {
            cycle_id: proposal.cycle_id.clone(),
            member_id: winner.clone(),
            received_date: now,
        })
    }

    /// Propose, confirm, and commit a draw for `cycle_id`.
    pub fn draw(
        members: &mut MemberRegistry,
        cycles: &mut CycleLedger,
        cycle_id: &CycleId,
        source: &mut impl DrawSource,
        confirm: &mut impl Confirm,
        now: DateTime<Utc>,
    ) -> CommitteeResult<DrawOutcome> {
        let Some(proposal) = Self::propose(members, cycles, cycle_id, source)? else {
            return Ok(DrawOutcome::PoolExhausted {
                cycle_id: cycle_id.clone(),
            });
        };

        let confirmed = match cycles.get(cycle_id) {
            Some(cycle) => confirm.confirm(&ConfirmRequest::DrawWinner {
                cycle,
                candidate: &proposal.candidate,
            }),
            None => false,
        };
        if !confirmed {
            info!(cycle = %cycle_id, candidate = %proposal.candidate.id, "Draw declined");
            return Ok(DrawOutcome::Declined {
                cycle_id: cycle_id.clone(),
                candidate: proposal.candidate.id,
            });
        }

        Self::commit(&proposal, members, cycles, now)
    }
}
