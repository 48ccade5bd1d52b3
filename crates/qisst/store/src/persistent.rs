//! A committee that saves itself after every command

use qisst_ledger::{
    ChangeSet, Committee, Confirm, DrawOutcome, DrawSource, FinancialProjector, LedgerConfig,
    Removal,
};
use qisst_types::{CycleId, MemberId, NewMember, Settings};
use tracing::{info, warn};

use crate::backend::BlobStore;
use crate::blob::{load_committee, save_changes, BlobKeys};
use crate::config::QisstConfig;
use crate::error::StoreResult;

/// [`Committee`] bound to a [`BlobStore`].
///
/// Every command is forwarded to the committee, then exactly the blobs it
/// replaced are written. A failed write keeps those blobs pending; they are
/// retried by the next command or by [`flush`](Self::flush).
///
/// A write error does not undo the command: the in-memory committee already
/// holds the change. The member or cycle created by a command whose save
/// failed is still reachable through [`committee`](Self::committee), as the
/// last member or the current cycle.
pub struct PersistentCommittee<S: BlobStore> {
    committee: Committee,
    store: S,
    keys: BlobKeys,
    pending: ChangeSet,
}

impl<S: BlobStore> PersistentCommittee<S> {
    /// Load the committee stored under `keys`.
    pub fn open(store: S, keys: BlobKeys, config: LedgerConfig) -> StoreResult<Self> {
        let committee = load_committee(&store, &keys, config)?;
        info!(
            prefix = %keys.prefix,
            members = committee.members().len(),
            cycles = committee.cycles().len(),
            "Committee opened"
        );
        Ok(Self {
            committee,
            store,
            keys,
            pending: ChangeSet::default(),
        })
    }

    // --- Commands ---

    /// Register a member and save the members blob. On a write error the
    /// member stays registered and its blob stays pending.
    pub fn add_member(&mut self, new_member: NewMember) -> StoreResult<MemberId> {
        let id = self.committee.add_member(new_member)?;
        self.persist()?;
        Ok(id)
    }

    pub fn remove_member(
        &mut self,
        member_id: &MemberId,
        confirm: &mut impl Confirm,
    ) -> StoreResult<Removal> {
        let removal = self.committee.remove_member(member_id, confirm)?;
        self.persist()?;
        Ok(removal)
    }

    /// Open a cycle and save the cycles blob. On a write error the cycle
    /// stays open as the current cycle and its blob stays pending.
    pub fn create_cycle(&mut self) -> StoreResult<CycleId> {
        let id = self.committee.create_cycle();
        self.persist()?;
        Ok(id)
    }

    /// Change the displayed cycle. Not persisted.
    pub fn select_cycle(&mut self, cycle_id: &CycleId) -> StoreResult<()> {
        Ok(self.committee.select_cycle(cycle_id)?)
    }

    pub fn toggle_payment(&mut self, member_id: &MemberId, cycle_id: &CycleId) -> StoreResult<bool> {
        let paid = self.committee.toggle_payment(member_id, cycle_id);
        self.persist()?;
        Ok(paid)
    }

    pub fn draw_winner(
        &mut self,
        cycle_id: &CycleId,
        source: &mut impl DrawSource,
        confirm: &mut impl Confirm,
    ) -> StoreResult<DrawOutcome> {
        let outcome = self.committee.draw_winner(cycle_id, source, confirm)?;
        self.persist()?;
        Ok(outcome)
    }

    pub fn update_settings(&mut self, settings: Settings) -> StoreResult<()> {
        self.committee.update_settings(settings)?;
        self.persist()
    }

    /// Write every blob that is still pending
    pub fn flush(&mut self) -> StoreResult<()> {
        self.persist()
    }

    // --- Queries ---

    pub fn committee(&self) -> &Committee {
        &self.committee
    }

    pub fn projector(&self) -> FinancialProjector<'_> {
        self.committee.projector()
    }

    pub fn is_paid(&self, member_id: &MemberId, cycle_id: &CycleId) -> bool {
        self.committee.is_paid(member_id, cycle_id)
    }

    pub fn collected_count(&self, cycle_id: &CycleId) -> usize {
        self.committee.collected_count(cycle_id)
    }

    /// Blobs whose last write failed
    pub fn pending(&self) -> ChangeSet {
        self.pending
    }

    pub fn keys(&self) -> &BlobKeys {
        &self.keys
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> (Committee, S) {
        (self.committee, self.store)
    }

    fn persist(&mut self) -> StoreResult<()> {
        self.pending.merge(self.committee.take_changes());
        if self.pending.is_empty() {
            return Ok(());
        }

        match save_changes(&self.store, &self.keys, &self.committee, self.pending) {
            Ok(()) => {
                self.pending = ChangeSet::default();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Saving committee failed; blobs stay pending");
                Err(e)
            }
        }
    }
}

impl PersistentCommittee<Box<dyn BlobStore>> {
    /// Open the committee described by a configuration
    pub fn from_config(config: &QisstConfig) -> StoreResult<Self> {
        Self::open(
            config.storage.open_store(),
            BlobKeys::new(&config.storage.key_prefix),
            config.ledger.clone(),
        )
    }
}
