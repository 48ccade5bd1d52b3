//! Committee blobs
//!
//! The committee is stored as four independent blobs: settings, members,
//! cycles, and payments. Each mutation re-serializes the full blob of the
//! collection it touched. Loading is forgiving: an absent or unparsable blob
//! falls back to its default so one bad blob never hides the other three.

use qisst_ledger::{ChangeSet, Committee, LedgerConfig};
use qisst_types::{Cycle, Member, PaymentRecord, Settings};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::BlobStore;
use crate::error::{StoreError, StoreResult};

/// Names of the four blobs under a key prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobKeys {
    pub prefix: String,
    pub settings: String,
    pub members: String,
    pub cycles: String,
    pub payments: String,
}

impl BlobKeys {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            settings: format!("{}_settings", prefix),
            members: format!("{}_members", prefix),
            cycles: format!("{}_cycles", prefix),
            payments: format!("{}_payments", prefix),
        }
    }
}

impl Default for BlobKeys {
    fn default() -> Self {
        Self::new("qisst")
    }
}

/// Rebuild a committee from its blobs.
///
/// Only backend failures are errors; missing or corrupt blobs load as
/// defaults. Stored settings that fail validation load as defaults too.
pub fn load_committee<S: BlobStore + ?Sized>(
    store: &S,
    keys: &BlobKeys,
    config: LedgerConfig,
) -> StoreResult<Committee> {
    let settings = load_settings(store, &keys.settings)?;
    let members: Vec<Member> = load_blob(store, &keys.members)?;
    let cycles: Vec<Cycle> = load_blob(store, &keys.cycles)?;
    let payments: Vec<PaymentRecord> = load_blob(store, &keys.payments)?;

    debug!(
        members = members.len(),
        cycles = cycles.len(),
        payments = payments.len(),
        "Committee loaded"
    );
    Ok(Committee::from_parts(
        settings, members, cycles, payments, config,
    ))
}

/// Write the blobs named by `changes`.
pub fn save_changes<S: BlobStore + ?Sized>(
    store: &S,
    keys: &BlobKeys,
    committee: &Committee,
    changes: ChangeSet,
) -> StoreResult<()> {
    if changes.settings {
        save_blob(store, &keys.settings, committee.settings())?;
    }
    if changes.members {
        save_blob(store, &keys.members, committee.members().members())?;
    }
    if changes.cycles {
        save_blob(store, &keys.cycles, committee.cycles().cycles())?;
    }
    if changes.payments {
        save_blob(store, &keys.payments, committee.payments().records())?;
    }
    Ok(())
}

fn load_settings<S: BlobStore + ?Sized>(store: &S, key: &str) -> StoreResult<Settings> {
    let settings: Settings = load_blob(store, key)?;
    if let Err(e) = settings.validate() {
        warn!(key, error = %e, "Invalid stored settings, falling back to default");
        return Ok(Settings::default());
    }
    Ok(settings)
}

fn load_blob<S, T>(store: &S, key: &str) -> StoreResult<T>
where
    S: BlobStore + ?Sized,
    T: DeserializeOwned + Default,
{
    let Some(contents) = store.read(key)? else {
        return Ok(T::default());
    };

    match serde_json::from_str(&contents) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(key, error = %e, "Unreadable blob, falling back to default");
            Ok(T::default())
        }
    }
}

fn save_blob<S, T>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    S: BlobStore + ?Sized,
    T: Serialize + ?Sized,
{
    let contents = serde_json::to_string(value).map_err(|e| StoreError::Serialization {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.write(key, &contents)?;
    debug!(key, bytes = contents.len(), "Blob saved");
    Ok(())
}
