//! Qisst Store
//!
//! Persistence and process bootstrap for a Qisst committee:
//!
//! - [`BlobStore`] backends ([`JsonFileStore`], [`InMemoryStore`])
//! - the four committee blobs and their forgiving loader ([`blob`])
//! - [`PersistentCommittee`], which saves exactly the blobs a command replaced
//! - [`QisstConfig`] loaded from TOML, and [`init_logging`]
//!
//! # Example
//!
//! ```rust
//! use qisst_ledger::LedgerConfig;
//! use qisst_store::{BlobKeys, InMemoryStore, PersistentCommittee};
//! use qisst_types::NewMember;
//!
//! let mut committee =
//!     PersistentCommittee::open(InMemoryStore::new(), BlobKeys::default(), LedgerConfig::default())
//!         .unwrap();
//! committee.add_member(NewMember::new("Ayesha")).unwrap();
//! assert_eq!(committee.committee().members().len(), 1);
//! ```

#![deny(unsafe_code)]

pub mod backend;
pub mod blob;
pub mod config;
pub mod error;
pub mod logging;
pub mod persistent;

pub use backend::{BlobStore, InMemoryStore, JsonFileStore};
pub use blob::{load_committee, save_changes, BlobKeys};
pub use config::{QisstConfig, StorageBackend, StorageConfig};
pub use error::{StoreError, StoreResult};
pub use logging::{init_logging, LoggingConfig};
pub use persistent::PersistentCommittee;
