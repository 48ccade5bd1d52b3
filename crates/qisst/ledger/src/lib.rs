//! Qisst Ledger Runtime
//!
//! The ledger and rotation engine of a rotating-savings committee.
//!
//! # Architecture
//!
//! The [`Committee`] is the main entry point. It owns the committee
//! [`Settings`](qisst_types::Settings) and composes specialized components:
//!
//! - [`MemberRegistry`]: member lifecycle and pot-received status
//! - [`CycleLedger`]: contribution cycles, newest first, and their winners
//! - [`PaymentLedger`]: which member paid which cycle
//! - [`RotationEngine`]: uniform winner draw among eligible members
//! - [`FinancialProjector`]: pot value, totals, and collection progress,
//!   recomputed on every read
//!
//! # Key Invariants
//!
//! 1. A member receives the pot at most once
//! 2. A cycle's winner is set at most once
//! 3. A draw records the cycle winner and the member receipt together or not
//!    at all
//! 4. Collections are replaced copy-on-write; snapshots never see a
//!    half-applied update
//!
//! # Example
//!
//! ```rust
//! use qisst_ledger::{AutoConfirm, Committee, FixedDraw, LedgerConfig};
//! use qisst_types::{NewMember, Settings};
//!
//! let mut committee = Committee::new(Settings::default(), LedgerConfig::default());
//! let ali = committee.add_member(NewMember::new("Ali")).unwrap();
//! let cycle = committee.create_cycle();
//!
//! committee.toggle_payment(&ali, &cycle);
//! assert_eq!(committee.collected_count(&cycle), 1);
//!
//! let outcome = committee
//!     .draw_winner(&cycle, &mut FixedDraw(0), &mut AutoConfirm)
//!     .unwrap();
//! assert_eq!(outcome.winner(), Some(&ali));
//! ```

#![deny(unsafe_code)]

pub mod committee;
pub mod config;
pub mod confirm;
pub mod cycle_ledger;
pub mod member_registry;
pub mod payment_ledger;
pub mod projector;
pub mod rotation_engine;

pub use committee::{ChangeSet, Committee, Removal};
pub use config::{LedgerConfig, RemovalPolicy};
pub use confirm::{AutoConfirm, AutoDecline, Confirm, ConfirmRequest};
pub use cycle_ledger::CycleLedger;
pub use member_registry::MemberRegistry;
pub use payment_ledger::PaymentLedger;
pub use projector::{
    period_multiplier, CycleStatus, DashboardSnapshot, FinancialProjector, MemberStatement,
};
pub use rotation_engine::{
    DrawOutcome, DrawProposal, DrawSource, FixedDraw, RandomDraw, RotationEngine,
};
