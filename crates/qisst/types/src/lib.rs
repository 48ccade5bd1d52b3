//! Qisst Committee Domain Types
//!
//! This crate defines the data model of a rotating-savings committee: a pool
//! where every member contributes a fixed installment per period and one
//! member per cycle receives the accumulated pot, until everyone has received
//! it once.
//!
//! # Key Concepts
//!
//! - **Member**: a participant; receives the pot at most once.
//! - **Cycle**: one collection period; completed once a winner is drawn.
//! - **PaymentRecord**: the existence of a record *is* the fact that a member
//!   paid a cycle. Unpaid is the absence of a record.
//! - **Settings**: committee-wide configuration (installment, currency,
//!   contribution frequency).
//!
//! # Architecture
//!
//! This is a pure types crate with no runtime behavior beyond constructors and
//! validation. All types implement `Clone`, `Debug`, `Serialize`,
//! `Deserialize`, and serialize with the camelCase field names of the
//! persisted blobs. IDs use the newtype pattern and implement `Display`,
//! `generate()`, and `new()`.

#![deny(unsafe_code)]

mod cycle;
mod errors;
mod ids;
mod member;
mod payment;
mod settings;

pub use cycle::*;
pub use errors::*;
pub use ids::*;
pub use member::*;
pub use payment::*;
pub use settings::*;
