//! Confirmation gate for irreversible operations
//!
//! Removing a member and committing a draw both require the caller to
//! acknowledge the action first. Declining is the only way to cancel; nothing
//! is mutated before the answer is known.

use qisst_types::{Cycle, Member};

/// An irreversible action awaiting acknowledgment
#[derive(Debug, Clone, Copy)]
pub enum ConfirmRequest<'a> {
    RemoveMember { member: &'a Member },
    DrawWinner { cycle: &'a Cycle, candidate: &'a Member },
}

impl ConfirmRequest<'_> {
    /// Text suitable for a confirmation dialog
    pub fn prompt(&self) -> String {
        match self {
            ConfirmRequest::RemoveMember { member } => format!(
                "Delete {}? All their data will be lost.",
                member.name
            ),
            ConfirmRequest::DrawWinner { cycle, candidate } => format!(
                "Conduct lucky draw for {}?\n\nWinner: {}",
                cycle.label, candidate.name
            ),
        }
    }
}

/// Answers confirmation requests
pub trait Confirm {
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&ConfirmRequest<'_>) -> bool,
{
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> bool {
        self(request)
    }
}

/// Accepts every request
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _request: &ConfirmRequest<'_>) -> bool {
        true
    }
}

/// Declines every request
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoDecline;

impl Confirm for AutoDecline {
    fn confirm(&mut self, _request: &ConfirmRequest<'_>) -> bool {
        false
    }
}
