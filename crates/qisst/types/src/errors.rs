//! Error types for committee operations

use crate::{CycleId, MemberId};

/// Errors that can occur in committee operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommitteeError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Cycle not found: {0}")]
    CycleNotFound(CycleId),

    #[error("Cycle {cycle} already has winner {winner}")]
    CycleAlreadyDrawn { cycle: CycleId, winner: MemberId },

    #[error("Member already received the pot: {0}")]
    AlreadyReceivedPot(MemberId),

    #[error("Member {0} is still referenced by payments or cycle winners")]
    MemberReferenced(MemberId),
}

/// Result type alias for committee operations
pub type CommitteeResult<T> = Result<T, CommitteeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let e = CommitteeError::CycleAlreadyDrawn {
            cycle: CycleId::new("cycle-7"),
            winner: MemberId::new("m-3"),
        };
        let s = e.to_string();
        assert!(s.contains("cycle-7"));
        assert!(s.contains("m-3"));

        let e = CommitteeError::AlreadyReceivedPot(MemberId::new("m-9"));
        assert!(e.to_string().contains("m-9"));
    }
}
