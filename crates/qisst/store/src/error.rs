use qisst_types::CommitteeError;
use thiserror::Error;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed for {key}: {message}")]
    Serialization { key: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("lock acquisition failed")]
    LockError,

    #[error(transparent)]
    Committee(#[from] CommitteeError),
}

/// Convenience type alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use qisst_types::MemberId;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: StoreError = io_err.into();
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_committee_errors_pass_through() {
        let err: StoreError = CommitteeError::MemberNotFound(MemberId::new("m-4")).into();
        assert_eq!(err.to_string(), "Member not found: m-4");
    }
}
