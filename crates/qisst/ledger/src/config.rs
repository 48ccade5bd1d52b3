//! Ledger configuration

use serde::{Deserialize, Serialize};

/// What happens to payment records and winner references when a member is
/// removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    /// Remove the member only; readers treat dangling references as unknown.
    #[default]
    Tolerate,
    /// Also delete the member's payment records. Cycle winner references are
    /// history and are kept.
    Cascade,
    /// Refuse removal while any payment or cycle winner references the member.
    Block,
}

/// Ledger configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub removal_policy: RemovalPolicy,
}

impl LedgerConfig {
    pub fn with_removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.removal_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_tolerates_dangling_references() {
        assert_eq!(LedgerConfig::default().removal_policy, RemovalPolicy::Tolerate);
    }

    #[test]
    fn test_policy_serializes_lowercase() {
        let config = LedgerConfig::default().with_removal_policy(RemovalPolicy::Cascade);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"removal_policy":"cascade"}"#);

        let parsed: LedgerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, LedgerConfig::default());
    }
}
