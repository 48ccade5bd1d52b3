//! Identifier newtypes

use serde::{Deserialize, Serialize};

/// Unique identifier for a committee member
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a contribution cycle
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(pub String);

impl CycleId {
    pub fn generate() -> Self {
        Self(format!("cycle-{}", uuid::Uuid::new_v4()))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CycleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_member_ids_are_unique() {
        let a = MemberId::generate();
        let b = MemberId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_cycle_ids_carry_prefix() {
        let id = CycleId::generate();
        assert!(id.as_str().starts_with("cycle-"));
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = MemberId::new("1718000000000");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1718000000000\"");
        assert_eq!(format!("{}", CycleId::new("cycle-1")), "cycle-1");
    }
}
