//! Committee members

use crate::{CommitteeError, CommitteeResult, MemberId};
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

const AVATAR_SEED_LEN: usize = 6;

/// A participant in the committee
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Immutable identifier assigned at creation
    pub id: MemberId,
    /// Display name, never empty
    pub name: String,
    /// Free-text phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// When the member joined
    pub join_date: DateTime<Utc>,
    /// Whether the member already received the pot
    #[serde(default)]
    pub has_received_pot: bool,
    /// When the pot was received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_date: Option<DateTime<Utc>>,
    /// Display-only avatar token
    #[serde(default)]
    pub avatar_seed: String,
}

impl Member {
    /// Create a member that has not yet received the pot.
    pub fn new(name: impl Into<String>, phone: Option<String>, join_date: DateTime<Utc>) -> Self {
        Self {
            id: MemberId::generate(),
            name: name.into(),
            phone,
            join_date,
            has_received_pot: false,
            received_date: None,
            avatar_seed: avatar_seed(),
        }
    }

    pub fn with_id(mut self, id: MemberId) -> Self {
        self.id = id;
        self
    }

    /// A member who has not received the pot can still win a draw.
    pub fn is_eligible(&self) -> bool {
        !self.has_received_pot
    }
}

/// Parameters for registering a new member
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub phone: Option<String>,
}

impl NewMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Trim the name and phone; an empty name is rejected and a blank phone
    /// becomes `None`.
    pub fn normalize(self) -> CommitteeResult<NewMember> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(CommitteeError::Validation(
                "member name must not be empty".into(),
            ));
        }
        let phone = self
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        Ok(NewMember { name, phone })
    }
}

fn avatar_seed() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(AVATAR_SEED_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member_has_not_received_pot() {
        let member = Member::new("Ayesha", None, Utc::now());
        assert!(member.is_eligible());
        assert!(member.received_date.is_none());
        assert_eq!(member.avatar_seed.len(), AVATAR_SEED_LEN);
    }

    #[test]
    fn test_normalize_trims_and_rejects_blank_names() {
        let ok = NewMember::new("  Bilal ").with_phone("   ").normalize().unwrap();
        assert_eq!(ok.name, "Bilal");
        assert!(ok.phone.is_none());

        let err = NewMember::new(" \t ").normalize();
        assert!(matches!(err, Err(CommitteeError::Validation(_))));
    }

    #[test]
    fn test_member_serializes_in_camel_case() {
        let member = Member::new("Sana", Some("0300-1234567".into()), Utc::now())
            .with_id(MemberId::new("m-1"));
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["id"], "m-1");
        assert_eq!(json["hasReceivedPot"], false);
        assert!(json.get("joinDate").is_some());
        assert!(json.get("receivedDate").is_none());
    }

    #[test]
    fn test_member_parses_blob_without_optional_fields() {
        let json = r#"{
            "id": "1718000000000",
            "name": "Hamza",
            "joinDate": "2024-06-10T08:00:00.000Z",
            "hasReceivedPot": true,
            "receivedDate": "2024-07-01T09:30:00.000Z",
            "avatarSeed": "x7k2q"
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.id, MemberId::new("1718000000000"));
        assert!(member.phone.is_none());
        assert!(member.has_received_pot);
        assert!(member.received_date.is_some());
    }
}
