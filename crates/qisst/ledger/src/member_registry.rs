//! Member Registry: who is in the committee
//!
//! Members are kept in insertion order. The collection is shared copy-on-write:
//! a snapshot taken with [`MemberRegistry::snapshot`] never observes a later
//! mutation.

use chrono::{DateTime, Utc};
use qisst_types::{CommitteeError, CommitteeResult, Member, MemberId, NewMember};
use std::sync::Arc;
use tracing::{info, warn};

/// Registry of committee members
#[derive(Clone, Debug, Default)]
pub struct MemberRegistry {
    members: Arc<Vec<Member>>,
}

impl MemberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from a loaded collection
    pub fn from_members(members: Vec<Member>) -> Self {
        Self {
            members: Arc::new(members),
        }
    }

    /// Register a member. Blank names are rejected without touching the
    /// collection.
    pub fn add(&mut self, new_member: NewMember, now: DateTime<Utc>) -> CommitteeResult<MemberId> {
        let NewMember { name, phone } = new_member.normalize()?;

        let mut member = Member::new(name, phone, now);
        while self.contains(&member.id) {
            member.id = MemberId::generate();
        }
        let id = member.id.clone();

        info!(member = %id, name = %member.name, "Member added to committee");
        Arc::make_mut(&mut self.members).push(member);

        Ok(id)
    }

    /// Remove a member and return the removed record
    pub fn remove(&mut self, id: &MemberId) -> CommitteeResult<Member> {
        let index = self
            .position(id)
            .ok_or_else(|| CommitteeError::MemberNotFound(id.clone()))?;

        let removed = Arc::make_mut(&mut self.members).remove(index);
        info!(member = %id, "Member removed from committee");

        Ok(removed)
    }

    /// Fail unless `id` exists and has not received the pot yet.
    pub fn ensure_can_receive(&self, id: &MemberId) -> CommitteeResult<&Member> {
        let member = self
            .get(id)
            .ok_or_else(|| CommitteeError::MemberNotFound(id.clone()))?;
        if member.has_received_pot {
            warn!(member = %id, "Refusing to mark pot received twice");
            return Err(CommitteeError::AlreadyReceivedPot(id.clone()));
        }
        Ok(member)
    }

    /// Record that a member received the pot. Only the rotation engine calls
    /// this; a second call for the same member is an invariant violation.
    pub fn mark_received_pot(&mut self, id: &MemberId, date: DateTime<Utc>) -> CommitteeResult<()> {
        self.ensure_can_receive(id)?;

        let members = Arc::make_mut(&mut self.members);
        if let Some(member) = members.iter_mut().find(|m| m.id == *id) {
            member.has_received_pot = true;
            member.received_date = Some(date);
        }
        Ok(())
    }

    pub fn get(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == *id)
    }

    pub fn contains(&self, id: &MemberId) -> bool {
        self.position(id).is_some()
    }

    /// Name of a member, or `None` for a dangling reference
    pub fn resolve_name(&self, id: &MemberId) -> Option<&str> {
        self.get(id).map(|m| m.name.as_str())
    }

    /// Members in registry order
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Members who have not yet received the pot, in registry order
    pub fn eligible(&self) -> Vec<&Member> {
        self.members.iter().filter(|m| m.is_eligible()).collect()
    }

    pub fn snapshot(&self) -> Arc<Vec<Member>> {
        Arc::clone(&self.members)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn position(&self, id: &MemberId) -> Option<usize> {
        self.members.iter().position(|m| m.id == *id)
    }
}
