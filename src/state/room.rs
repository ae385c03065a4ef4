//! Rooms: named broadcast groups.

use super::ClientId;

/// A named broadcast group.
///
/// The name is stored without its `#` marker. Members are kept in join
/// order; membership only changes through the registry so that the
/// client-side back-references stay in sync.
#[derive(Debug, Clone)]
pub struct Room {
    name: String,
    members: Vec<ClientId>,
}

impl Room {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in join order.
    pub fn members(&self) -> &[ClientId] {
        &self.members
    }

    pub fn contains(&self, id: ClientId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns false if `id` was already a member.
    pub(crate) fn add(&mut self, id: ClientId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.members.push(id);
        true
    }

    /// Returns false if `id` was not a member.
    pub(crate) fn remove(&mut self, id: ClientId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| *member != id);
        self.members.len() != before
    }
}
