//! The session registry.
//!
//! Authoritative store of clients, nicknames and rooms. The registry is a
//! plain owned value; serialization comes from the single dispatcher task
//! that owns it, so every method here is atomic with respect to every other.
//!
//! Invariants, holding between calls:
//! - a client listed in a room's members lists that room among its own rooms
//!   and vice versa;
//! - `nicks` maps exactly the registered clients' current nicknames, so no
//!   two clients share one.

use super::{Client, ClientId, ClientSender, Identity, Room};
use crate::config::RoomRetention;
use crate::error::RegistryError;
use slrelay_proto::strip_room_marker;
use std::collections::HashMap;
use std::net::SocketAddr;
use tracing::debug;

/// Outcome of a successful nickname bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NickChange {
    /// First nickname for this client.
    First,
    /// Replaced a previous nickname.
    Renamed { old: String },
    /// Client re-claimed its current nickname.
    Unchanged,
}

/// A completed `part_room`.
#[derive(Debug, Clone)]
pub struct Departure {
    /// Room name without marker.
    pub room: String,
    /// Members before removal, departing client included, in join order.
    pub recipients: Vec<ClientId>,
}

/// Authoritative client/room store.
#[derive(Debug)]
pub struct Registry {
    clients: HashMap<ClientId, Client>,
    nicks: HashMap<String, ClientId>,
    rooms: HashMap<String, Room>,
    next_id: u64,
    retention: RoomRetention,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RoomRetention::default())
    }
}

impl Registry {
    pub fn new(retention: RoomRetention) -> Self {
        Self {
            clients: HashMap::new(),
            nicks: HashMap::new(),
            rooms: HashMap::new(),
            next_id: 1,
            retention,
        }
    }

    /// Admit a new connection. The client starts unregistered.
    pub fn register_client(&mut self, addr: SocketAddr, sender: ClientSender) -> ClientId {
        let id = ClientId(self.next_id);
        self.next_id += 1;
        self.clients.insert(id, Client::new(id, addr, sender));
        debug!(client = %id, %addr, "Client registered");
        id
    }

    /// Bind `name` to `id`.
    ///
    /// Names are compared case-sensitively. Empty names and names starting
    /// with the room marker or a colon are refused.
    pub fn set_nickname(&mut self, id: ClientId, name: &str) -> Result<NickChange, RegistryError> {
        if name.is_empty() || name.starts_with('#') || name.starts_with(':') {
            return Err(RegistryError::ErroneousNickname(name.to_string()));
        }

        match self.nicks.get(name) {
            Some(holder) if *holder == id => return Ok(NickChange::Unchanged),
            Some(_) => return Err(RegistryError::NameConflict(name.to_string())),
            None => {}
        }

        let client = self
            .clients
            .get_mut(&id)
            .ok_or(RegistryError::UnknownClient(id))?;

        let change = match client.nickname.replace(name.to_string()) {
            Some(old) => {
                self.nicks.remove(&old);
                NickChange::Renamed { old }
            }
            None => NickChange::First,
        };
        self.nicks.insert(name.to_string(), id);

        Ok(change)
    }

    /// Record the `USER` fields. Identity can be set only once.
    pub fn set_identity(&mut self, id: ClientId, identity: Identity) -> Result<(), RegistryError> {
        let client = self
            .clients
            .get_mut(&id)
            .ok_or(RegistryError::UnknownClient(id))?;

        if client.is_identified() {
            return Err(RegistryError::AlreadyIdentified);
        }

        client.username = identity.username;
        client.hostname = identity.hostname;
        client.realname = identity.realname;
        client.identified = true;
        Ok(())
    }

    /// Add `id` to a room, creating the room on first use.
    ///
    /// A leading `#` is stripped. Joining a room twice leaves membership
    /// unchanged.
    pub fn join_room(&mut self, id: ClientId, name: &str) -> Result<&Room, RegistryError> {
        let name = strip_room_marker(name);
        if name.is_empty() {
            return Err(RegistryError::NoSuchRoom(String::new()));
        }

        let client = self
            .clients
            .get_mut(&id)
            .ok_or(RegistryError::UnknownClient(id))?;

        let room = self
            .rooms
            .entry(name.to_string())
            .or_insert_with(|| Room::new(name.to_string()));

        if room.add(id) {
            client.rooms.insert(name.to_string());
        }

        Ok(room)
    }

    /// Remove `id` from a room.
    ///
    /// Returns `Ok(None)` if the room does not exist. On success the
    /// returned [`Departure`] carries the pre-removal member list so the
    /// caller can announce the part.
    pub fn part_room(&mut self, id: ClientId, name: &str) -> Result<Option<Departure>, RegistryError> {
        let name = strip_room_marker(name);

        let Some(room) = self.rooms.get_mut(name) else {
            return Ok(None);
        };

        let client = self
            .clients
            .get_mut(&id)
            .ok_or(RegistryError::UnknownClient(id))?;

        if !room.contains(id) {
            return Err(RegistryError::NotAMember(name.to_string()));
        }

        let recipients = room.members().to_vec();
        room.remove(id);
        client.rooms.remove(name);
        self.prune(name);

        Ok(Some(Departure {
            room: name.to_string(),
            recipients,
        }))
    }

    /// Look up a room by its internal (marker-free) name.
    pub fn find_room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    /// Look up a registered client by nickname.
    pub fn find_client(&self, nickname: &str) -> Option<&Client> {
        self.nicks.get(nickname).and_then(|id| self.clients.get(id))
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(&id)
    }

    /// Drop a client from every room and from the registry.
    ///
    /// Nothing is announced; the caller decides what, if anything, to say.
    pub fn remove_client(&mut self, id: ClientId) -> Option<Client> {
        let client = self.clients.remove(&id)?;

        for name in &client.rooms {
            if let Some(room) = self.rooms.get_mut(name) {
                room.remove(id);
            }
            self.prune(name);
        }

        if let Some(nick) = client.nickname() {
            if self.nicks.get(nick) == Some(&id) {
                self.nicks.remove(nick);
            }
        }

        debug!(client = %id, "Client removed");
        Some(client)
    }

    /// Members of a room in join order, skipping any that are gone.
    pub fn members<'a>(&'a self, room: &'a Room) -> impl Iterator<Item = &'a Client> + 'a {
        room.members().iter().filter_map(|id| self.clients.get(id))
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn retention(&self) -> RoomRetention {
        self.retention
    }

    fn prune(&mut self, name: &str) {
        if self.retention != RoomRetention::PruneEmpty {
            return;
        }
        if self.rooms.get(name).is_some_and(Room::is_empty) {
            self.rooms.remove(name);
            debug!(room = %name, "Pruned empty room");
        }
    }

    /// Panics if any registry invariant is broken.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for (name, room) in &self.rooms {
            for member in room.members() {
                let client = self.clients.get(member).expect("room lists unknown client");
                assert!(client.rooms.contains(name), "{member} missing back-reference to {name}");
            }
            if self.retention == RoomRetention::PruneEmpty {
                assert!(!room.is_empty(), "empty room {name} survived pruning");
            }
        }
        for (id, client) in &self.clients {
            for name in &client.rooms {
                let room = self.rooms.get(name).expect("client lists unknown room");
                assert!(room.contains(*id), "{name} missing member {id}");
            }
            if let Some(nick) = client.nickname() {
                assert_eq!(self.nicks.get(nick), Some(id));
            }
        }
        let registered = self.clients.values().filter(|c| c.is_registered()).count();
        assert_eq!(self.nicks.len(), registered);
    }
}
