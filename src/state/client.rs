//! Connected clients.
//!
//! A [`Client`] is bound to exactly one connection. The outgoing queue it
//! holds is the only way to reach that connection's writer task, so every
//! line for a client is funneled through [`Client::send`].

use crate::error::RegistryError;
use slrelay_proto::{Message, Prefix};
use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

/// Registry-assigned connection identifier. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub(crate) u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Outgoing queue handle for one connection.
pub type ClientSender = mpsc::Sender<Arc<Message>>;

/// Fields supplied by the `USER` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub hostname: String,
    pub realname: String,
}

impl Identity {
    /// Build an identity from `USER` parameters:
    /// `<username> <unused> <hostname> <realname...>`.
    ///
    /// Exactly four parameters are accepted, or more when the fourth opens a
    /// `:`-marked trailing realname that spans several tokens.
    pub fn from_params(params: &[&str]) -> Result<Self, RegistryError> {
        let well_formed = match params.len() {
            4 => true,
            n if n > 4 => params[3].starts_with(':'),
            _ => false,
        };
        if !well_formed {
            return Err(RegistryError::InvalidArity);
        }

        let realname = params[3..].join(" ");
        let realname = realname.strip_prefix(':').unwrap_or(&realname).to_string();

        Ok(Self {
            username: params[0].to_string(),
            hostname: params[2].to_string(),
            realname,
        })
    }
}

/// A connected client.
#[derive(Debug)]
pub struct Client {
    id: ClientId,
    addr: SocketAddr,
    sender: ClientSender,
    connected_at: Instant,
    pub(crate) nickname: Option<String>,
    pub(crate) username: String,
    pub(crate) realname: String,
    pub(crate) hostname: String,
    pub(crate) identified: bool,
    /// Names of joined rooms. Back-references only; the registry owns rooms.
    pub(crate) rooms: HashSet<String>,
}

impl Client {
    pub(crate) fn new(id: ClientId, addr: SocketAddr, sender: ClientSender) -> Self {
        Self {
            id,
            addr,
            sender,
            connected_at: Instant::now(),
            nickname: None,
            username: String::new(),
            realname: String::new(),
            // Until USER supplies one, the peer address stands in.
            hostname: addr.ip().to_string(),
            identified: false,
            rooms: HashSet::new(),
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn connected_at(&self) -> Instant {
        self.connected_at
    }

    /// Current nickname, if one has been bound.
    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    /// Nickname for addressing replies; `*` while unregistered.
    pub fn nick_or_star(&self) -> &str {
        self.nickname.as_deref().unwrap_or("*")
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn realname(&self) -> &str {
        &self.realname
    }

    /// True once a nickname has been bound.
    pub fn is_registered(&self) -> bool {
        self.nickname.is_some()
    }

    /// True once `USER` has been accepted.
    pub fn is_identified(&self) -> bool {
        self.identified
    }

    pub fn rooms(&self) -> impl Iterator<Item = &str> {
        self.rooms.iter().map(String::as_str)
    }

    pub fn in_room(&self, room: &str) -> bool {
        self.rooms.contains(room)
    }

    /// Full `nick!user@host` origin for lines this client causes.
    pub fn prefix(&self) -> Prefix {
        Prefix::user(
            self.nickname.as_deref().unwrap_or(""),
            self.username.as_str(),
            self.hostname.as_str(),
        )
    }

    /// Queue a line for this client's writer without waiting.
    ///
    /// Returns false if the line was dropped: the queue is full (slow
    /// reader) or the connection is already gone.
    pub fn send(&self, msg: Arc<Message>) -> bool {
        match self.sender.try_send(msg) {
            Ok(()) => true,
            Err(TrySendError::Full(msg)) => {
                warn!(client = %self.id, nick = %self.nick_or_star(), line = %msg, "Outgoing queue full - dropping line");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> (Client, mpsc::Receiver<Arc<Message>>) {
        let (tx, rx) = mpsc::channel(1);
        let addr: SocketAddr = "192.0.2.7:50000".parse().unwrap();
        (Client::new(ClientId(1), addr, tx), rx)
    }

    #[test]
    fn identity_with_single_word_realname() {
        let id = Identity::from_params(&["al", "0", "host.example", ":Alice"]).unwrap();
        assert_eq!(id.username, "al");
        assert_eq!(id.hostname, "host.example");
        assert_eq!(id.realname, "Alice");
    }

    #[test]
    fn identity_with_spaced_realname() {
        let id = Identity::from_params(&["al", "0", "h", ":Alice", "Liddell"]).unwrap();
        assert_eq!(id.realname, "Alice Liddell");
    }

    #[test]
    fn identity_rejects_wrong_arity() {
        assert_eq!(
            Identity::from_params(&["al", "0", "h"]),
            Err(RegistryError::InvalidArity)
        );
        assert_eq!(
            Identity::from_params(&["al", "0", "h", "Alice", "Liddell"]),
            Err(RegistryError::InvalidArity)
        );
    }

    #[test]
    fn new_client_defaults_host_to_peer_ip() {
        let (client, _rx) = client();
        assert_eq!(client.hostname(), "192.0.2.7");
        assert_eq!(client.nick_or_star(), "*");
        assert!(!client.is_registered());
    }

    #[test]
    fn send_drops_when_queue_full() {
        let (client, mut rx) = client();
        assert!(client.send(Arc::new(Message::new("PING"))));
        assert!(!client.send(Arc::new(Message::new("PING"))));
        assert_eq!(rx.try_recv().unwrap().to_string(), "PING");
    }

    #[test]
    fn send_after_disconnect_is_dropped() {
        let (client, rx) = client();
        drop(rx);
        assert!(!client.send(Arc::new(Message::new("PING"))));
    }
}
