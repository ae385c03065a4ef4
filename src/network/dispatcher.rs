//! Dispatcher - the single task that owns the session registry.
//!
//! Connections never touch shared state directly. They submit
//! [`DispatchEvent`]s over one bounded channel, and the dispatcher applies
//! them in arrival order, one at a time. That ordering is what makes every
//! registry operation atomic without a lock.
//!
//! ```text
//!  Connection ─┐
//!  Connection ─┼─▶ mpsc (bounded) ─▶ Dispatcher ─▶ handlers ─▶ per-client queues
//!  Connection ─┘                     (owns Registry)
//! ```

use crate::config::Config;
use crate::error::HandlerError;
use crate::handlers::{Context, ServerInfo, dispatch, send_to};
use crate::state::{ClientId, ClientSender, Registry};
use slrelay_proto::Message;
use std::net::SocketAddr;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Work submitted to the dispatcher.
#[derive(Debug)]
pub enum DispatchEvent {
    /// A connection was accepted; the new id is returned on `reply`.
    Connect {
        addr: SocketAddr,
        sender: ClientSender,
        reply: oneshot::Sender<ClientId>,
    },
    /// One inbound line from a client.
    Line { client: ClientId, line: String },
    /// The client sent a line over the limit; it was discarded unread.
    Oversized { client: ClientId },
    /// The connection is gone. `farewell` is queued before the client is
    /// dropped, so it is the last line the writer sees.
    Disconnect {
        client: ClientId,
        farewell: Option<Message>,
    },
}

/// Cloneable submission side of the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherHandle {
    tx: mpsc::Sender<DispatchEvent>,
}

impl DispatcherHandle {
    /// Register a new connection and wait for its id.
    pub async fn connect(&self, addr: SocketAddr, sender: ClientSender) -> anyhow::Result<ClientId> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(DispatchEvent::Connect {
                addr,
                sender,
                reply,
            })
            .await
            .map_err(|_| anyhow::anyhow!("dispatcher stopped"))?;
        Ok(rx.await?)
    }

    /// Submit a line, waiting for queue space if the dispatcher is busy.
    pub async fn line(&self, client: ClientId, line: String) -> anyhow::Result<()> {
        self.tx
            .send(DispatchEvent::Line { client, line })
            .await
            .map_err(|_| anyhow::anyhow!("dispatcher stopped"))
    }

    /// Report a discarded oversized line so the client can be told.
    pub async fn oversized(&self, client: ClientId) -> anyhow::Result<()> {
        self.tx
            .send(DispatchEvent::Oversized { client })
            .await
            .map_err(|_| anyhow::anyhow!("dispatcher stopped"))
    }

    /// Report a closed connection. Never fails; a stopped dispatcher has
    /// nothing left to clean up.
    pub async fn disconnect(&self, client: ClientId, farewell: Option<Message>) {
        let _ = self
            .tx
            .send(DispatchEvent::Disconnect { client, farewell })
            .await;
    }
}

/// Owner of the [`Registry`].
pub struct Dispatcher {
    registry: Registry,
    server: ServerInfo,
    events: mpsc::Receiver<DispatchEvent>,
}

impl Dispatcher {
    /// Create a dispatcher and its submission handle.
    pub fn new(config: &Config) -> (Self, DispatcherHandle) {
        let (tx, events) = mpsc::channel(config.limits.dispatch_queue);
        let dispatcher = Self {
            registry: Registry::new(config.rooms.retention),
            server: ServerInfo::new(&config.server),
            events,
        };
        (dispatcher, DispatcherHandle { tx })
    }

    /// Run on its own task until every handle is dropped.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        info!(
            server = %self.server.name,
            retention = ?self.registry.retention(),
            "Dispatcher started"
        );
        while let Some(event) = self.events.recv().await {
            self.handle_event(event);
        }
        info!(clients = self.registry.client_count(), "Dispatcher stopped");
    }

    /// Apply one event to the registry.
    pub fn handle_event(&mut self, event: DispatchEvent) {
        match event {
            DispatchEvent::Connect {
                addr,
                sender,
                reply,
            } => {
                let client = self.registry.register_client(addr, sender);
                if reply.send(client).is_err() {
                    // Connection gave up before hearing back.
                    self.registry.remove_client(client);
                }
            }
            DispatchEvent::Line { client, line } => {
                if self.registry.client(client).is_none() {
                    debug!(%client, "Line from removed client ignored");
                    return;
                }
                let mut ctx = Context::new(client, &mut self.registry, &self.server);
                dispatch(&mut ctx, &line);
            }
            DispatchEvent::Oversized { client } => {
                let Some(nick) = self.registry.client(client).map(|c| c.nick_or_star().to_string())
                else {
                    return;
                };
                if let Some(reply) = HandlerError::InputTooLong.to_irc_reply(&self.server.name, &nick, "") {
                    send_to(&self.registry, client, reply);
                }
            }
            DispatchEvent::Disconnect { client, farewell } => {
                if let Some(msg) = farewell {
                    send_to(&self.registry, client, msg);
                }
                match self.registry.remove_client(client) {
                    Some(gone) => info!(
                        %client,
                        nick = %gone.nick_or_star(),
                        addr = %gone.addr(),
                        rooms = gone.rooms().count(),
                        connected_secs = gone.connected_at().elapsed().as_secs(),
                        "Client removed"
                    ),
                    None => warn!(%client, "Disconnect for unknown client"),
                }
            }
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
