//! Reply construction and delivery.
//!
//! Every outbound line goes through [`send_to`] or [`broadcast`], which hand
//! one shared `Arc<Message>` to each recipient's queue without blocking.

use crate::state::{Client, ClientId, Registry};
use slrelay_proto::{Message, Response};
use std::sync::Arc;

// ============================================================================
// Common reply helpers
// ============================================================================

/// Helper to create a server reply message (numeric response) addressed to
/// `nick`.
pub fn server_reply(server_name: &str, response: Response, nick: &str) -> Message {
    Message::response(server_name, response).with_param(nick)
}

/// A line originating from `client`, e.g. `:nick!user@host JOIN`.
pub fn user_line(client: &Client, command: &str) -> Message {
    Message::new(command).with_prefix(client.prefix())
}

/// Wire form of a room name.
pub fn room_param(name: &str) -> String {
    format!("#{name}")
}

/// Placeholder for fields a client has not supplied yet.
pub(crate) fn or_star(value: &str) -> &str {
    if value.is_empty() { "*" } else { value }
}

// ============================================================================
// Delivery
// ============================================================================

/// Queue a line for one client. Unknown clients are ignored.
pub fn send_to(registry: &Registry, id: ClientId, msg: Message) -> bool {
    registry
        .client(id)
        .is_some_and(|client| client.send(Arc::new(msg)))
}

/// Queue one line for each recipient, skipping `except`.
///
/// Returns how many recipients accepted the line.
pub fn broadcast(
    registry: &Registry,
    recipients: &[ClientId],
    msg: Message,
    except: Option<ClientId>,
) -> usize {
    let msg = Arc::new(msg);
    recipients
        .iter()
        .filter(|id| Some(**id) != except)
        .filter_map(|id| registry.client(*id))
        .filter(|client| client.send(Arc::clone(&msg)))
        .count()
}
