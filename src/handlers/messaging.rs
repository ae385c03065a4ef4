//! PRIVMSG command handler.
//!
//! ## Syntax
//! ```text
//! PRIVMSG <#room|nickname> :<text>
//! ```
//!
//! ## Behavior
//! - Room targets reach every member except the sender; the sender must be
//!   a member
//! - Nickname targets reach only that client
//! - Unknown targets are dropped without feedback

use super::{Context, Handler, broadcast, room_param, user_line};
use crate::error::{HandlerError, HandlerResult};
use slrelay_proto::{Command, ROOM_MARKER};
use tracing::debug;

pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        if cmd.arity() < 2 {
            return Err(HandlerError::NeedMoreParams);
        }
        let target = cmd.params[0];
        let text = cmd.trailing(1).unwrap_or_default();
        let me = ctx.me()?;

        if let Some(name) = target.strip_prefix(ROOM_MARKER) {
            let Some(room) = ctx.registry.find_room(name) else {
                debug!(client = %ctx.client, room = %name, "PRIVMSG to unknown room dropped");
                return Ok(());
            };
            if !room.contains(ctx.client) {
                return Err(HandlerError::NotOnRoom(name.to_string()));
            }

            let msg = user_line(me, "PRIVMSG")
                .with_param(room_param(name))
                .with_trailing(text);
            let delivered = broadcast(ctx.registry, room.members(), msg, Some(ctx.client));
            debug!(client = %ctx.client, room = %name, delivered, "Room message");
            return Ok(());
        }

        match ctx.registry.find_client(target) {
            Some(peer) => {
                let msg = user_line(me, "PRIVMSG").with_param(target).with_trailing(text);
                peer.send(std::sync::Arc::new(msg));
            }
            None => debug!(client = %ctx.client, target = %target, "PRIVMSG to unknown nick dropped"),
        }
        Ok(())
    }
}
