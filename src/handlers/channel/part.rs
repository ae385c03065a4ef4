//! PART command handler.
//!
//! ## Syntax
//! ```text
//! PART <#room>
//! ```
//!
//! ## Behavior
//! - Unknown rooms are ignored
//! - The departure is announced to every member before removal, the
//!   departing client included
//! - Parting a room one is not in gets 442

use super::super::{Context, Handler, broadcast, room_param, user_line};
use crate::error::{HandlerError, HandlerResult};
use slrelay_proto::Command;
use tracing::{debug, info};

pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        let target = cmd.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        let Some(departure) = ctx.registry.part_room(ctx.client, target)? else {
            debug!(client = %ctx.client, room = %target, "PART for unknown room ignored");
            return Ok(());
        };

        let me = ctx.me()?;
        info!(client = %ctx.client, nick = %me.nick_or_star(), room = %departure.room, "Left room");

        let notice = user_line(me, "PART")
            .with_param(room_param(&departure.room))
            .with_trailing(me.nick_or_star());
        broadcast(ctx.registry, &departure.recipients, notice, None);

        Ok(())
    }
}
