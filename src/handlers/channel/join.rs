//! JOIN command handler.
//!
//! ## Syntax
//! ```text
//! JOIN <#room>
//! ```
//!
//! ## Behavior
//! - Creates the room on first use
//! - Announces the join to every member, joiner included
//! - Sends the member list (353) and its end marker (366) to the joiner
//! - Joining a room twice keeps one membership but announces again

use super::super::{Context, Handler, broadcast, room_param, user_line};
use crate::error::{HandlerError, HandlerResult};
use crate::state::ClientId;
use slrelay_proto::{Command, Response};
use tracing::info;

pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        let target = cmd.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        let (room, members) = {
            let room = ctx.registry.join_room(ctx.client, target)?;
            (room.name().to_string(), room.members().to_vec())
        };

        let me = ctx.me()?;
        info!(client = %ctx.client, nick = %me.nick_or_star(), room = %room, members = members.len(), "Joined room");

        let announce = user_line(me, "JOIN").with_param(room_param(&room));
        broadcast(ctx.registry, &members, announce, None);

        send_names(ctx, &room, &members);
        Ok(())
    }
}

/// Send the room's member list to the originator. The first listed member
/// carries the `@` marker.
fn send_names(ctx: &Context<'_>, room: &str, members: &[ClientId]) {
    let names = members
        .iter()
        .filter_map(|id| ctx.registry.client(*id))
        .enumerate()
        .map(|(i, member)| {
            let marker = if i == 0 { "@" } else { "" };
            format!("{marker}{}", member.nick_or_star())
        })
        .collect::<Vec<_>>()
        .join(" ");

    let namreply = ctx
        .server_reply(Response::RPL_NAMREPLY)
        .with_param("=")
        .with_param(room_param(room))
        .with_trailing(names);
    ctx.reply(namreply);

    let end = ctx
        .server_reply(Response::RPL_ENDOFNAMES)
        .with_param(room_param(room))
        .with_trailing("End of NAMES list");
    ctx.reply(end);
}
