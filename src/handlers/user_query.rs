//! WHO command handler.

use super::helpers::or_star;
use super::{Context, Handler, room_param};
use crate::error::{HandlerError, HandlerResult};
use slrelay_proto::{Command, Response, strip_room_marker};

/// `WHO <#room>`: one 352 per member, then 315.
///
/// The first listed member is flagged `H@`, the rest `H`. An unknown room
/// yields only the end marker.
pub struct WhoHandler;

impl Handler for WhoHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        if cmd.arity() != 1 {
            return Err(HandlerError::NeedMoreParams);
        }
        let name = strip_room_marker(cmd.params[0]);

        if let Some(room) = ctx.registry.find_room(name) {
            for (i, member) in ctx.registry.members(room).enumerate() {
                let flag = if i == 0 { "H@" } else { "H" };
                let reply = ctx
                    .server_reply(Response::RPL_WHOREPLY)
                    .with_param(room_param(name))
                    .with_param(or_star(member.username()))
                    .with_param(member.hostname())
                    .with_param(ctx.server.name.as_str())
                    .with_param(member.nick_or_star())
                    .with_param(flag)
                    .with_trailing(format!("0 {}", member.realname()));
                ctx.reply(reply);
            }
        }

        let end = ctx
            .server_reply(Response::RPL_ENDOFWHO)
            .with_param(room_param(name))
            .with_trailing("End of WHO list");
        ctx.reply(end);

        Ok(())
    }
}
