//! PING and PONG handlers.

use super::super::{Context, Handler};
use crate::error::HandlerResult;
use slrelay_proto::{Command, Message};

/// Handler for PING command.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        // PING <token>
        let token = cmd.trailing(0).unwrap_or_default();

        let pong = Message::new("PONG")
            .with_param(ctx.server.name.as_str())
            .with_trailing(token);
        ctx.reply(pong);

        Ok(())
    }
}

/// Handler for PONG command.
pub struct PongHandler;

impl Handler for PongHandler {
    fn handle(&self, _ctx: &mut Context<'_>, _cmd: &Command<'_>) -> HandlerResult {
        Ok(())
    }
}
