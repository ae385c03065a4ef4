//! Command handlers.
//!
//! Every inbound line is tokenized, bound to its originating client, and
//! routed to one handler by an exhaustive match on [`CommandKind`]. Handlers
//! run synchronously on the dispatcher task with exclusive access to the
//! [`Registry`], so each one observes and mutates state atomically.
//!
//! Errors returned by a handler are turned into a numeric reply for the
//! originator only; nothing a client sends can fail the process.

mod channel;
mod connection;
mod helpers;
mod messaging;
mod user_query;

pub use channel::{JoinHandler, PartHandler};
pub use connection::{NickHandler, PingHandler, PongHandler, UserHandler, send_welcome};
pub use helpers::{broadcast, room_param, send_to, server_reply, user_line};
pub use messaging::PrivmsgHandler;
pub use user_query::WhoHandler;

use crate::config::ServerConfig;
use crate::error::{HandlerError, HandlerResult};
use crate::state::{Client, ClientId, Registry};
use slrelay_proto::{Command, CommandKind, Message, Response};
use tracing::{debug, warn};

/// Static facts about this server, rendered into replies.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub network: String,
    pub version: String,
    /// Human-readable start time for RPL_CREATED.
    pub created: String,
}

impl ServerInfo {
    /// Capture server identity from config, stamping the creation time now.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            name: config.name.clone(),
            network: config.network.clone(),
            version: config.version.clone(),
            created: chrono::Utc::now()
                .format("%a %b %e %Y at %H:%M:%S UTC")
                .to_string(),
        }
    }
}

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The originating client.
    pub client: ClientId,
    /// Exclusive access to the registry for the duration of one command.
    pub registry: &'a mut Registry,
    /// Server identity for reply prefixes.
    pub server: &'a ServerInfo,
}

impl<'a> Context<'a> {
    pub fn new(client: ClientId, registry: &'a mut Registry, server: &'a ServerInfo) -> Self {
        Self {
            client,
            registry,
            server,
        }
    }

    /// The originating client's registry entry.
    pub fn me(&self) -> Result<&Client, HandlerError> {
        self.registry
            .client(self.client)
            .ok_or_else(|| HandlerError::Internal(format!("client {} vanished", self.client)))
    }

    /// Nickname for addressing replies; `*` while unregistered.
    pub fn nick(&self) -> &str {
        self.registry
            .client(self.client)
            .map_or("*", Client::nick_or_star)
    }

    /// Start a numeric reply addressed to the originator.
    pub fn server_reply(&self, response: Response) -> Message {
        server_reply(&self.server.name, response, self.nick())
    }

    /// Send a line to the originator.
    pub fn reply(&self, msg: Message) -> bool {
        send_to(self.registry, self.client, msg)
    }
}

/// A command handler.
pub trait Handler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult;
}

/// Parse one inbound line and run it on behalf of `ctx.client`.
pub fn dispatch(ctx: &mut Context<'_>, line: &str) {
    let Some(cmd) = Command::parse(line) else {
        return;
    };

    debug!(client = %ctx.client, command = %cmd.name, params = cmd.arity(), "Dispatching");

    if let Err(err) = route(ctx, &cmd) {
        if matches!(err, HandlerError::Internal(_)) {
            warn!(client = %ctx.client, command = %cmd.name, error = %err, "Handler failed");
        } else {
            debug!(
                client = %ctx.client,
                command = %cmd.name,
                code = err.error_code(),
                error = %err,
                "Command rejected"
            );
        }

        if let Some(reply) = err.to_irc_reply(&ctx.server.name, ctx.nick(), &cmd.name) {
            ctx.reply(reply);
        }
    }
}

fn route(ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
    // A bare command word is treated like an unknown command.
    let kind = match cmd.kind {
        Some(kind) if cmd.arity() > 0 => kind,
        _ => return Err(HandlerError::UnknownCommand(cmd.name.clone())),
    };

    match kind {
        CommandKind::Nick => NickHandler.handle(ctx, cmd),
        CommandKind::User => UserHandler.handle(ctx, cmd),
        CommandKind::Join => JoinHandler.handle(ctx, cmd),
        CommandKind::Part => PartHandler.handle(ctx, cmd),
        CommandKind::Who => WhoHandler.handle(ctx, cmd),
        CommandKind::Privmsg => PrivmsgHandler.handle(ctx, cmd),
        CommandKind::Ping => PingHandler.handle(ctx, cmd),
        CommandKind::Pong => PongHandler.handle(ctx, cmd),
        // The connection loop closes the link on QUIT; nothing to do here.
        CommandKind::Quit => Ok(()),
    }
}
