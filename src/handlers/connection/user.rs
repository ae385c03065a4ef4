//! USER command handler.

use super::super::{Context, Handler};
use crate::error::HandlerResult;
use crate::state::Identity;
use slrelay_proto::Command;
use tracing::debug;

/// `USER <username> <unused> <hostname> :<realname>`
///
/// Sets identity fields once and replies with nothing on success.
pub struct UserHandler;

impl Handler for UserHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        let identity = Identity::from_params(&cmd.params)?;
        debug!(client = %ctx.client, user = %identity.username, host = %identity.hostname, "Identity set");
        ctx.registry.set_identity(ctx.client, identity)?;
        Ok(())
    }
}
