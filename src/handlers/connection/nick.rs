//! NICK command handler.
//!
//! ## Syntax
//! ```text
//! NICK <nickname>
//! ```
//!
//! ## Behavior
//! - Nicknames are unique and compared case-sensitively
//! - One leading `:` is accepted and dropped (`NICK :alice`)
//! - The first successful bind sends the welcome sequence
//! - Renaming to a free nickname is silent

use super::super::{Context, Handler, send_welcome};
use crate::error::{HandlerError, HandlerResult};
use crate::state::NickChange;
use slrelay_proto::Command;
use tracing::info;

pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        if cmd.arity() != 1 {
            return Err(HandlerError::NeedMoreParams);
        }
        let nick = cmd.params[0].strip_prefix(':').unwrap_or(cmd.params[0]);

        match ctx.registry.set_nickname(ctx.client, nick)? {
            NickChange::First => {
                info!(client = %ctx.client, nick = %nick, "Client registered nickname");
                send_welcome(ctx)
            }
            NickChange::Renamed { old } => {
                info!(client = %ctx.client, old = %old, new = %nick, "Nickname changed");
                Ok(())
            }
            NickChange::Unchanged => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::Harness;

    #[test]
    fn conflict_replies_433_to_loser_only() {
        let mut h = Harness::new();
        let a = h.connect();
        let b = h.connect();

        h.send(a, "NICK bob");
        h.send(b, "NICK bob");

        assert_eq!(h.drain(a).len(), 5);
        assert_eq!(
            h.drain(b),
            vec![":irc.test 433 * bob :Nickname is already in use"]
        );
        assert!(!h.registry.client(b).unwrap().is_registered());
    }

    #[test]
    fn conflict_after_registration_names_current_nick() {
        let mut h = Harness::new();
        let _bob = h.login("bob");
        let a = h.login("alice");
        h.send(a, "NICK bob");
        assert_eq!(
            h.drain(a),
            vec![":irc.test 433 alice bob :Nickname is already in use"]
        );
    }

    #[test]
    fn rename_is_silent_and_frees_name() {
        let mut h = Harness::new();
        let a = h.login("alice");
        h.send(a, "NICK alicia");
        assert!(h.drain(a).is_empty());
        assert!(h.registry.find_client("alice").is_none());
        assert_eq!(h.registry.find_client("alicia").unwrap().id(), a);
    }

    #[test]
    fn wrong_arity_gets_461() {
        let mut h = Harness::new();
        let a = h.connect();
        h.send(a, "NICK bob extra");
        assert_eq!(
            h.drain(a),
            vec![":irc.test 461 * NICK :Not enough parameters"]
        );
    }

    #[test]
    fn trailing_form_nick_is_accepted() {
        let mut h = Harness::new();
        let a = h.connect();
        h.send(a, "NICK :bob");
        let lines = h.drain(a);
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with(":irc.test 001 bob "));
        assert_eq!(h.registry.find_client("bob").unwrap().id(), a);
    }

    #[test]
    fn doubled_colon_nick_is_erroneous() {
        let mut h = Harness::new();
        let a = h.connect();
        h.send(a, "NICK ::bob");
        assert_eq!(h.drain(a), vec![":irc.test 432 * :bob :Erroneous nickname"]);
    }

    #[test]
    fn room_marker_nick_is_erroneous() {
        let mut h = Harness::new();
        let a = h.connect();
        h.send(a, "NICK #lobby");
        assert_eq!(h.drain(a), vec![":irc.test 432 * #lobby :Erroneous nickname"]);
    }
}
