//! Welcome sequence sent on the first successful nickname bind.

use super::super::{Context, server_reply};
use crate::error::HandlerResult;
use slrelay_proto::{Message, Response};
use std::sync::Arc;

/// Mode letters advertised in RPL_MYINFO.
const USER_MODES: &str = "aio";
const ROOM_MODES: &str = "beIikntPpTl";

/// Send 001-004 and the missing-MOTD notice to the originator.
pub fn send_welcome(ctx: &Context<'_>) -> HandlerResult {
    let client = ctx.me()?;
    let server = ctx.server;
    let nick = client.nick_or_star();
    let reply = |response| server_reply(&server.name, response, nick);

    let burst: [Message; 5] = [
        reply(Response::RPL_WELCOME).with_trailing(format!(
            "Welcome to the {} Network {}",
            server.network,
            client.prefix()
        )),
        reply(Response::RPL_YOURHOST).with_trailing(format!(
            "Your host is {}, running version {}",
            server.name, server.version
        )),
        reply(Response::RPL_CREATED)
            .with_trailing(format!("This server was created {}", server.created)),
        reply(Response::RPL_MYINFO)
            .with_param(server.name.as_str())
            .with_param(server.version.as_str())
            .with_param(USER_MODES)
            .with_param(ROOM_MODES),
        reply(Response::ERR_NOMOTD).with_trailing("MOTD file is missing"),
    ];

    for msg in burst {
        client.send(Arc::new(msg));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::Harness;

    #[test]
    fn user_then_nick_sends_five_lines_naming_nick() {
        let mut h = Harness::new();
        let a = h.connect();
        h.send(a, "USER al 0 wonder.land :Alice");
        h.send(a, "NICK alice");

        let lines = h.drain(a);
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            ":irc.test 001 alice :Welcome to the slrelay Network alice!al@wonder.land"
        );
        assert!(lines[1].starts_with(":irc.test 002 alice :Your host is irc.test, running version "));
        assert!(lines[2].starts_with(":irc.test 003 alice :This server was created "));
        assert!(lines[3].starts_with(":irc.test 004 alice irc.test "));
        assert_eq!(lines[4], ":irc.test 422 alice :MOTD file is missing");
    }

    #[test]
    fn nick_before_user_still_welcomes_with_peer_host() {
        let mut h = Harness::new();
        let a = h.connect();
        h.send(a, "NICK alice");
        let lines = h.drain(a);
        assert_eq!(lines.len(), 5);
        assert!(lines[0].ends_with("alice!@127.0.0.1"));
    }

    #[test]
    fn welcome_is_sent_once() {
        let mut h = Harness::new();
        let a = h.login("alice");
        h.send(a, "NICK alice");
        h.send(a, "NICK alicia");
        assert!(h.drain(a).is_empty());
    }
}
