//! Outbound message construction.
//!
//! A [`Message`] renders to one wire record without its terminator; the
//! codec appends `\r\n`. The trailing parameter is explicit so that a
//! single-word trailing value (e.g. `PART #lobby :alice`) still gets its
//! colon marker.

use std::fmt;

use crate::prefix::Prefix;
use crate::response::Response;

/// An outbound protocol line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Optional origin.
    pub prefix: Option<Prefix>,
    /// Command word or three-digit numeric.
    pub command: String,
    /// Middle parameters (must not contain spaces).
    pub params: Vec<String>,
    /// Final free-text parameter, rendered after ` :`.
    pub trailing: Option<String>,
}

impl Message {
    /// Start a message with the given command word.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            prefix: None,
            command: command.into(),
            params: Vec::new(),
            trailing: None,
        }
    }

    /// Start a numeric reply originating from `server_name`.
    pub fn response(server_name: &str, response: Response) -> Self {
        Self::new(response.to_string()).with_prefix(Prefix::server(server_name))
    }

    /// Set the prefix.
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Append a middle parameter.
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Set the trailing parameter.
    pub fn with_trailing(mut self, text: impl Into<String>) -> Self {
        self.trailing = Some(text.into());
        self
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        f.write_str(&self.command)?;
        for param in &self.params {
            write!(f, " {}", param)?;
        }
        if let Some(trailing) = &self.trailing {
            write!(f, " :{}", trailing)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_command() {
        assert_eq!(Message::new("PING").to_string(), "PING");
    }

    #[test]
    fn user_originated_line() {
        let msg = Message::new("PART")
            .with_prefix(Prefix::user("alice", "al", "host"))
            .with_param("#lobby")
            .with_trailing("alice");
        assert_eq!(msg.to_string(), ":alice!al@host PART #lobby :alice");
    }

    #[test]
    fn numeric_reply() {
        let msg = Message::response("irc.example.com", Response::ERR_NICKNAMEINUSE)
            .with_param("*")
            .with_param("bob")
            .with_trailing("Nickname is already in use");
        assert_eq!(
            msg.to_string(),
            ":irc.example.com 433 * bob :Nickname is already in use"
        );
    }

    #[test]
    fn empty_trailing_keeps_marker() {
        let msg = Message::new("PRIVMSG").with_param("bob").with_trailing("");
        assert_eq!(msg.to_string(), "PRIVMSG bob :");
    }
}
