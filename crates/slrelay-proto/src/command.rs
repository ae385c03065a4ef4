//! Inbound command tokenizer.
//!
//! Lines are split on single spaces; there is no quoting or escaping.
//! The first token is the command name (matched case-insensitively), the
//! rest are positional parameters. Free text that must contain spaces is
//! recovered with [`Command::trailing`], which rejoins the remaining tokens
//! and drops a leading `:` marker.

use std::fmt;

/// Marker character that introduces a room name on the wire.
pub const ROOM_MARKER: char = '#';

/// Commands understood by the relay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `NICK <name>`
    Nick,
    /// `USER <username> <unused> <hostname> :<realname>`
    User,
    /// `JOIN <#room>`
    Join,
    /// `PART <#room>`
    Part,
    /// `WHO <#room>`
    Who,
    /// `PRIVMSG <target> :<text>`
    Privmsg,
    /// `PING <token>`
    Ping,
    /// `PONG <token>`
    Pong,
    /// `QUIT`
    Quit,
}

impl CommandKind {
    /// Look up an upper-cased command token.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "NICK" => Self::Nick,
            "USER" => Self::User,
            "JOIN" => Self::Join,
            "PART" => Self::Part,
            "WHO" => Self::Who,
            "PRIVMSG" => Self::Privmsg,
            "PING" => Self::Ping,
            "PONG" => Self::Pong,
            "QUIT" => Self::Quit,
            _ => return None,
        })
    }

    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nick => "NICK",
            Self::User => "USER",
            Self::Join => "JOIN",
            Self::Part => "PART",
            Self::Who => "WHO",
            Self::Privmsg => "PRIVMSG",
            Self::Ping => "PING",
            Self::Pong => "PONG",
            Self::Quit => "QUIT",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tokenized inbound line. Parameters borrow from the source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command<'a> {
    /// Upper-cased command token.
    pub name: String,
    /// Recognized command, `None` for anything else.
    pub kind: Option<CommandKind>,
    /// Positional parameters in order.
    pub params: Vec<&'a str>,
}

impl<'a> Command<'a> {
    /// Tokenize a line that has already been stripped of its terminator.
    ///
    /// Returns `None` only for an empty line. Never fails otherwise: a line
    /// with missing parameters still parses, and the handler decides.
    pub fn parse(line: &'a str) -> Option<Self> {
        if line.is_empty() {
            return None;
        }

        let mut tokens = line.split(' ');
        let name = tokens.next()?.to_ascii_uppercase();
        let kind = CommandKind::from_name(&name);

        Some(Self {
            name,
            kind,
            params: tokens.collect(),
        })
    }

    /// Number of positional parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Parameter at `index`, if present.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.params.get(index).copied()
    }

    /// All parameters from `from` onward rejoined with single spaces, with
    /// one leading `:` removed. `None` if there is no parameter at `from`.
    pub fn trailing(&self, from: usize) -> Option<String> {
        let rest = self.params.get(from..).filter(|rest| !rest.is_empty())?;
        let joined = rest.join(" ");
        Some(match joined.strip_prefix(':') {
            Some(text) => text.to_string(),
            None => joined,
        })
    }
}

/// Remove one leading [`ROOM_MARKER`] from a room reference.
pub fn strip_room_marker(name: &str) -> &str {
    name.strip_prefix(ROOM_MARKER).unwrap_or(name)
}
