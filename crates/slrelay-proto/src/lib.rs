//! # slrelay-proto
//!
//! Wire-level building blocks for the slrelay chat relay:
//!
//! - [`LineCodec`]: newline framing for tokio (`\n` or `\r\n` in, `\r\n` out),
//!   yielding [`Inbound`] records
//! - [`Command`]: tokenizer for inbound lines, with [`CommandKind`] lookup
//! - [`Message`], [`Prefix`], [`Response`]: outbound line construction
//!
//! ## Quick Start
//!
//! ```rust
//! use slrelay_proto::{Command, CommandKind, Message, Prefix, Response};
//!
//! let cmd = Command::parse("privmsg #lobby :hello there").unwrap();
//! assert_eq!(cmd.kind, Some(CommandKind::Privmsg));
//! assert_eq!(cmd.trailing(1).as_deref(), Some("hello there"));
//!
//! let reply = Message::response("irc.example.com", Response::RPL_ENDOFWHO)
//!     .with_param("alice")
//!     .with_param("#lobby")
//!     .with_trailing("End of WHO list");
//! assert_eq!(reply.to_string(), ":irc.example.com 315 alice #lobby :End of WHO list");
//!
//! let join = Message::new("JOIN")
//!     .with_prefix(Prefix::user("alice", "al", "host"))
//!     .with_param("#lobby");
//! assert_eq!(join.to_string(), ":alice!al@host JOIN #lobby");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod prefix;
pub mod response;

pub use self::command::{Command, CommandKind, ROOM_MARKER, strip_room_marker};
pub use self::error::{ProtocolError, Result};
#[cfg(feature = "tokio")]
pub use self::line::{Inbound, LineCodec};
pub use self::message::Message;
pub use self::prefix::Prefix;
pub use self::response::Response;
