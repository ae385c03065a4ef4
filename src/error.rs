//! Unified error handling for slrelay.
//!
//! Registry operations fail with [`RegistryError`]; handlers lift those into
//! [`HandlerError`], which knows how to render itself as a numeric reply for
//! the originating client. Nothing here is fatal to the process.

use crate::state::ClientId;
use slrelay_proto::{Message, Response};
use thiserror::Error;

// ============================================================================
// Registry Errors (state operations)
// ============================================================================

/// Failures of atomic registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown client {0}")]
    UnknownClient(ClientId),

    #[error("nickname in use: {0}")]
    NameConflict(String),

    #[error("erroneous nickname: {0:?}")]
    ErroneousNickname(String),

    #[error("identity needs three fields and a realname")]
    InvalidArity,

    #[error("identity already set")]
    AlreadyIdentified,

    #[error("not a member of {0}")]
    NotAMember(String),

    #[error("no such room: {0:?}")]
    NoSuchRoom(String),
}

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("wrong number of parameters")]
    NeedMoreParams,

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("erroneous nickname: {0:?}")]
    ErroneousNickname(String),

    #[error("already registered")]
    AlreadyRegistered,

    #[error("not on room: {0}")]
    NotOnRoom(String),

    #[error("no such room: {0:?}")]
    NoSuchRoom(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("input line too long")]
    InputTooLong,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RegistryError> for HandlerError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NameConflict(nick) => Self::NicknameInUse(nick),
            RegistryError::ErroneousNickname(nick) => Self::ErroneousNickname(nick),
            RegistryError::InvalidArity => Self::NeedMoreParams,
            RegistryError::AlreadyIdentified => Self::AlreadyRegistered,
            RegistryError::NotAMember(room) => Self::NotOnRoom(room),
            RegistryError::NoSuchRoom(room) => Self::NoSuchRoom(room),
            RegistryError::UnknownClient(id) => Self::Internal(format!("unknown client {id}")),
        }
    }
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::AlreadyRegistered => "already_registered",
            Self::NotOnRoom(_) => "not_on_room",
            Self::NoSuchRoom(_) => "no_such_room",
            Self::UnknownCommand(_) => "unknown_command",
            Self::InputTooLong => "input_too_long",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Convert to a numeric reply addressed to `nick`.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, cmd_name: &str) -> Option<Message> {
        let reply = |response| Message::response(server_name, response).with_param(nick);

        let msg = match self {
            Self::NeedMoreParams => reply(Response::ERR_NEEDMOREPARAMS)
                .with_param(cmd_name)
                .with_trailing("Not enough parameters"),
            Self::NicknameInUse(bad_nick) => reply(Response::ERR_NICKNAMEINUSE)
                .with_param(bad_nick.as_str())
                .with_trailing("Nickname is already in use"),
            Self::ErroneousNickname(bad_nick) => reply(Response::ERR_ERRONEUSNICKNAME)
                .with_param(if bad_nick.is_empty() { "*" } else { bad_nick.as_str() })
                .with_trailing("Erroneous nickname"),
            Self::AlreadyRegistered => {
                reply(Response::ERR_ALREADYREGISTRED).with_trailing("You may not reregister")
            }
            Self::NotOnRoom(room) => reply(Response::ERR_NOTONCHANNEL)
                .with_param(format!("#{room}"))
                .with_trailing("You're not on that channel"),
            Self::NoSuchRoom(room) => reply(Response::ERR_NOSUCHCHANNEL)
                .with_param(format!("#{room}"))
                .with_trailing("No such channel"),
            Self::UnknownCommand(cmd) => reply(Response::ERR_UNKNOWNCOMMAND)
                .with_param(cmd.as_str())
                .with_trailing("Unknown command"),
            Self::InputTooLong => {
                reply(Response::ERR_INPUTTOOLONG).with_trailing("Input line was too long")
            }

            Self::Internal(_) => return None,
        };

        Some(msg)
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;
