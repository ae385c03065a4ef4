//! slrelay - minimal line-based chat relay.
//!
//! Clients connect over TCP, claim a nickname, join `#rooms` and exchange
//! room-wide or direct messages using a small IRC-style command set.
//!
//! All session state lives in one [`state::Registry`] owned by the
//! [`network::Dispatcher`] task; connections talk to it only through
//! events, so every registry operation is atomic.

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;
