//! State management module.
//!
//! Contains the [`Registry`] (authoritative client and room store) and the
//! entities it owns.

mod client;
mod registry;
mod room;

pub use client::{Client, ClientId, ClientSender, Identity};
pub use registry::{Departure, NickChange, Registry};
pub use room::Room;
