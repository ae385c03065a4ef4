//! Network module.
//!
//! Contains the Gateway (TCP listener), per-client Connection tasks, and the
//! Dispatcher actor that owns all session state.

mod connection;
mod dispatcher;
mod gateway;

pub use connection::Connection;
pub use dispatcher::{DispatchEvent, Dispatcher, DispatcherHandle};
pub use gateway::Gateway;
