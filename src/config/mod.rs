//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, RoomsConfig)
//! - [`listen`]: Network listener configuration (ListenConfig)
//! - [`limits`]: Line, queue and write limits (LimitsConfig)
//! - [`validation`]: Startup sanity checks

mod limits;
mod listen;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use types::{Config, ConfigError, RoomRetention, RoomsConfig, ServerConfig};
pub use validation::{ValidationError, validate};
