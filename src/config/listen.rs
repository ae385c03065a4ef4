//! Network listener configuration.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Network listener configuration.
///
/// Only the interface lives in the file; the port is always taken from the
/// command line.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Interface to bind to (default: 0.0.0.0).
    #[serde(default = "default_address")]
    pub address: IpAddr,
}

impl ListenConfig {
    /// Combine the configured interface with a port.
    pub fn socket_addr(&self, port: u16) -> SocketAddr {
        SocketAddr::new(self.address, port)
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

fn default_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}
