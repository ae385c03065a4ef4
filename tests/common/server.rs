//! Test server management.
//!
//! Runs the dispatcher and gateway on the test's own runtime, bound to an
//! ephemeral loopback port.

use slrelay::config::Config;
use slrelay::network::{Dispatcher, Gateway};
use std::net::SocketAddr;
use tokio::task::JoinHandle;

/// A test server instance. Stops when dropped.
pub struct TestServer {
    addr: SocketAddr,
    gateway: JoinHandle<anyhow::Result<()>>,
    dispatcher: JoinHandle<()>,
}

impl TestServer {
    /// Spawn a server with default configuration and server name `irc.test`.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(Config::from_toml("[server]\nname = \"irc.test\"\n")?).await
    }

    /// Spawn a server with the given configuration. The listen port is
    /// always chosen by the OS.
    pub async fn spawn_with(config: Config) -> anyhow::Result<Self> {
        let (dispatcher, handle) = Dispatcher::new(&config);
        let dispatcher = dispatcher.spawn();

        let bind = SocketAddr::new("127.0.0.1".parse()?, 0);
        let gateway = Gateway::bind(bind, handle, config.limits.clone()).await?;
        let addr = gateway.local_addr()?;
        let gateway = tokio::spawn(gateway.run());

        Ok(Self {
            addr,
            gateway,
            dispatcher,
        })
    }

    /// Address clients should connect to.
    pub fn address(&self) -> String {
        self.addr.to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.gateway.abort();
        self.dispatcher.abort();
    }
}
