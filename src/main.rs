//! slrelayd - slrelay chat relay daemon.
//!
//! Usage: `slrelayd <port> [config.toml]`

use anyhow::Context as _;
use slrelay::config::Config;
use slrelay::network::{Dispatcher, Gateway};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let mut args = std::env::args().skip(1);
    let port: u16 = args
        .next()
        .context("usage: slrelayd <port> [config.toml]")?
        .parse()
        .context("port must be a number between 0 and 65535")
        .inspect_err(|e| error!(error = %e, "Invalid port"))?;

    // Load configuration
    let config = match args.next() {
        Some(path) => Config::load(&path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load config");
            e
        })?,
        None => Config::default(),
    };

    info!(
        server = %config.server.name,
        network = %config.server.network,
        version = %config.server.version,
        "Starting slrelayd"
    );

    let (dispatcher, handle) = Dispatcher::new(&config);
    let dispatcher_task = dispatcher.spawn();

    let gateway = Gateway::bind(
        config.listen.socket_addr(port),
        handle,
        config.limits.clone(),
    )
    .await?;

    tokio::select! {
        result = gateway.run() => {
            if let Err(e) = result {
                error!(error = %e, "Gateway error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    // Open connections keep the dispatcher alive; stop it directly.
    dispatcher_task.abort();
    info!("Server shutdown complete");
    Ok(())
}
