use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, info, warn};
use tokio::net::TcpListener;

use crate::config::Config;
use crate::session::Session;

/// Binds the control listener and serves clients until the process is
/// terminated. Each accepted connection is handed to its own task, so a
/// slow or stalled peer only ties up its own session; the listener
/// itself survives every per-session failure.
pub async fn run(port: u16, config: Config) -> Result<()> {
    let addr = format!("{}:{}", config.server.bind_address, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to listen on {}", addr))?;
    info!(
        "listening for control connections on {}, serving {}",
        addr, config.server.root_dir
    );

    let config = Arc::new(config);
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("accept failed: {}", e);
                continue;
            }
        };
        info!("control connection from {}", peer);

        let config = Arc::clone(&config);
        tokio::spawn(async move {
            let session = Session::new(socket, peer, &config.server);
            // Session failures are already logged with the peer address;
            // nothing flows back to the accept loop but termination.
            if let Err(e) = session.handle().await {
                warn!("session task for {} ended with error: {}", peer, e);
            }
        });
    }
}
