//! Server lifecycle shell for host applications.

pub mod listener;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::bail;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::Config;
use crate::notify::SharedCallback;

/// Owns the accept loop and exposes the start/stop contract embedding
/// applications bind to.
///
/// `start()` binds the socket and spawns the loop; `stop()` stops accepting,
/// gives in-flight handlers the configured grace period, and aborts the
/// rest. Stopping an already stopped server is a no-op.
pub struct Server {
    config: Arc<Config>,
    callback: Option<SharedCallback>,
    shutdown: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<anyhow::Result<()>>>,
    local_addr: Option<SocketAddr>,
}

impl Server {
    /// Create a server from validated configuration and an optional text
    /// request callback.
    pub fn new(config: Config, callback: Option<SharedCallback>) -> anyhow::Result<Self> {
        config.validate()?;
        info!(
            agent = %config.server_agent,
            port = config.port,
            workers = config.worker_count,
            "server created"
        );
        Ok(Self {
            config: Arc::new(config),
            callback,
            shutdown: None,
            handle: None,
            local_addr: None,
        })
    }

    /// Bind the listener and spawn the accept loop.
    pub async fn start(&mut self) -> anyhow::Result<()> {
        if self.handle.is_some() {
            bail!("server is already started");
        }

        let listener = listener::bind(&self.config).await?;
        self.local_addr = Some(listener.local_addr()?);

        let (tx, rx) = watch::channel(false);
        self.shutdown = Some(tx);
        self.handle = Some(tokio::spawn(listener::run(
            listener,
            Arc::clone(&self.config),
            self.callback.clone(),
            rx,
        )));
        Ok(())
    }

    /// Stop accepting and drain in-flight handlers.
    pub async fn stop(&mut self) {
        let Some(shutdown) = self.shutdown.take() else {
            return;
        };
        let _ = shutdown.send(true);

        if let Some(handle) = self.handle.take() {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => error!(error = %err, "listener exited with error"),
                Err(err) => error!(error = %err, "listener task failed"),
            }
        }
        self.local_addr = None;
        info!("server stopped");
    }

    /// Address the listener is bound to, while running. Useful with port 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}
