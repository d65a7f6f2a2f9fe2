//! Accept loop with a bounded worker pool.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::{Semaphore, watch};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::notify::SharedCallback;

/// Bind the listening socket for the configured address and port.
pub async fn bind(config: &Config) -> anyhow::Result<TcpListener> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Run the accept loop until `shutdown` fires or accepting fails.
///
/// Each accepted connection takes one semaphore permit before its handler is
/// spawned, capping concurrent handlers at the configured worker count while
/// leaving the loop free to accept as soon as capacity frees up. On
/// shutdown, in-flight handlers get a bounded grace period before being
/// aborted.
pub async fn run(
    listener: TcpListener,
    config: Arc<Config>,
    callback: Option<SharedCallback>,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let permits = Arc::new(Semaphore::new(config.worker_count));
    let mut workers: JoinSet<()> = JoinSet::new();

    loop {
        // reap finished handlers so the set doesn't grow unbounded
        while workers.try_join_next().is_some() {}

        let permit = tokio::select! {
            permit = Arc::clone(&permits).acquire_owned() => {
                permit.context("worker pool closed")?
            }
            _ = shutdown.changed() => break,
        };

        let accepted = tokio::select! {
            accepted = listener.accept() => accepted,
            _ = shutdown.changed() => break,
        };

        match accepted {
            Ok((socket, peer)) => {
                debug!(%peer, "accepted connection");
                let config = Arc::clone(&config);
                let callback = callback.clone();
                workers.spawn(async move {
                    let connection = Connection::new(socket, config, callback);
                    if let Err(err) = connection.run().await {
                        error!(%peer, error = %err, "connection error");
                    }
                    drop(permit);
                });
            }
            Err(err) => {
                error!(error = %err, "accept failed, stopping listener");
                break;
            }
        }
    }

    drain(&mut workers, Duration::from_secs(config.shutdown_grace_secs)).await;
    Ok(())
}

/// Wait up to `grace` for in-flight handlers, then abort what remains.
async fn drain(workers: &mut JoinSet<()>, grace: Duration) {
    let finished = tokio::time::timeout(grace, async {
        while workers.join_next().await.is_some() {}
    })
    .await;

    if finished.is_err() {
        warn!(
            remaining = workers.len(),
            "shutdown grace period elapsed, aborting in-flight handlers"
        );
        workers.abort_all();
        while workers.join_next().await.is_some() {}
    }
}
