use std::sync::Arc;

use courier::config::Config;
use courier::notify::SharedCallback;
use courier::server::Server;

fn log_text_request(request: &str) -> anyhow::Result<()> {
    tracing::info!(request, "text request received");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(if cfg.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let callback: SharedCallback = Arc::new(log_text_request);
    let mut server = Server::new(cfg, Some(callback))?;
    server.start().await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");
    server.stop().await;

    Ok(())
}
