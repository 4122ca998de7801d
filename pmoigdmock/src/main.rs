use anyhow::Context;
use pmoigdmock::MockIgdServer;
use pmoigdmock::config::MockIgdConfig;
use pmoigdmock::logs::{LoggingOptions, init_logging};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(LoggingOptions::default());

    let config = MockIgdConfig::from_env().context("Failed to load mock IGD configuration")?;

    let mut server = MockIgdServer::new(config);
    server.start().await.context("Failed to start mock IGD")?;

    info!("⏳ Press Ctrl+C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    server.stop().await;
    info!("👋 Mock IGD stopped");
    Ok(())
}
