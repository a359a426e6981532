use anyhow::Result;
use energy_dashboard::{
    config::AppConfig, metrics_server, observability, sinks::HttpUploadGateway,
    sources::HttpDashboardSource,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = Arc::new(AppConfig::load()?);

    // Start metrics server if configured
    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr)?;
    }

    let gateway = HttpUploadGateway::from_config(&cfg.backend)?;
    tracing::info!(
        upload_url = %cfg.backend.upload_url,
        timeout_secs = cfg.backend.timeout_secs,
        "backend upload gateway ready"
    );

    let bind_addr = cfg.server.bind_addr.clone();
    HttpDashboardSource::new(cfg, Arc::new(gateway))
        .serve(&bind_addr)
        .await
}
