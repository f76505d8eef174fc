//! TrendBurst gateway - main entry point.

use anyhow::Result;
use trend_common::config::Config;
use trend_common::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load();

    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    tracing::info!("TrendBurst gateway v{}", env!("CARGO_PKG_VERSION"));

    trend_gateway::start_server(&config).await
}
