use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use medscan::api::{start_api_server, ApiContext};
use medscan::config::{self, Config};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let cfg = Config::from_env();
    let ctx = ApiContext::from_config(&cfg);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let mut server = match start_api_server(ctx, addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %server.session.server_addr, "listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("shutting down");
    server.shutdown();
}
