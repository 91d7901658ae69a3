mod api;
mod middleware;

use std::sync::Arc;

use custmeta_admin::ShopifyAdminClient;
use custmeta_core::CorsPolicy;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = custmeta_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        env = %config.env,
        api_version = %config.shopify_api_version,
        "starting customer metafields proxy"
    );
    if config.cors_policy == CorsPolicy::AllowAll {
        tracing::warn!("CORS allows every origin; set CUSTMETA_CORS_ALLOWED_ORIGINS to restrict");
    }

    let client = ShopifyAdminClient::new(
        &config.shopify_access_token,
        &config.shopify_api_version,
        config.upstream_timeout_secs,
    )?;
    let state = AppState {
        directory: Arc::new(client),
    };
    let app = build_app(state, config.cors_policy.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
