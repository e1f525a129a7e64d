mod api;
mod middleware;

use std::sync::Arc;

use baze_airtable::AirtableClient;
use baze_review::ReviewSettings;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = baze_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let airtable = AirtableClient::with_base_url(
        &config.airtable_api_key,
        &config.airtable_base_id,
        config.airtable_request_timeout_secs,
        &config.airtable_user_agent,
        &config.airtable_base_url,
    )?;
    let settings = ReviewSettings::from_app_config(&config);

    let auth = AuthState::from_keys(
        &config.api_keys,
        matches!(config.env, baze_core::Environment::Development),
    )?;
    let app = build_app(
        AppState {
            airtable: Arc::new(airtable),
            settings: Arc::new(settings),
        },
        auth,
        default_rate_limit_state(),
    );

    tracing::info!(bind_addr = %config.bind_addr, env = %config.env, "starting baze-server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
