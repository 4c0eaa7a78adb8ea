// src/main.rs
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use travel_assistant_backend::{
    config::AppConfig, routes, services::gemini::GeminiClient, state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,travel_assistant_backend=debug".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    if !config.gemini.has_api_key() {
        tracing::warn!("GEMINI_API_KEY is not set; generation calls will fail and fall back");
    }

    let client = GeminiClient::new(config.gemini.clone()).context("building HTTP client")?;
    let state = Arc::new(AppState::new(Arc::new(client)));

    let app = routes::create_router().with_state(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;

    tracing::info!(model = %config.gemini.model, "travel assistant running at http://{}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
