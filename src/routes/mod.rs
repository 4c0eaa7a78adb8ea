// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Json, Router,
    routing::{get, post},
};
use chat::ask_handler;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    let chat_routes = Router::new().route("/ask", post(ask_handler));

    Router::new()
        .nest("/api/chat", chat_routes)
        .route("/health", get(health_handler))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "Server is running" }))
}
