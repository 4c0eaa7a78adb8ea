// src/routes/chat.rs
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    state::SharedState,
};

pub async fn ask_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let request_id = Uuid::new_v4();

    async move {
        // A body that cannot be read is a handler fault, not a missing message.
        let Json(payload) =
            payload.map_err(|rejection| AppError::HandlerFault(rejection.body_text()))?;

        let message = payload.message.unwrap_or_default();
        let outcome = state.forwarder.handle_chat(&message).await?;
        tracing::debug!(fallback = outcome.is_fallback(), "chat answered");

        Ok::<_, AppError>(Json(ChatResponse::ok(outcome.into_text())))
    }
    .instrument(tracing::info_span!("chat_ask", %request_id))
    .await
}
