// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::{FailureResponse, ValidationErrorResponse};

const ACCESS_DENIED: &str = "API access denied. Please check if the API key is valid and has the necessary permissions. Make sure the Gemini API is enabled in your Google Cloud Console.";
const NOT_FOUND: &str = "The API endpoint was not found. Please verify the API configuration.";
const RATE_LIMITED: &str = "Too many requests. Please wait a moment and try again.";
const UNAVAILABLE: &str = "The service is temporarily unavailable. Please try again in a few moments.";
const TROUBLE_CONNECTING: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again in a moment.";

/// Errors surfaced by the chat handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Message is required")]
    MissingMessage,

    /// Anything that goes wrong outside the generation attempt. Carries the raw
    /// error text, which is logged but only ever shown through [`fault_message`].
    #[error("Handler fault: {0}")]
    HandlerFault(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingMessage => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse {
                    error: "Message is required".to_string(),
                }),
            )
                .into_response(),
            AppError::HandlerFault(raw) => {
                tracing::error!(error = %raw, "chat handler fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(FailureResponse::new(fault_message(&raw))),
                )
                    .into_response()
            }
        }
    }
}

/// Failures of a single call to the generation service.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Connection, TLS, or timeout failure.
    #[error("request to generation service failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("{message} (status {status})")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The service answered 2xx but the body was not the expected JSON.
    #[error("malformed response from generation service: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Maps raw error text to a user-facing message by substring.
pub fn fault_message(error_text: &str) -> &'static str {
    let contains_any = |needles: &[&str]| needles.iter().any(|n| error_text.contains(n));

    if contains_any(&["403", "Permission", "API_KEY_INVALID"]) {
        ACCESS_DENIED
    } else if contains_any(&["404"]) {
        NOT_FOUND
    } else if contains_any(&["429"]) {
        RATE_LIMITED
    } else if contains_any(&["500", "503"]) {
        UNAVAILABLE
    } else {
        TROUBLE_CONNECTING
    }
}
