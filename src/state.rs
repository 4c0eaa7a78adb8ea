// src/state.rs
use std::sync::Arc;

use crate::services::chat_forwarder::ChatForwarder;
use crate::services::gemini::GenerationService;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub forwarder: ChatForwarder,
}

impl AppState {
    pub fn new(generator: Arc<dyn GenerationService>) -> Self {
        Self {
            forwarder: ChatForwarder::new(generator),
        }
    }
}
