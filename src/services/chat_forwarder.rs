// src/services/chat_forwarder.rs
use std::sync::Arc;

use crate::error::AppError;
use crate::services::fallback::fallback_reply;
use crate::services::gemini::{GenerationConfig, GenerationService};

const PERSONA: &str = "You are a helpful travel assistant for Indore, India. Provide friendly, informative, and detailed responses about Indore's tourist attractions, food, hotels, transport, events, and general travel information. Be conversational and provide comprehensive information. Include specific details, recommendations, tips, and helpful context. Always complete your thoughts and provide full, complete answers. Aim for responses between 200-400 words to be thorough and helpful. Make sure to finish your response completely without cutting off mid-sentence.";

pub fn build_prompt(message: &str) -> String {
    format!("{PERSONA}\n\nUser: {message}\n\nAssistant:")
}

/// Result of a chat turn. Both variants are reported to the caller as success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Generated(String),
    Fallback(String),
}

impl ChatOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ChatOutcome::Fallback(_))
    }

    pub fn text(&self) -> &str {
        match self {
            ChatOutcome::Generated(t) | ChatOutcome::Fallback(t) => t,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ChatOutcome::Generated(t) | ChatOutcome::Fallback(t) => t,
        }
    }
}

#[derive(Clone)]
pub struct ChatForwarder {
    generator: Arc<dyn GenerationService>,
    config: GenerationConfig,
}

impl ChatForwarder {
    pub fn new(generator: Arc<dyn GenerationService>) -> Self {
        Self {
            generator,
            config: GenerationConfig::default(),
        }
    }

    /// Validates the message, asks the generation service, and degrades to the
    /// fallback catalog when the call fails. Only an empty message is an error.
    pub async fn handle_chat(&self, message: &str) -> Result<ChatOutcome, AppError> {
        if message.is_empty() {
            return Err(AppError::MissingMessage);
        }

        let prompt = build_prompt(message);
        match self.generator.generate(&prompt, &self.config).await {
            Ok(text) => {
                tracing::info!(chars = text.len(), "generation succeeded");
                Ok(ChatOutcome::Generated(text.trim().to_string()))
            }
            Err(err) => {
                tracing::warn!(error = %err, "generation failed, using fallback response");
                Ok(ChatOutcome::Fallback(fallback_reply(message)))
            }
        }
    }
}
