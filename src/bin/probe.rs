//! Diagnostic probe for the generation service.
//!
//! Lists the models visible to `GEMINI_API_KEY`, then sends a short test prompt
//! through the same client the server uses. Reads the same environment as the
//! server (`GEMINI_API_KEY`, `GEMINI_BASE_URL`, `GEMINI_MODEL`, `GEMINI_TIMEOUT_SECS`).
//!
//! ```bash
//! cargo run --bin probe
//! ```

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use travel_assistant_backend::{
    config::AppConfig,
    error::fault_message,
    services::gemini::{GeminiClient, GenerationConfig, GenerationService},
};

const TEST_PROMPT: &str = "Hello, can you tell me about Rajwada Palace in Indore? Keep it brief.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let config = AppConfig::from_env()?;
    println!(
        "API key: {}",
        if config.gemini.has_api_key() { "present" } else { "missing" }
    );

    let client = GeminiClient::new(config.gemini).context("building HTTP client")?;

    match client.list_models().await {
        Ok(models) if models.is_empty() => {
            println!("No models found. The Gemini API may not be enabled for this key.");
        }
        Ok(models) => {
            println!("Available models:");
            for model in models {
                println!(
                    "- {} ({})",
                    model.name,
                    model.display_name.as_deref().unwrap_or("-")
                );
                let methods = if model.supported_generation_methods.is_empty() {
                    "None".to_string()
                } else {
                    model.supported_generation_methods.join(", ")
                };
                println!("  Methods: {methods}");
            }
        }
        Err(err) => {
            println!("Failed to list models: {err}");
            println!("{}", fault_message(&err.to_string()));
        }
    }

    let params = GenerationConfig {
        max_output_tokens: 1024,
        ..GenerationConfig::default()
    };
    println!("\nSending test prompt to {}...", client.model());
    match client.generate(TEST_PROMPT, &params).await {
        Ok(text) => {
            println!("Generation is working.");
            println!("Response: {}", text.trim());
        }
        Err(err) => {
            println!("Generation failed: {err}");
            println!("{}", fault_message(&err.to_string()));
        }
    }

    Ok(())
}
