// src/services/mod.rs
pub mod chat_forwarder;
pub mod fallback;
pub mod gemini;
