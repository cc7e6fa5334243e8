//! Google Gemini gateway implementation.
//!
//! This module provides the [`GeminiClient`] which implements the
//! [`CompletionGateway`](tellerchain_core::gateway::CompletionGateway)
//! trait for the Generative Language `generateContent` REST API.

pub mod client;
pub mod types;

pub use client::GeminiClient;
