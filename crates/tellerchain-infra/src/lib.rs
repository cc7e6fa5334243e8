//! Infrastructure layer for Tellerchain.
//!
//! Concrete implementations of the seams `tellerchain-core` defines:
//! the Gemini HTTP gateway and environment-driven service configuration.

pub mod config;
pub mod llm;
