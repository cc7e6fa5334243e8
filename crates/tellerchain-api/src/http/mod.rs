//! HTTP/REST layer for Tellerchain.
//!
//! Axum-based API with permissive CORS and request tracing. Responses
//! use the flat wire shapes existing chat clients consume; there is no
//! envelope.

pub mod error;
pub mod handlers;
pub mod router;
