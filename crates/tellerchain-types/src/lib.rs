//! Shared domain types for Tellerchain.
//!
//! This crate contains the core domain types used across the service:
//! session state, stage outputs, the category set, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod category;
pub mod chain;
pub mod error;
pub mod session;
