//! Observability utilities for Tellerchain.
//!
//! Tracing subscriber setup shared by the service binary, with an
//! optional OpenTelemetry stdout bridge for local span inspection.

pub mod tracing_setup;
