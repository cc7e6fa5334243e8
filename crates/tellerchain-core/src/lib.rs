//! Core prompt-chain logic for Tellerchain.
//!
//! Everything here is transport-agnostic: the HTTP layer hands a session
//! id and a customer message to [`orchestrator::ChainOrchestrator`], which
//! drives the five completion stages against whatever
//! [`gateway::CompletionGateway`] implementation it was built with. No
//! HTTP or provider SDK types leak into this crate.

pub mod extract;
pub mod gateway;
pub mod orchestrator;
pub mod registry;
pub mod stage;
