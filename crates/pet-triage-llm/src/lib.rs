//! Generative triage pipeline.
//!
//! This crate wraps a text-generation model behind [`GenerativeAdapter`],
//! enforces the triage output contract on whatever the model returns, and
//! falls back to the rule tables in `pet-triage-core` when the model is
//! missing or unusable.

pub mod adapter;
pub mod backends;
pub mod config;
pub mod contract;
pub mod decoding;
pub mod orchestrator;
pub mod prompts;

pub use adapter::{GenerationError, GenerativeAdapter, GeneratorLoader, ModelStatus, TextGenerator};
pub use config::{Backend, TriageConfig, MAX_PARSE_RETRIES};
pub use contract::{parse_contract, ContractError};
pub use decoding::DecodingParams;
pub use orchestrator::{TriageError, TriageOrchestrator};
pub use prompts::*;
