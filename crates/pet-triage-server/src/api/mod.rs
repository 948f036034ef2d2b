//! HTTP API.

pub mod error;
pub mod handlers;
pub mod router;

use std::sync::Arc;

use pet_triage_llm::TriageOrchestrator;

pub use error::ApiError;
pub use router::build_router;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<TriageOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: TriageOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}
