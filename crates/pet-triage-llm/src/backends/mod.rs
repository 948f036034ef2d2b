//! Generation backends.

#[cfg(feature = "llm")]
pub mod llama;
pub mod remote;
pub mod scripted;

use std::sync::Arc;

use crate::adapter::{GenerationError, GenerationResult, GeneratorLoader, TextGenerator};
use crate::config::{Backend, TriageConfig};

/// Pick the loader for the configured backend.
pub fn loader_from_config(config: &TriageConfig) -> Box<dyn GeneratorLoader> {
    match config.backend {
        Backend::Remote => Box::new(remote::RemoteLoader::new(
            &config.endpoint,
            &config.model_id,
            config.generation_timeout(),
        )),
        #[cfg(feature = "llm")]
        Backend::Llama => Box::new(llama::LlamaLoader::new(&config.model_id, config.force_cpu)),
        #[cfg(not(feature = "llm"))]
        Backend::Llama => Box::new(UnavailableLoader::new(
            &config.model_id,
            "built without the `llm` feature",
        )),
        Backend::Disabled => Box::new(UnavailableLoader::new(
            &config.model_id,
            "generative backend disabled by configuration",
        )),
    }
}

/// Loader that always fails with a fixed reason.
pub struct UnavailableLoader {
    model_id: String,
    reason: String,
}

impl UnavailableLoader {
    pub fn new(model_id: &str, reason: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl GeneratorLoader for UnavailableLoader {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn load(&self) -> GenerationResult<Arc<dyn TextGenerator>> {
        Err(GenerationError::ModelUnavailable(self.reason.clone()))
    }
}
