//! HTTP text-generation backend.
//!
//! Talks to a generation server exposing `GET /health` and
//! `POST /generate`. The blocking client is only built inside `load`, which
//! the adapter always calls off the async runtime.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapter::{GenerationError, GenerationResult, GeneratorLoader, TextGenerator};
use crate::decoding::DecodingParams;

pub struct RemoteLoader {
    base_url: String,
    model_id: String,
    timeout: Duration,
}

impl RemoteLoader {
    pub fn new(base_url: &str, model_id: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model_id: model_id.to_string(),
            timeout,
        }
    }
}

impl GeneratorLoader for RemoteLoader {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn load(&self) -> GenerationResult<Arc<dyn TextGenerator>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GenerationError::ModelUnavailable(format!("HTTP client: {e}")))?;

        let url = format!("{}/health", self.base_url);
        let response = client.get(&url).send().map_err(|e| {
            if e.is_connect() {
                GenerationError::ModelUnavailable(format!(
                    "cannot reach generation server at {}",
                    self.base_url
                ))
            } else {
                GenerationError::ModelUnavailable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::ModelUnavailable(format!(
                "generation server health check returned {}",
                status.as_u16()
            )));
        }

        Ok(Arc::new(RemoteGenerator {
            base_url: self.base_url.clone(),
            model_id: self.model_id.clone(),
            client,
        }))
    }
}

pub struct RemoteGenerator {
    base_url: String,
    model_id: String,
    client: reqwest::blocking::Client,
}

/// Request body for `POST /generate`
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    parameters: serde_json::Value,
}

/// Servers answer with either a single object or a one-element list.
#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Single { generated_text: String },
    Batch(Vec<GeneratedText>),
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        match self {
            GenerateResponse::Single { generated_text } => Some(generated_text),
            GenerateResponse::Batch(items) => items.into_iter().next().map(|g| g.generated_text),
        }
    }
}

impl TextGenerator for RemoteGenerator {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn generate(&self, prompt: &str, params: &DecodingParams) -> GenerationResult<String> {
        let url = format!("{}/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model_id,
            prompt,
            parameters: params.to_generation_kwargs(),
        };
        debug!(url = %url, prompt_chars = prompt.len(), "Remote generation request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| GenerationError::Failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Failed(format!(
                "generation server returned {}: {body}",
                status.as_u16()
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| GenerationError::Failed(format!("unreadable response: {e}")))?;

        parsed
            .into_text()
            .ok_or_else(|| GenerationError::Failed("empty generation batch".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shapes() {
        let single: GenerateResponse =
            serde_json::from_str(r#"{"generated_text":"hello"}"#).unwrap();
        assert_eq!(single.into_text().as_deref(), Some("hello"));

        let batch: GenerateResponse =
            serde_json::from_str(r#"[{"generated_text":"first"},{"generated_text":"second"}]"#)
                .unwrap();
        assert_eq!(batch.into_text().as_deref(), Some("first"));

        let empty: GenerateResponse = serde_json::from_str("[]").unwrap();
        assert!(empty.into_text().is_none());
    }

    #[test]
    fn test_unreachable_server_is_unavailable() {
        // Port 9 (discard) is closed on test machines.
        let loader = RemoteLoader::new("http://127.0.0.1:9/", "m", Duration::from_secs(2));
        assert_eq!(loader.base_url, "http://127.0.0.1:9");
        assert!(matches!(
            loader.load(),
            Err(GenerationError::ModelUnavailable(_))
        ));
    }
}
