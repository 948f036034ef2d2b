//! Triage orchestration.
//!
//! Drives one request through classification, generation, contract parsing
//! and normalization, substituting the rule tables when the model is absent
//! or keeps breaking the output contract.

use std::sync::Arc;

use pet_triage_core::{
    category_hint, classify_species, extract_signals, normalize, ProseAnswer, RuleEngine,
    SpeciesGroup, SymptomSignals, TriageContent, TriageMode, TriageRequest, TriageResponse,
    TriageResult, TriageSource, ValidationError,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::adapter::{GenerationError, GenerativeAdapter};
use crate::config::TriageConfig;
use crate::contract::{parse_contract, ContractError};
use crate::prompts::{build_prose_prompt, build_retry_prompt, build_structured_prompt};

/// Longest model output kept in the attempt log.
const MAX_LOGGED_OUTPUT: usize = 2000;

/// Errors the caller sees. Contract failures never appear here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TriageError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

impl From<GenerationError> for TriageError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::ModelUnavailable(reason) => TriageError::ModelUnavailable { reason },
            other => TriageError::GenerationFailed(other.detail()),
        }
    }
}

pub type TriageOutcome = Result<TriageResponse, TriageError>;

pub struct TriageOrchestrator {
    adapter: Arc<GenerativeAdapter>,
    engine: RuleEngine,
    config: TriageConfig,
}

impl TriageOrchestrator {
    pub fn new(adapter: Arc<GenerativeAdapter>, config: TriageConfig) -> Self {
        Self {
            adapter,
            engine: RuleEngine::new(),
            config,
        }
    }

    pub fn adapter(&self) -> &Arc<GenerativeAdapter> {
        &self.adapter
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Triage one request.
    ///
    /// Structured mode returns a bounded result whenever symptoms are present,
    /// unless the model is missing with fallback disabled or inference fails.
    /// llm_only mode never falls back.
    pub fn triage(&self, request: &TriageRequest) -> TriageOutcome {
        request.validate()?;

        let span = info_span!("triage", request_id = %Uuid::new_v4(), mode = ?request.mode);
        let _enter = span.enter();

        let group = classify_species(&request.species);
        let signals = extract_signals(&request.symptoms);
        info!(group = %group, signals = ?signals.active(), "Classified request");

        match request.mode {
            TriageMode::Structured => self.structured(request, group, &signals),
            TriageMode::LlmOnly => self.prose(request, group, &signals),
        }
    }

    fn structured(
        &self,
        request: &TriageRequest,
        group: SpeciesGroup,
        signals: &SymptomSignals,
    ) -> TriageOutcome {
        if let Err(err) = self.adapter.ensure_loaded() {
            if self.config.fallback_enabled {
                warn!(error = %err, "Model unavailable, using rule tables");
                return Ok(self.fallback(request, group, signals, None));
            }
            return Err(err.into());
        }

        let hint = category_hint(group, signals);
        let params = self.config.structured_decoding();
        let mut attempts: Vec<Value> = Vec::new();

        for attempt in 0..=self.config.effective_parse_retries() {
            let (prompt_kind, prompt) = if attempt == 0 {
                ("full", build_structured_prompt(request, &hint))
            } else {
                ("simplified", build_retry_prompt(request))
            };

            let output = match self.adapter.generate(&prompt, &params) {
                Ok(output) => output,
                Err(GenerationError::Timeout(after)) if self.config.fallback_enabled => {
                    warn!(attempt, timeout = ?after, "Generation timed out, using rule tables");
                    let raw = (!attempts.is_empty()).then(|| json!({ "attempts": attempts }));
                    return Ok(self.fallback(request, group, signals, raw));
                }
                Err(err) => {
                    error!(attempt, error = %err, "Generation failed");
                    return Err(err.into());
                }
            };

            match accept(&output) {
                Ok(content) => {
                    info!(
                        attempt,
                        conditions = content.conditions.len(),
                        "Model output accepted"
                    );
                    return Ok(TriageResponse::Structured(TriageResult::new(
                        content,
                        TriageSource::Llm,
                        self.adapter.model_id(),
                    )));
                }
                Err(err) => {
                    debug!(attempt, prompt = prompt_kind, error = %err, "Model output rejected");
                    attempts.push(json!({
                        "attempt": attempt + 1,
                        "prompt": prompt_kind,
                        "output": truncate_chars(&output, MAX_LOGGED_OUTPUT),
                        "error": err.to_string(),
                    }));
                }
            }
        }

        warn!(
            attempts = attempts.len(),
            "Model output unusable after retries, using rule tables"
        );
        let raw = json!({ "attempts": attempts });
        Ok(self.fallback(request, group, signals, Some(raw)))
    }

    fn prose(
        &self,
        request: &TriageRequest,
        group: SpeciesGroup,
        signals: &SymptomSignals,
    ) -> TriageOutcome {
        let prompt = build_prose_prompt(request, &category_hint(group, signals));
        let answer = self
            .adapter
            .generate(&prompt, &self.config.prose_decoding())
            .map_err(|err| {
                error!(error = %err, "Prose generation failed");
                TriageError::from(err)
            })?;

        info!(chars = answer.len(), "Returning model prose");
        Ok(TriageResponse::Prose(ProseAnswer::new(
            answer.trim(),
            self.adapter.model_id(),
        )))
    }

    fn fallback(
        &self,
        request: &TriageRequest,
        group: SpeciesGroup,
        signals: &SymptomSignals,
        raw: Option<Value>,
    ) -> TriageResponse {
        let content = self.engine.evaluate(group, signals, request.age);
        info!(
            conditions = content.conditions.len(),
            first = content.conditions.first().map(|c| c.name.as_str()),
            "Rule tables applied"
        );
        let result = TriageResult::new(content, TriageSource::Fallback, self.adapter.model_id());
        TriageResponse::Structured(match raw {
            Some(raw) => result.with_raw(raw),
            None => result,
        })
    }
}

/// Parse and normalize one model output; empty content counts as a failure.
fn accept(output: &str) -> Result<TriageContent, ContractError> {
    let content = normalize(parse_contract(output)?);
    if content.is_empty() {
        return Err(ContractError::Empty);
    }
    Ok(content)
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
