//! Triage request models.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// How the caller wants the answer shaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageMode {
    /// Conditions / red flags / care lists, with rule-based fallback.
    #[default]
    Structured,
    /// Free-form model prose; no schema, no fallback.
    LlmOnly,
}

impl TriageMode {
    /// Parse the optional mode label. Only `"llm_only"` selects prose mode.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_lowercase()) {
            Some(l) if l == "llm_only" => TriageMode::LlmOnly,
            _ => TriageMode::Structured,
        }
    }
}

/// A single triage request. Created per call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageRequest {
    /// Free-text species label (e.g., "dog", "Netherland dwarf rabbit"), may be empty
    #[serde(default)]
    pub species: String,
    /// Age in years, informational only
    #[serde(default)]
    pub age: Option<f64>,
    /// Free-text symptom description
    pub symptoms: String,
    /// Requested answer shape
    #[serde(default)]
    pub mode: TriageMode,
}

impl TriageRequest {
    /// Create a structured-mode request.
    pub fn new(species: impl Into<String>, symptoms: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            age: None,
            symptoms: symptoms.into(),
            mode: TriageMode::Structured,
        }
    }

    pub fn with_age(mut self, age: f64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_mode(mut self, mode: TriageMode) -> Self {
        self.mode = mode;
        self
    }

    /// Reject requests without usable symptom text.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.symptoms.trim().is_empty() {
            return Err(ValidationError::MissingField("symptoms"));
        }
        Ok(())
    }
}
