//! Triage result models.

use serde::{Deserialize, Serialize};

/// Fixed disclaimer attached to every response.
pub const DISCLAIMER: &str = "This information is for educational purposes only and is not a veterinary diagnosis. If your pet seems unwell, contact a veterinarian. In an emergency, go to the nearest emergency clinic immediately.";

/// A probable condition, most likely first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Condition {
    /// Condition name, never empty after normalization
    pub name: String,
    /// Short explanation, may be empty
    pub reason: String,
}

impl Condition {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Condition as coerced from model output, before normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftCondition {
    pub name: String,
    pub reason: String,
}

/// Intermediate shape between parsing and normalization.
///
/// Produced by the output contract parser (from model JSON) or from the rule
/// engine's content. Entries may be empty or over-long; [`crate::normalize`]
/// enforces the bounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriageDraft {
    pub conditions: Vec<DraftCondition>,
    pub red_flags: Vec<String>,
    pub care: Vec<String>,
}

impl From<TriageContent> for TriageDraft {
    fn from(content: TriageContent) -> Self {
        Self {
            conditions: content
                .conditions
                .into_iter()
                .map(|c| DraftCondition {
                    name: c.name,
                    reason: c.reason,
                })
                .collect(),
            red_flags: content.red_flags,
            care: content.care,
        }
    }
}

/// Normalized triage lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriageContent {
    /// At most 3, most likely first
    pub conditions: Vec<Condition>,
    /// At most 6
    pub red_flags: Vec<String>,
    /// At most 6
    pub care: Vec<String>,
}

impl TriageContent {
    /// True when all three lists are empty.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.red_flags.is_empty() && self.care.is_empty()
    }
}

/// Which stage produced the returned content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageSource {
    /// Model output parsed under the contract
    Llm,
    /// Rule-based decision table
    Fallback,
    /// Raw model prose (llm_only mode)
    LlmFallback,
}

/// Structured-mode response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageResult {
    pub conditions: Vec<Condition>,
    pub red_flags: Vec<String>,
    pub care: Vec<String>,
    pub source: TriageSource,
    /// Debug payload, present only when parsing failed before a fallback
    pub raw: Option<serde_json::Value>,
    pub disclaimer: String,
    /// Model identifier
    pub model: String,
}

impl TriageResult {
    /// Build a result from normalized content.
    pub fn new(content: TriageContent, source: TriageSource, model: impl Into<String>) -> Self {
        Self {
            conditions: content.conditions,
            red_flags: content.red_flags,
            care: content.care,
            source,
            raw: None,
            disclaimer: DISCLAIMER.to_string(),
            model: model.into(),
        }
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// The triage lists without attribution.
    pub fn content(&self) -> TriageContent {
        TriageContent {
            conditions: self.conditions.clone(),
            red_flags: self.red_flags.clone(),
            care: self.care.clone(),
        }
    }
}

/// llm_only-mode response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProseAnswer {
    pub answer: String,
    pub source: TriageSource,
    pub disclaimer: String,
    pub model: String,
}

impl ProseAnswer {
    pub fn new(answer: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            source: TriageSource::LlmFallback,
            disclaimer: DISCLAIMER.to_string(),
            model: model.into(),
        }
    }
}

/// Either response shape, serialized without a tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TriageResponse {
    Structured(TriageResult),
    Prose(ProseAnswer),
}

impl TriageResponse {
    pub fn source(&self) -> TriageSource {
        match self {
            TriageResponse::Structured(r) => r.source,
            TriageResponse::Prose(p) => p.source,
        }
    }

    pub fn as_structured(&self) -> Option<&TriageResult> {
        match self {
            TriageResponse::Structured(r) => Some(r),
            TriageResponse::Prose(_) => None,
        }
    }

    pub fn as_prose(&self) -> Option<&ProseAnswer> {
        match self {
            TriageResponse::Prose(p) => Some(p),
            TriageResponse::Structured(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&TriageSource::Llm).unwrap(), r#""llm""#);
        assert_eq!(serde_json::to_string(&TriageSource::Fallback).unwrap(), r#""fallback""#);
        assert_eq!(
            serde_json::to_string(&TriageSource::LlmFallback).unwrap(),
            r#""llm_fallback""#
        );
    }

    #[test]
    fn test_result_serializes_raw_as_null() {
        let result = TriageResult::new(TriageContent::default(), TriageSource::Fallback, "m");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["raw"].is_null());
        assert_eq!(json["disclaimer"], DISCLAIMER);
        assert_eq!(json["model"], "m");
    }

    #[test]
    fn test_prose_response_shape() {
        let response = TriageResponse::Prose(ProseAnswer::new("Keep her warm.", "m"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["answer"], "Keep her warm.");
        assert_eq!(json["source"], "llm_fallback");
        assert!(json.get("conditions").is_none());
    }

    #[test]
    fn test_content_is_empty() {
        assert!(TriageContent::default().is_empty());
        let content = TriageContent {
            care: vec!["Rest".into()],
            ..Default::default()
        };
        assert!(!content.is_empty());
    }
}
