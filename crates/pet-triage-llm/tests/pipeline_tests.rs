//! End-to-end orchestration tests against scripted generators.

use std::sync::Arc;
use std::time::Duration;

use pet_triage_core::{TriageMode, TriageRequest, TriageSource, ValidationError, DISCLAIMER};
use pet_triage_llm::backends::scripted::{ScriptedGenerator, ScriptedLoader};
use pet_triage_llm::backends::UnavailableLoader;
use pet_triage_llm::{
    DecodingParams, GenerativeAdapter, TriageConfig, TriageError, TriageOrchestrator,
    JSON_SCHEMA_EXAMPLE, MAX_PARSE_RETRIES,
};

const GOOD_REPLY: &str = r#"{"conditions":[{"name":"Kennel cough","reason":"Dry honking cough after boarding"}],"red_flags":["Laboured breathing"],"care":["Rest and avoid collars"]}"#;

fn orchestrator_with(generator: &ScriptedGenerator, config: TriageConfig) -> TriageOrchestrator {
    let adapter = GenerativeAdapter::new(Box::new(generator.loader()), Duration::from_secs(5));
    TriageOrchestrator::new(Arc::new(adapter), config)
}

fn unavailable_orchestrator(config: TriageConfig) -> TriageOrchestrator {
    let loader = UnavailableLoader::new("missing-model", "weights not found");
    let adapter = GenerativeAdapter::new(Box::new(loader), Duration::from_secs(5));
    TriageOrchestrator::new(Arc::new(adapter), config)
}

#[test]
fn test_empty_symptoms_rejected_before_generation() {
    let generator = ScriptedGenerator::new("m").with_reply(GOOD_REPLY);
    let orchestrator = orchestrator_with(&generator, TriageConfig::default());

    let err = orchestrator
        .triage(&TriageRequest::new("dog", "   "))
        .unwrap_err();
    assert_eq!(err, TriageError::Validation(ValidationError::MissingField("symptoms")));
    assert_eq!(generator.loads(), 0);
    assert!(generator.calls().is_empty());
}

#[test]
fn test_unavailable_model_falls_back_in_structured_mode() {
    let orchestrator = unavailable_orchestrator(TriageConfig::default());
    let response = orchestrator
        .triage(&TriageRequest::new("", "coughing"))
        .unwrap();

    let result = response.as_structured().expect("structured result");
    assert_eq!(result.source, TriageSource::Fallback);
    assert!(!result.conditions.is_empty());
    assert!(result.raw.is_none());
    assert_eq!(result.disclaimer, DISCLAIMER);
}

#[test]
fn test_unavailable_model_is_error_in_llm_only_mode() {
    let orchestrator = unavailable_orchestrator(TriageConfig::default());
    let request = TriageRequest::new("cat", "sneezing").with_mode(TriageMode::LlmOnly);
    assert_eq!(
        orchestrator.triage(&request).unwrap_err(),
        TriageError::ModelUnavailable {
            reason: "weights not found".into()
        }
    );
}

#[test]
fn test_unavailable_model_without_fallback_is_error() {
    let config = TriageConfig {
        fallback_enabled: false,
        ..Default::default()
    };
    let orchestrator = unavailable_orchestrator(config);
    assert!(matches!(
        orchestrator.triage(&TriageRequest::new("dog", "coughing")),
        Err(TriageError::ModelUnavailable { .. })
    ));
}

#[test]
fn test_valid_model_output_is_attributed_to_llm() {
    let generator = ScriptedGenerator::new("flan").with_reply(GOOD_REPLY);
    let orchestrator = orchestrator_with(&generator, TriageConfig::default());

    let response = orchestrator
        .triage(&TriageRequest::new("dog", "honking cough").with_age(4.0))
        .unwrap();
    let result = response.as_structured().unwrap();
    assert_eq!(result.source, TriageSource::Llm);
    assert_eq!(result.conditions[0].name, "Kennel cough");
    assert_eq!(result.model, "flan");
    assert!(result.raw.is_none());

    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.contains("Age: 4"));
    assert!(matches!(calls[0].1, DecodingParams::BeamSearch { .. }));
}

#[test]
fn test_embedded_json_is_salvaged_without_retry() {
    let reply = r#"garbage text {"conditions": [{"name": "Gastroenteritis", "reason": "vomiting"}]} trailing junk"#;
    let generator = ScriptedGenerator::new("m").with_reply(reply);
    let orchestrator = orchestrator_with(&generator, TriageConfig::default());

    let response = orchestrator
        .triage(&TriageRequest::new("dog", "vomiting"))
        .unwrap();
    let result = response.as_structured().unwrap();
    assert_eq!(result.source, TriageSource::Llm);
    assert_eq!(result.conditions[0].name, "Gastroenteritis");
    assert_eq!(generator.calls().len(), 1);
}

#[test]
fn test_retry_uses_simplified_prompt() {
    let generator = ScriptedGenerator::new("m")
        .with_reply("I think the dog has a cold.")
        .with_reply(GOOD_REPLY);
    let orchestrator = orchestrator_with(&generator, TriageConfig::default());

    let response = orchestrator
        .triage(&TriageRequest::new("dog", "coughing"))
        .unwrap();
    assert_eq!(response.source(), TriageSource::Llm);

    let calls = generator.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].0.contains("Example:"));
    assert!(!calls[1].0.contains("Example:"));
    assert!(calls[1].0.contains(JSON_SCHEMA_EXAMPLE));
    assert!(calls[1].0.len() < calls[0].0.len());
}

#[test]
fn test_persistent_garbage_falls_back_with_attempt_log() {
    let generator = ScriptedGenerator::new("m").with_reply("no json here, sorry");
    let orchestrator = orchestrator_with(&generator, TriageConfig::default());

    let response = orchestrator
        .triage(&TriageRequest::new("hamster", "not eating, very tired"))
        .unwrap();
    let result = response.as_structured().unwrap();
    assert_eq!(result.source, TriageSource::Fallback);
    assert!(result
        .conditions
        .iter()
        .any(|c| c.name.contains("stasis")));

    let raw = result.raw.as_ref().expect("attempt log");
    let attempts = raw["attempts"].as_array().unwrap();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0]["prompt"], "full");
    assert_eq!(attempts[1]["prompt"], "simplified");
    assert_eq!(generator.calls().len(), 2);
}

#[test]
fn test_retry_budget_is_configurable_and_bounded() {
    for retries in [0_u32, 1, 3] {
        let generator = ScriptedGenerator::new("m").with_reply("still not json");
        let config = TriageConfig {
            parse_retries: retries,
            ..Default::default()
        };
        let orchestrator = orchestrator_with(&generator, config);
        let response = orchestrator
            .triage(&TriageRequest::new("dog", "limping"))
            .unwrap();
        assert_eq!(response.source(), TriageSource::Fallback);
        assert_eq!(generator.calls().len(), retries as usize + 1);
    }
}

#[test]
fn test_huge_retry_budget_is_capped() {
    let generator = ScriptedGenerator::new("m").with_reply("still not json");
    let config = TriageConfig {
        parse_retries: u32::MAX,
        ..Default::default()
    };
    let orchestrator = orchestrator_with(&generator, config);
    let response = orchestrator
        .triage(&TriageRequest::new("cat", "sneezing"))
        .unwrap();
    let result = response.as_structured().unwrap();
    assert_eq!(result.source, TriageSource::Fallback);
    assert_eq!(generator.calls().len(), MAX_PARSE_RETRIES as usize + 1);
    assert_eq!(
        result.raw.as_ref().unwrap()["attempts"].as_array().unwrap().len(),
        MAX_PARSE_RETRIES as usize + 1
    );
}

#[test]
fn test_empty_lists_fall_back_even_when_fallback_disabled() {
    let generator =
        ScriptedGenerator::new("m").with_reply(r#"{"conditions":[],"red_flags":[],"care":[]}"#);
    let config = TriageConfig {
        fallback_enabled: false,
        ..Default::default()
    };
    let orchestrator = orchestrator_with(&generator, config);

    let response = orchestrator
        .triage(&TriageRequest::new("parrot", "fluffed up, sitting on the cage floor"))
        .unwrap();
    let result = response.as_structured().unwrap();
    assert_eq!(result.source, TriageSource::Fallback);
    assert!(!result.conditions.is_empty());
    assert!(result.raw.is_some());
}

#[test]
fn test_generation_failure_is_error() {
    let generator = ScriptedGenerator::new("m").with_failure("CUDA out of memory");
    let orchestrator = orchestrator_with(&generator, TriageConfig::default());

    assert_eq!(
        orchestrator
            .triage(&TriageRequest::new("dog", "coughing"))
            .unwrap_err(),
        TriageError::GenerationFailed("CUDA out of memory".into())
    );
}

#[test]
fn test_timeout_falls_back_when_enabled() {
    let generator = ScriptedGenerator::new("m")
        .with_reply(GOOD_REPLY)
        .with_latency(Duration::from_millis(500));
    let adapter = GenerativeAdapter::new(Box::new(generator.loader()), Duration::from_millis(20));
    let orchestrator = TriageOrchestrator::new(Arc::new(adapter), TriageConfig::default());

    let response = orchestrator
        .triage(&TriageRequest::new("dog", "coughing"))
        .unwrap();
    assert_eq!(response.source(), TriageSource::Fallback);
}

#[test]
fn test_timeout_without_fallback_is_error() {
    let generator = ScriptedGenerator::new("m")
        .with_reply(GOOD_REPLY)
        .with_latency(Duration::from_millis(500));
    let adapter = GenerativeAdapter::new(Box::new(generator.loader()), Duration::from_millis(20));
    let config = TriageConfig {
        fallback_enabled: false,
        ..Default::default()
    };
    let orchestrator = TriageOrchestrator::new(Arc::new(adapter), config);

    assert!(matches!(
        orchestrator.triage(&TriageRequest::new("dog", "coughing")),
        Err(TriageError::GenerationFailed(_))
    ));
}

#[test]
fn test_llm_only_returns_trimmed_prose() {
    let generator = ScriptedGenerator::new("m").with_reply("  Possibly a cold. Keep her warm.\n");
    let orchestrator = orchestrator_with(&generator, TriageConfig::default());

    let request = TriageRequest::new("cat", "sneezing").with_mode(TriageMode::LlmOnly);
    let response = orchestrator.triage(&request).unwrap();
    let prose = response.as_prose().expect("prose answer");
    assert_eq!(prose.answer, "Possibly a cold. Keep her warm.");
    assert_eq!(prose.source, TriageSource::LlmFallback);
    assert_eq!(prose.disclaimer, DISCLAIMER);

    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0].1, DecodingParams::Sampling { .. }));
    assert!(calls[0].0.ends_with("Answer:"));
}

#[test]
fn test_oversized_model_output_is_capped() {
    let reply = r#"{"conditions":["a","b","c","d","e"],"red_flags":["1","2","3","4","5","6","7","8"],"care":["1","2","3","4","5","6","7","8"]}"#;
    let generator = ScriptedGenerator::new("m").with_reply(reply);
    let orchestrator = orchestrator_with(&generator, TriageConfig::default());

    let response = orchestrator
        .triage(&TriageRequest::new("dog", "itchy"))
        .unwrap();
    let result = response.as_structured().unwrap();
    assert_eq!(result.conditions.len(), 3);
    assert_eq!(result.red_flags.len(), 6);
    assert_eq!(result.care.len(), 6);
}

#[test]
fn test_model_loaded_once_across_requests() {
    let generator = ScriptedGenerator::new("m").with_reply(GOOD_REPLY);
    let orchestrator = orchestrator_with(&generator, TriageConfig::default());
    for _ in 0..3 {
        orchestrator
            .triage(&TriageRequest::new("dog", "coughing"))
            .unwrap();
    }
    assert_eq!(generator.loads(), 1);
}

#[test]
fn test_failed_load_not_retried_across_requests() {
    let loader = ScriptedLoader::failing("m", "no weights");
    let attempts = loader.attempts();
    let adapter = GenerativeAdapter::new(Box::new(loader), Duration::from_secs(5));
    let orchestrator = TriageOrchestrator::new(Arc::new(adapter), TriageConfig::default());

    for _ in 0..3 {
        let response = orchestrator
            .triage(&TriageRequest::new("rabbit", "not eating"))
            .unwrap();
        assert_eq!(response.source(), TriageSource::Fallback);
    }
    assert_eq!(attempts.load(std::sync::atomic::Ordering::SeqCst), 1);
}
