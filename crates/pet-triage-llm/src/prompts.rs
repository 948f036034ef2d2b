//! Triage prompts.
//!
//! The structured prompt spells out the JSON contract and carries a category
//! hint from the rule-side classifiers; the retry prompt is a bare schema
//! reminder for models that ignored the first one.

use pet_triage_core::TriageRequest;

/// Instructions shared by the structured prompts.
pub const SYSTEM_PROMPT: &str = r#"You are a veterinary triage assistant for pet owners. Your answers are educational and never a diagnosis.

Given an animal's species, age and symptoms, list:
- conditions: up to 3 probable conditions, most likely first, each with a short reason
- red_flags: up to 6 warning signs that mean the owner should seek emergency care
- care: up to 6 practical steps the owner can take now

Respond with a single JSON object and nothing else."#;

/// The exact output shape the parser accepts.
pub const JSON_SCHEMA_EXAMPLE: &str =
    r#"{"conditions":[{"name":"...","reason":"..."}],"red_flags":["..."],"care":["..."]}"#;

/// One worked example, kept short so small models still have room to answer.
pub const FEW_SHOT_EXAMPLE: (&str, &str) = (
    "Species: cat\nAge: 3\nSymptoms: vomited twice this morning, still eating",
    r#"{"conditions":[{"name":"Gastroenteritis","reason":"Short-lived vomiting in an otherwise bright cat is often dietary."},{"name":"Hairball","reason":"Cats commonly vomit hair."}],"red_flags":["Repeated vomiting","Not eating for 24 hours","Lethargy or collapse"],"care":["Withhold food for a few hours, then offer small bland meals","Keep fresh water available","Call your vet if vomiting continues"]}"#,
);

fn species_label(request: &TriageRequest) -> &str {
    let species = request.species.trim();
    if species.is_empty() {
        "unknown"
    } else {
        species
    }
}

fn age_label(request: &TriageRequest) -> String {
    match request.age {
        Some(age) if age.is_finite() => format!("{age}"),
        _ => "unknown".to_string(),
    }
}

/// Patient block shared by every prompt.
pub fn make_case_description(request: &TriageRequest) -> String {
    format!(
        "Species: {}\nAge: {}\nSymptoms: {}",
        species_label(request),
        age_label(request),
        request.symptoms.trim()
    )
}

/// First-attempt prompt for structured mode.
pub fn build_structured_prompt(request: &TriageRequest, category_hint: &str) -> String {
    let (example_input, example_output) = FEW_SHOT_EXAMPLE;
    format!(
        "{SYSTEM_PROMPT}\n\nOutput format:\n{JSON_SCHEMA_EXAMPLE}\n\nExample:\n{example_input}\nJSON: {example_output}\n\nCategory hint ({category_hint})\n{}\nJSON:",
        make_case_description(request)
    )
}

/// Shorter prompt used after the model broke the contract.
pub fn build_retry_prompt(request: &TriageRequest) -> String {
    format!(
        "Return ONLY valid JSON exactly like {JSON_SCHEMA_EXAMPLE} (max 3 conditions, 6 red_flags, 6 care).\n{}\nJSON:",
        make_case_description(request)
    )
}

/// Prompt for llm_only mode: plain prose, no schema.
pub fn build_prose_prompt(request: &TriageRequest, category_hint: &str) -> String {
    format!(
        "You are a veterinary assistant helping a pet owner. Explain in plain language what might cause these symptoms, which warning signs need urgent care, and what the owner can do now. This is educational, not a diagnosis.\n\nCategory hint ({category_hint})\n{}\n\nAnswer:",
        make_case_description(request)
    )
}
