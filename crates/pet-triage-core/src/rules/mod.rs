//! Rule-based triage engine.
//!
//! Fallback of last resort: deterministic, stateless and independent of any
//! model. Always yields at least one condition.

mod catalog;
mod tables;

pub use catalog::*;

use crate::classify::{classify_species, extract_signals, SpeciesGroup, SymptomSignals};
use crate::models::TriageContent;
use crate::normalize::{normalize, MAX_CONDITIONS};

/// Deterministic decision table keyed by species group and signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the table for an already classified request.
    ///
    /// `age` is accepted for parity with the request but does not change the outcome.
    pub fn evaluate(
        &self,
        group: SpeciesGroup,
        signals: &SymptomSignals,
        _age: Option<f64>,
    ) -> TriageContent {
        let mut kinds = tables::candidate_conditions(group, signals);
        if kinds.is_empty() {
            kinds.push(tables::catch_all(group));
        }
        kinds.truncate(MAX_CONDITIONS);

        let content = TriageContent {
            conditions: kinds.into_iter().map(ConditionKind::to_condition).collect(),
            red_flags: tables::red_flags(group).iter().map(|s| s.to_string()).collect(),
            care: tables::care_steps(group).iter().map(|s| s.to_string()).collect(),
        };
        normalize(content.into())
    }

    /// Classify raw text and evaluate.
    pub fn evaluate_raw(&self, species: &str, symptoms: &str, age: Option<f64>) -> TriageContent {
        let group = classify_species(species);
        let signals = extract_signals(symptoms);
        self.evaluate(group, &signals, age)
    }
}
