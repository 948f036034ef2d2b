//! Pet Triage Core Library
//!
//! Deterministic half of the symptom triage pipeline. Everything here is pure:
//! no I/O, no shared state, no model calls.
//!
//! # Architecture
//!
//! ```text
//! TriageRequest ──► SpeciesClassifier ──► SpeciesGroup ─┐
//!       │                                               ├──► category hint (prompt)
//!       └────────► SymptomSignalExtractor ─► Signals ───┤
//!                                                       └──► RuleEngine ─┐
//!                                                                        │
//!                 model output ──► TriageDraft ──► Normalizer ◄──────────┘
//!                                                     │
//!                                               TriageContent
//! ```
//!
//! # Modules
//!
//! - [`models`]: Request/result types and the fixed disclaimer
//! - [`classify`]: Species grouping and symptom signal extraction
//! - [`rules`]: Enum-keyed fallback decision tables
//! - [`normalize`]: Bounding and cleaning of triage content

pub mod classify;
pub mod models;
pub mod normalize;
pub mod rules;

// Re-export commonly used types
pub use classify::{category_hint, classify_species, extract_signals, SpeciesGroup, SymptomSignals};
pub use models::{
    Condition, DraftCondition, ProseAnswer, TriageContent, TriageDraft, TriageMode, TriageRequest,
    TriageResponse, TriageResult, TriageSource, ValidationError, DISCLAIMER,
};
pub use normalize::{normalize, MAX_CARE, MAX_CONDITIONS, MAX_RED_FLAGS};
pub use rules::{ConditionKind, RuleEngine};
