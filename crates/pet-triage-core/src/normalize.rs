//! Result normalizer.
//!
//! Trims every entry, drops empty ones, then keeps the first
//! [`MAX_CONDITIONS`] conditions and the first [`MAX_RED_FLAGS`] /
//! [`MAX_CARE`] strings. Idempotent.

use crate::models::{Condition, TriageContent, TriageDraft};

pub const MAX_CONDITIONS: usize = 3;
pub const MAX_RED_FLAGS: usize = 6;
pub const MAX_CARE: usize = 6;

/// Normalize a draft into bounded triage content.
pub fn normalize(draft: TriageDraft) -> TriageContent {
    let conditions = draft
        .conditions
        .into_iter()
        .filter_map(|c| {
            let name = c.name.trim();
            if name.is_empty() {
                None
            } else {
                Some(Condition::new(name, c.reason.trim()))
            }
        })
        .take(MAX_CONDITIONS)
        .collect();

    TriageContent {
        conditions,
        red_flags: clean_list(draft.red_flags, MAX_RED_FLAGS),
        care: clean_list(draft.care, MAX_CARE),
    }
}

fn clean_list(items: Vec<String>, cap: usize) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(cap)
        .collect()
}
