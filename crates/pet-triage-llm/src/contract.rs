//! Output contract parsing.
//!
//! Strict parse of the whole reply first, then salvage: every balanced
//! `{...}` fragment is tried largest-first, and as a last resort a fragment
//! cut off by the token limit is closed and retried.

use std::cmp::Reverse;

use pet_triage_core::{DraftCondition, TriageDraft};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Contract violations. Never surfaced to callers; they trigger retry/fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("No structured content found in model output")]
    NoStructuredContent,

    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("Output does not match the triage contract: {0}")]
    Shape(String),

    #[error("Model output contained no usable entries")]
    Empty,
}

pub type ContractResult<T> = Result<T, ContractError>;

const CONTRACT_KEYS: [&str; 3] = ["conditions", "red_flags", "care"];
const NAME_KEYS: [&str; 4] = ["name", "condition", "title", "diagnosis"];
const REASON_KEYS: [&str; 4] = ["reason", "why", "explanation", "rationale"];

/// Strict parse, then salvage.
pub fn parse_contract(text: &str) -> ContractResult<TriageDraft> {
    match parse_strict(text) {
        Ok(draft) => Ok(draft),
        Err(strict_err) => {
            debug!(error = %strict_err, "Strict parse failed, attempting salvage");
            salvage(text)
        }
    }
}

/// Parse the whole reply (optionally inside a Markdown code fence).
pub fn parse_strict(text: &str) -> ContractResult<TriageDraft> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(ContractError::NoStructuredContent);
    }
    let value: Value =
        serde_json::from_str(body).map_err(|e| ContractError::Json(e.to_string()))?;
    draft_from_value(&value)
}

/// Find the largest embedded object that satisfies the contract.
pub fn salvage(text: &str) -> ContractResult<TriageDraft> {
    let scan = scan_objects(text);
    let mut fragments = scan.complete;
    if fragments.is_empty() && scan.truncated.is_none() {
        return Err(ContractError::NoStructuredContent);
    }

    // Stable sort keeps earlier fragments first among equal sizes.
    fragments.sort_by_key(|f| Reverse(f.len()));

    let mut last_err = ContractError::NoStructuredContent;
    for fragment in fragments {
        match serde_json::from_str::<Value>(fragment) {
            Ok(value) => match draft_from_value(&value) {
                Ok(draft) => return Ok(draft),
                Err(e) => last_err = e,
            },
            Err(e) => last_err = ContractError::Json(e.to_string()),
        }
    }

    if let Some(repaired) = scan.truncated.as_deref().and_then(close_truncated) {
        debug!("Trying to close truncated JSON fragment");
        match serde_json::from_str::<Value>(&repaired) {
            Ok(value) => return draft_from_value(&value),
            Err(e) => last_err = ContractError::Json(e.to_string()),
        }
    }

    Err(last_err)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

struct ObjectScan<'a> {
    /// Balanced `{...}` spans, inner and outer
    complete: Vec<&'a str>,
    /// Outermost object that never closed
    truncated: Option<&'a str>,
}

/// Collect balanced object spans. Quotes are only tracked inside braces so
/// apostrophes in surrounding prose do not confuse the scan.
fn scan_objects(text: &str) -> ObjectScan<'_> {
    let mut complete = Vec::new();
    let mut starts: Vec<usize> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' if !starts.is_empty() => in_string = true,
            '{' => starts.push(i),
            '}' => {
                if let Some(start) = starts.pop() {
                    complete.push(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    ObjectScan {
        complete,
        truncated: starts.first().map(|&start| &text[start..]),
    }
}

/// Close strings and brackets left open when generation hit the token limit.
fn close_truncated(fragment: &str) -> Option<String> {
    let mut closers: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for ch in fragment.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => closers.push('}'),
            '[' => closers.push(']'),
            '}' | ']' => {
                closers.pop()?;
            }
            _ => {}
        }
    }

    if closers.is_empty() {
        return None;
    }

    let mut repaired = fragment.to_string();
    if escaped {
        repaired.pop();
    }
    if in_string {
        repaired.push('"');
    }
    let trimmed_len = repaired.trim_end().trim_end_matches([',', ':']).trim_end().len();
    repaired.truncate(trimmed_len);
    repaired.extend(closers.iter().rev());
    Some(repaired)
}

/// Coerce a parsed JSON value into the intermediate draft.
fn draft_from_value(value: &Value) -> ContractResult<TriageDraft> {
    let Value::Object(obj) = value else {
        return Err(ContractError::Shape("expected a JSON object".into()));
    };
    if !CONTRACT_KEYS.iter().any(|k| obj.contains_key(*k)) {
        return Err(ContractError::Shape(
            "none of conditions, red_flags, care present".into(),
        ));
    }

    Ok(TriageDraft {
        conditions: list_field(obj, "conditions")?
            .iter()
            .filter_map(coerce_condition)
            .collect(),
        red_flags: list_field(obj, "red_flags")?
            .iter()
            .filter_map(coerce_text)
            .collect(),
        care: list_field(obj, "care")?
            .iter()
            .filter_map(coerce_text)
            .collect(),
    })
}

fn list_field<'a>(obj: &'a Map<String, Value>, key: &str) -> ContractResult<&'a [Value]> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ContractError::Shape(format!(
            "{key} must be an array, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn coerce_condition(value: &Value) -> Option<DraftCondition> {
    match value {
        Value::Object(obj) => {
            let name = first_text(obj, &NAME_KEYS)?;
            let reason = first_text(obj, &REASON_KEYS).unwrap_or_default();
            Some(DraftCondition { name, reason })
        }
        other => coerce_text(other).map(|name| DraftCondition {
            name,
            reason: String::new(),
        }),
    }
}

fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| obj.get(*k).and_then(coerce_text))
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
