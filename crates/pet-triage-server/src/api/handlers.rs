//! Route handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use pet_triage_core::{TriageMode, TriageRequest, TriageResponse};
use pet_triage_llm::ModelStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;
use super::AppState;

/// Body of `POST /ai/diagnose`. Loosely typed so bad field shapes degrade
/// instead of failing the whole request.
#[derive(Debug, Default, Deserialize)]
pub struct DiagnoseBody {
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub mode: Option<String>,
}

impl DiagnoseBody {
    pub fn into_request(self) -> TriageRequest {
        TriageRequest {
            species: self.species.unwrap_or_default().trim().to_string(),
            age: self.age.as_ref().and_then(parse_age),
            symptoms: self.symptoms.unwrap_or_default().trim().to_string(),
            mode: TriageMode::from_label(self.mode.as_deref()),
        }
    }
}

/// Numbers and numeric strings are accepted; anything else is dropped.
fn parse_age(value: &Value) -> Option<f64> {
    let age = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    age.is_finite().then_some(age)
}

pub async fn diagnose(
    State(state): State<AppState>,
    payload: Result<Json<DiagnoseBody>, JsonRejection>,
) -> Result<Json<TriageResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request = body.into_request();
    request.validate()?;

    let orchestrator = Arc::clone(&state.orchestrator);
    let response = tokio::task::spawn_blocking(move || orchestrator.triage(&request))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(response))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: ModelStatus,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        model: state.orchestrator.adapter().status(),
    })
}
