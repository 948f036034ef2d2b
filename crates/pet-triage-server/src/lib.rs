//! HTTP service for pet symptom triage.
//!
//! `POST /ai/diagnose` runs the triage pipeline on the blocking pool;
//! `GET /health` reports the model state without triggering a load.

pub mod api;
pub mod config;

pub use api::{build_router, ApiError, AppState};
pub use config::{AppConfig, ConfigError, ConfigLoader, ServerConfig};
