//! Domain models for pet symptom triage.

mod request;
mod result;

pub use request::*;
pub use result::*;
