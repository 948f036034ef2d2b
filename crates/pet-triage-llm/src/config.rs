//! Pipeline configuration.
//!
//! Plain serde struct; the server layers defaults, an optional TOML file and
//! `PET_TRIAGE_*` environment variables on top of [`TriageConfig::default`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::decoding::DecodingParams;

/// Upper bound on simplified-prompt retries, whatever the configuration says.
pub const MAX_PARSE_RETRIES: u32 = 3;

/// Which generation backend to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// HTTP text-generation server
    #[default]
    Remote,
    /// In-process llama.cpp (requires the `llm` feature)
    Llama,
    /// No model; structured requests always use the rule tables
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub backend: Backend,
    /// Model identifier (remote model name or GGUF path)
    pub model_id: String,
    /// Base URL of the remote generation server
    pub endpoint: String,
    /// Keep all layers on the CPU
    pub force_cpu: bool,
    /// Load the model in the background at startup
    pub warmup: bool,
    /// Use the rule tables when the model cannot be loaded
    pub fallback_enabled: bool,
    pub max_new_tokens: u32,
    /// Sample in structured mode too, instead of beam search
    pub do_sample: bool,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub num_beams: u32,
    pub length_penalty: f32,
    pub repetition_penalty: f32,
    pub no_repeat_ngram_size: u32,
    /// Extra generations with the simplified prompt after a contract failure
    pub parse_retries: u32,
    pub generation_timeout_secs: u64,
    /// Generation calls allowed to run at once, counting timed-out ones still finishing
    pub max_in_flight: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Remote,
            model_id: "google/flan-t5-base".into(),
            endpoint: "http://127.0.0.1:8081".into(),
            force_cpu: false,
            warmup: true,
            fallback_enabled: true,
            max_new_tokens: 256,
            do_sample: false,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
            num_beams: 4,
            length_penalty: 1.0,
            repetition_penalty: 1.2,
            no_repeat_ngram_size: 3,
            parse_retries: 1,
            generation_timeout_secs: 60,
            max_in_flight: 4,
        }
    }
}

impl TriageConfig {
    /// Decoding for structured mode: beam search unless sampling is switched on.
    pub fn structured_decoding(&self) -> DecodingParams {
        if self.do_sample {
            return self.prose_decoding();
        }
        DecodingParams::BeamSearch {
            num_beams: self.num_beams.max(1),
            length_penalty: self.length_penalty,
            no_repeat_ngram_size: self.no_repeat_ngram_size,
            repetition_penalty: self.repetition_penalty,
            max_new_tokens: self.max_new_tokens,
        }
    }

    /// Decoding for llm_only mode: always sampling.
    pub fn prose_decoding(&self) -> DecodingParams {
        DecodingParams::Sampling {
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            repetition_penalty: self.repetition_penalty,
            no_repeat_ngram_size: self.no_repeat_ngram_size,
            max_new_tokens: self.max_new_tokens,
        }
    }

    /// Retry budget, capped at [`MAX_PARSE_RETRIES`].
    pub fn effective_parse_retries(&self) -> u32 {
        self.parse_retries.min(MAX_PARSE_RETRIES)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs.max(1))
    }
}
