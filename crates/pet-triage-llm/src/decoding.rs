//! Decoding profiles for the two request modes.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// How the model should decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum DecodingParams {
    /// Deterministic beam search, used to keep structured output on schema.
    BeamSearch {
        num_beams: u32,
        length_penalty: f32,
        no_repeat_ngram_size: u32,
        repetition_penalty: f32,
        max_new_tokens: u32,
    },
    /// Stochastic nucleus sampling for free-form prose.
    Sampling {
        temperature: f32,
        top_p: f32,
        top_k: u32,
        repetition_penalty: f32,
        no_repeat_ngram_size: u32,
        max_new_tokens: u32,
    },
}

impl DecodingParams {
    pub fn is_deterministic(&self) -> bool {
        matches!(self, DecodingParams::BeamSearch { .. })
    }

    pub fn max_new_tokens(&self) -> u32 {
        match self {
            DecodingParams::BeamSearch { max_new_tokens, .. }
            | DecodingParams::Sampling { max_new_tokens, .. } => *max_new_tokens,
        }
    }

    /// Generation keyword arguments in the shape text-generation servers expect.
    pub fn to_generation_kwargs(&self) -> serde_json::Value {
        match self {
            DecodingParams::BeamSearch {
                num_beams,
                length_penalty,
                no_repeat_ngram_size,
                repetition_penalty,
                max_new_tokens,
            } => json!({
                "do_sample": false,
                "num_beams": num_beams,
                "length_penalty": length_penalty,
                "no_repeat_ngram_size": no_repeat_ngram_size,
                "repetition_penalty": repetition_penalty,
                "max_new_tokens": max_new_tokens,
                "early_stopping": true,
            }),
            DecodingParams::Sampling {
                temperature,
                top_p,
                top_k,
                repetition_penalty,
                no_repeat_ngram_size,
                max_new_tokens,
            } => json!({
                "do_sample": true,
                "temperature": temperature,
                "top_p": top_p,
                "top_k": top_k,
                "repetition_penalty": repetition_penalty,
                "no_repeat_ngram_size": no_repeat_ngram_size,
                "max_new_tokens": max_new_tokens,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beam_search_kwargs() {
        let params = DecodingParams::BeamSearch {
            num_beams: 4,
            length_penalty: 1.0,
            no_repeat_ngram_size: 3,
            repetition_penalty: 1.2,
            max_new_tokens: 256,
        };
        let kwargs = params.to_generation_kwargs();
        assert_eq!(kwargs["do_sample"], false);
        assert_eq!(kwargs["num_beams"], 4);
        assert_eq!(kwargs["no_repeat_ngram_size"], 3);
        assert!(params.is_deterministic());
        assert_eq!(params.max_new_tokens(), 256);
    }

    #[test]
    fn test_sampling_kwargs() {
        let params = DecodingParams::Sampling {
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
            repetition_penalty: 1.2,
            no_repeat_ngram_size: 3,
            max_new_tokens: 128,
        };
        let kwargs = params.to_generation_kwargs();
        assert_eq!(kwargs["do_sample"], true);
        assert_eq!(kwargs["top_k"], 50);
        assert!(kwargs.get("num_beams").is_none());
        assert!(!params.is_deterministic());
    }
}
