//! In-process llama.cpp backend (feature `llm`).
//!
//! llama.cpp has no beam search in its sampler chain, so the beam profile
//! decodes greedily with the same repetition penalty.

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;

use llama_cpp_2::context::params::LlamaContextParams;
use llama_cpp_2::llama_backend::LlamaBackend;
use llama_cpp_2::llama_batch::LlamaBatch;
use llama_cpp_2::model::params::LlamaModelParams;
use llama_cpp_2::model::{AddBos, LlamaModel, Special};
use llama_cpp_2::sampling::LlamaSampler;
use tracing::info;

use crate::adapter::{GenerationError, GenerationResult, GeneratorLoader, TextGenerator};
use crate::decoding::DecodingParams;

const CONTEXT_TOKENS: u32 = 2048;
const ALL_LAYERS: u32 = 1000;

pub struct LlamaLoader {
    model_path: PathBuf,
    model_id: String,
    force_cpu: bool,
}

impl LlamaLoader {
    pub fn new(model_path: &str, force_cpu: bool) -> Self {
        Self {
            model_path: PathBuf::from(model_path),
            model_id: model_path.to_string(),
            force_cpu,
        }
    }
}

impl GeneratorLoader for LlamaLoader {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn load(&self) -> GenerationResult<Arc<dyn TextGenerator>> {
        if !self.model_path.exists() {
            return Err(GenerationError::ModelUnavailable(format!(
                "model file not found: {}",
                self.model_path.display()
            )));
        }

        let backend =
            LlamaBackend::init().map_err(|e| GenerationError::ModelUnavailable(e.to_string()))?;
        let gpu_layers = if self.force_cpu { 0 } else { ALL_LAYERS };
        let params = LlamaModelParams::default().with_n_gpu_layers(gpu_layers);
        let model = LlamaModel::load_from_file(&backend, &self.model_path, &params)
            .map_err(|e| GenerationError::ModelUnavailable(e.to_string()))?;

        info!(path = %self.model_path.display(), gpu_layers, "Loaded GGUF model");
        Ok(Arc::new(LlamaGenerator {
            backend,
            model,
            model_id: self.model_id.clone(),
        }))
    }
}

pub struct LlamaGenerator {
    backend: LlamaBackend,
    model: LlamaModel,
    model_id: String,
}

fn failed(e: impl std::fmt::Display) -> GenerationError {
    GenerationError::Failed(e.to_string())
}

fn sampler_for(params: &DecodingParams) -> LlamaSampler {
    match params {
        DecodingParams::BeamSearch {
            repetition_penalty, ..
        } => LlamaSampler::chain_simple([
            LlamaSampler::penalties(64, *repetition_penalty, 0.0, 0.0),
            LlamaSampler::greedy(),
        ]),
        DecodingParams::Sampling {
            temperature,
            top_p,
            top_k,
            repetition_penalty,
            ..
        } => LlamaSampler::chain_simple([
            LlamaSampler::penalties(64, *repetition_penalty, 0.0, 0.0),
            LlamaSampler::top_k(*top_k as i32),
            LlamaSampler::top_p(*top_p, 1),
            LlamaSampler::temp(*temperature),
            LlamaSampler::dist(rand_seed()),
        ]),
    }
}

fn rand_seed() -> u32 {
    uuid::Uuid::new_v4().as_u128() as u32
}

impl TextGenerator for LlamaGenerator {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn generate(&self, prompt: &str, params: &DecodingParams) -> GenerationResult<String> {
        let ctx_params = LlamaContextParams::default().with_n_ctx(NonZeroU32::new(CONTEXT_TOKENS));
        let mut ctx = self
            .model
            .new_context(&self.backend, ctx_params)
            .map_err(failed)?;

        let tokens = self
            .model
            .str_to_token(prompt, AddBos::Always)
            .map_err(failed)?;
        let budget = params.max_new_tokens() as usize;
        if tokens.len() + budget > CONTEXT_TOKENS as usize {
            return Err(GenerationError::Failed(format!(
                "prompt of {} tokens leaves no room for {budget} new tokens",
                tokens.len()
            )));
        }

        let mut batch = LlamaBatch::new(CONTEXT_TOKENS as usize, 1);
        let last = tokens.len() as i32 - 1;
        for (pos, token) in (0_i32..).zip(tokens) {
            batch.add(token, pos, &[0], pos == last).map_err(failed)?;
        }
        ctx.decode(&mut batch).map_err(failed)?;

        let mut sampler = sampler_for(params);
        let mut position = batch.n_tokens();
        let mut output = String::new();

        for _ in 0..budget {
            let token = sampler.sample(&ctx, batch.n_tokens() - 1);
            sampler.accept(token);
            if self.model.is_eog_token(token) {
                break;
            }
            output.push_str(
                &self
                    .model
                    .token_to_str(token, Special::Tokenize)
                    .map_err(failed)?,
            );

            batch.clear();
            batch.add(token, position, &[0], true).map_err(failed)?;
            position += 1;
            ctx.decode(&mut batch).map_err(failed)?;
        }

        Ok(output)
    }
}
