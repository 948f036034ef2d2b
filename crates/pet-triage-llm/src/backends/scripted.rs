//! Scripted generator for tests and offline runs.
//!
//! Replies are served in order; the last one repeats once the queue runs
//! down to it. Every call and every load is recorded so tests can assert
//! on prompts, decoding profiles and load counts.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use crate::adapter::{GenerationError, GenerationResult, GeneratorLoader, TextGenerator};
use crate::decoding::DecodingParams;

#[derive(Default)]
struct Script {
    replies: VecDeque<GenerationResult<String>>,
    calls: Vec<(String, DecodingParams)>,
    loads: usize,
    latency: Duration,
}

/// Clones share the same script.
#[derive(Clone)]
pub struct ScriptedGenerator {
    model_id: String,
    script: Arc<Mutex<Script>>,
}

impl ScriptedGenerator {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            script: Arc::new(Mutex::new(Script::default())),
        }
    }

    pub fn with_reply(self, reply: &str) -> Self {
        self.lock().replies.push_back(Ok(reply.to_string()));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.lock()
            .replies
            .push_back(Err(GenerationError::Failed(message.to_string())));
        self
    }

    pub fn with_latency(self, latency: Duration) -> Self {
        self.lock().latency = latency;
        self
    }

    /// Prompts and decoding profiles seen so far.
    pub fn calls(&self) -> Vec<(String, DecodingParams)> {
        self.lock().calls.clone()
    }

    pub fn loads(&self) -> usize {
        self.lock().loads
    }

    pub fn loader(&self) -> ScriptedLoader {
        ScriptedLoader {
            model_id: self.model_id.clone(),
            generator: Some(self.clone()),
            failure: None,
            delay: Duration::ZERO,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        // A panicking test thread must not hide the script from the others.
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TextGenerator for ScriptedGenerator {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn generate(&self, prompt: &str, params: &DecodingParams) -> GenerationResult<String> {
        let (reply, latency) = {
            let mut script = self.lock();
            script.calls.push((prompt.to_string(), params.clone()));
            let reply = if script.replies.len() > 1 {
                script.replies.pop_front()
            } else {
                script.replies.front().cloned()
            };
            (reply, script.latency)
        };
        if !latency.is_zero() {
            thread::sleep(latency);
        }
        reply.unwrap_or_else(|| Err(GenerationError::Failed("no scripted reply".into())))
    }
}

pub struct ScriptedLoader {
    model_id: String,
    generator: Option<ScriptedGenerator>,
    failure: Option<String>,
    delay: Duration,
    attempts: Arc<AtomicUsize>,
}

impl ScriptedLoader {
    /// A loader whose every load fails with `reason`.
    pub fn failing(model_id: &str, reason: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            generator: None,
            failure: Some(reason.to_string()),
            delay: Duration::ZERO,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Shared counter of load attempts, successful or not.
    pub fn attempts(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.attempts)
    }
}

impl GeneratorLoader for ScriptedLoader {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn load(&self) -> GenerationResult<Arc<dyn TextGenerator>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if let Some(reason) = &self.failure {
            return Err(GenerationError::ModelUnavailable(reason.clone()));
        }
        match &self.generator {
            Some(generator) => {
                generator.lock().loads += 1;
                Ok(Arc::new(generator.clone()))
            }
            None => Err(GenerationError::ModelUnavailable("no scripted generator".into())),
        }
    }
}
