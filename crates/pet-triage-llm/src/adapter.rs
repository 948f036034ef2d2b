//! Lazily loaded text generator.
//!
//! The model is loaded at most once per process. Concurrent first callers
//! block on the same initialisation; a failed load is cached and every later
//! call sees the model as unavailable without retrying.
//!
//! Generation runs on worker threads. A call that times out leaves its worker
//! running, so the number of live workers is capped; past the cap new calls
//! fail immediately instead of piling more inference onto a stuck backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backends;
use crate::config::TriageConfig;
use crate::decoding::DecodingParams;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Generation failed: {0}")]
    Failed(String),

    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),
}

impl GenerationError {
    /// The message without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            GenerationError::ModelUnavailable(msg) | GenerationError::Failed(msg) => msg.clone(),
            GenerationError::Timeout(after) => format!("timed out after {after:?}"),
        }
    }
}

pub type GenerationResult<T> = Result<T, GenerationError>;

/// A loaded model that turns a prompt into text.
pub trait TextGenerator: Send + Sync {
    fn model_id(&self) -> &str;

    fn generate(&self, prompt: &str, params: &DecodingParams) -> GenerationResult<String>;
}

/// Produces a [`TextGenerator`]; called once per adapter.
pub trait GeneratorLoader: Send + Sync {
    fn model_id(&self) -> &str;

    fn load(&self) -> GenerationResult<Arc<dyn TextGenerator>>;
}

enum LoadedHandle {
    Ready {
        generator: Arc<dyn TextGenerator>,
        loaded_at: DateTime<Utc>,
    },
    Unavailable {
        reason: String,
    },
}

/// Snapshot of the adapter for health reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ModelStatus {
    NotLoaded {
        model: String,
    },
    Ready {
        model: String,
        loaded_at: DateTime<Utc>,
    },
    Unavailable {
        model: String,
        reason: String,
    },
}

/// Default cap on concurrently running generation workers.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Slot in the in-flight count, released when the worker thread ends.
struct InFlightPermit(Arc<AtomicUsize>);

impl InFlightPermit {
    fn try_acquire(counter: &Arc<AtomicUsize>, max: usize) -> Option<Self> {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| (n < max).then_some(n + 1))
            .ok()
            .map(|_| Self(Arc::clone(counter)))
    }
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct GenerativeAdapter {
    loader: Box<dyn GeneratorLoader>,
    handle: OnceLock<LoadedHandle>,
    timeout: Duration,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: usize,
}

impl GenerativeAdapter {
    pub fn new(loader: Box<dyn GeneratorLoader>, timeout: Duration) -> Self {
        Self {
            loader,
            handle: OnceLock::new(),
            timeout,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    /// Cap concurrently running workers (at least one).
    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = max.max(1);
        self
    }

    /// Build an adapter for the configured backend.
    pub fn from_config(config: &TriageConfig) -> Self {
        Self::new(
            backends::loader_from_config(config),
            config.generation_timeout(),
        )
        .with_max_in_flight(config.max_in_flight)
    }

    /// Worker threads still running, including abandoned ones.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn model_id(&self) -> &str {
        self.loader.model_id()
    }

    fn handle(&self) -> &LoadedHandle {
        self.handle.get_or_init(|| {
            let started = Instant::now();
            info!(model = self.loader.model_id(), "Loading generative model");
            match self.loader.load() {
                Ok(generator) => {
                    info!(
                        model = generator.model_id(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Generative model ready"
                    );
                    LoadedHandle::Ready {
                        generator,
                        loaded_at: Utc::now(),
                    }
                }
                Err(e) => {
                    warn!(model = self.loader.model_id(), error = %e, "Generative model unavailable");
                    LoadedHandle::Unavailable { reason: e.detail() }
                }
            }
        })
    }

    /// Load on first call; later calls return the cached outcome.
    pub fn ensure_loaded(&self) -> GenerationResult<Arc<dyn TextGenerator>> {
        match self.handle() {
            LoadedHandle::Ready { generator, .. } => Ok(Arc::clone(generator)),
            LoadedHandle::Unavailable { reason } => {
                Err(GenerationError::ModelUnavailable(reason.clone()))
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.ensure_loaded().is_ok()
    }

    /// Start loading in the background so the first request does not pay for it.
    pub fn warm_up(self: &Arc<Self>) -> JoinHandle<()> {
        let adapter = Arc::clone(self);
        thread::spawn(move || match adapter.ensure_loaded() {
            Ok(_) => info!(model = adapter.model_id(), "Warm-up complete"),
            Err(e) => warn!(
                model = adapter.model_id(),
                error = %e,
                "Warm-up failed; structured requests will use rule tables"
            ),
        })
    }

    /// Never triggers a load.
    pub fn status(&self) -> ModelStatus {
        let model = self.model_id().to_string();
        match self.handle.get() {
            None => ModelStatus::NotLoaded { model },
            Some(LoadedHandle::Ready { loaded_at, .. }) => ModelStatus::Ready {
                model,
                loaded_at: *loaded_at,
            },
            Some(LoadedHandle::Unavailable { reason }) => ModelStatus::Unavailable {
                model,
                reason: reason.clone(),
            },
        }
    }

    /// Run one generation, bounded by the configured timeout.
    ///
    /// The call runs on its own thread; on timeout that thread is left to
    /// finish and its output is discarded. Fails with `Failed` when the
    /// in-flight cap is reached.
    pub fn generate(&self, prompt: &str, params: &DecodingParams) -> GenerationResult<String> {
        let generator = self.ensure_loaded()?;
        let permit =
            InFlightPermit::try_acquire(&self.in_flight, self.max_in_flight).ok_or_else(|| {
                warn!(max = self.max_in_flight, "Generation capacity exhausted");
                GenerationError::Failed(format!(
                    "generation capacity exhausted: {} calls still running",
                    self.max_in_flight
                ))
            })?;
        let (tx, rx) = mpsc::channel();
        let prompt = prompt.to_owned();
        let params = params.clone();
        let started = Instant::now();

        thread::Builder::new()
            .name("triage-generate".into())
            .spawn(move || {
                let _permit = permit;
                let _ = tx.send(generator.generate(&prompt, &params));
            })
            .map_err(|e| GenerationError::Failed(format!("could not spawn worker: {e}")))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => {
                debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    ok = result.is_ok(),
                    "Generation finished"
                );
                result
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!(timeout = ?self.timeout, "Generation timed out");
                Err(GenerationError::Timeout(self.timeout))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(GenerationError::Failed(
                "generation worker exited without a result".into(),
            )),
        }
    }
}
