use super::catalog::CatalogCache;
use super::suggest::suggest_models;
use crate::providers::canonical::candidate_names;
use crate::providers::google::GOOGLE_DEFAULT_MODEL;
use crate::providers::{ApiRevision, GenerativeApi, ProviderError};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// A successful resolve-and-generate call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub text: String,
    pub revision: ApiRevision,
    pub model: String,
    /// Number of generate calls made, including the successful one.
    pub attempts: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("no Gemini API key found")]
    MissingApiKey,

    #[error(transparent)]
    Fatal(ProviderError),

    #[error("{}", exhausted_message(.last_error, .suggestions))]
    Exhausted {
        last_error: ProviderError,
        suggestions: Vec<String>,
    },

    #[error("resolution was superseded or cancelled")]
    Cancelled,
}

impl ResolutionError {
    pub fn suggestions(&self) -> &[String] {
        match self {
            ResolutionError::Exhausted { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

fn exhausted_message(last_error: &ProviderError, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        last_error.to_string()
    } else {
        format!(
            "{}. Models available for this family: {}",
            last_error.to_string().trim_end_matches('.'),
            suggestions.join(", ")
        )
    }
}

/// Result of a single generate call as seen by the resolution loop.
#[derive(Debug)]
enum AttemptOutcome {
    Success(String),
    Retryable(ProviderError),
    Fatal(ProviderError),
}

impl From<Result<String, ProviderError>> for AttemptOutcome {
    fn from(result: Result<String, ProviderError>) -> Self {
        match result {
            Ok(text) => AttemptOutcome::Success(text),
            Err(e) if e.is_retryable() => AttemptOutcome::Retryable(e),
            Err(e) => AttemptOutcome::Fatal(e),
        }
    }
}

#[derive(Debug)]
enum ResolutionState {
    Trying {
        revision_index: usize,
        candidate_index: usize,
    },
    Succeeded(Resolution),
    FatalAborted(ProviderError),
    Exhausted(ProviderError),
}

/// Position after a retryable failure at `(revision_index, candidate_index)`,
/// or `None` once every revision has run out of candidates.
fn next_position(
    revision_index: usize,
    candidate_index: usize,
    candidate_count: usize,
) -> Option<(usize, usize)> {
    if candidate_index + 1 < candidate_count {
        Some((revision_index, candidate_index + 1))
    } else if revision_index + 1 < ApiRevision::ALL.len() {
        Some((revision_index + 1, 0))
    } else {
        None
    }
}

/// Turns a possibly imprecise model name into a working generate call.
///
/// Candidates from [`candidate_names`] are tried one at a time for each
/// revision in [`ApiRevision::ALL`] order. The first success wins, the first
/// fatal error aborts, and when every attempt reports the model as unavailable
/// the catalog is searched for alternatives to put in the error.
pub struct ModelResolver {
    api: Arc<dyn GenerativeApi>,
    catalog: Arc<CatalogCache>,
}

impl ModelResolver {
    pub fn new(api: Arc<dyn GenerativeApi>, catalog: Arc<CatalogCache>) -> Self {
        Self { api, catalog }
    }

    pub fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    #[tracing::instrument(skip(self, prompt, api_key, cancel))]
    pub async fn resolve_and_generate(
        &self,
        prompt: &str,
        api_key: &str,
        requested_model: &str,
        cancel: &CancellationToken,
    ) -> Result<Resolution, ResolutionError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ResolutionError::MissingApiKey);
        }

        let requested_model = match requested_model.trim() {
            "" => GOOGLE_DEFAULT_MODEL,
            model => model,
        };
        let candidates = candidate_names(requested_model);
        tracing::debug!(?candidates, "resolution candidates");

        let mut attempts = 0;
        let mut state = ResolutionState::Trying {
            revision_index: 0,
            candidate_index: 0,
        };

        loop {
            state = match state {
                ResolutionState::Trying {
                    revision_index,
                    candidate_index,
                } => {
                    if cancel.is_cancelled() {
                        return Err(ResolutionError::Cancelled);
                    }

                    let revision = ApiRevision::ALL[revision_index];
                    let model = &candidates[candidate_index];
                    attempts += 1;
                    tracing::debug!(%revision, model = %model, attempts, "attempting generate");

                    let outcome: AttemptOutcome = self
                        .api
                        .generate_content(api_key, revision, model, prompt, cancel)
                        .await
                        .into();

                    match outcome {
                        AttemptOutcome::Success(text) => ResolutionState::Succeeded(Resolution {
                            text,
                            revision,
                            model: model.clone(),
                            attempts,
                        }),
                        AttemptOutcome::Fatal(e) => ResolutionState::FatalAborted(e),
                        AttemptOutcome::Retryable(e) => {
                            tracing::info!(%revision, model = %model, error = %e, "model unavailable, trying next");
                            match next_position(revision_index, candidate_index, candidates.len())
                            {
                                Some((revision_index, candidate_index)) => {
                                    ResolutionState::Trying {
                                        revision_index,
                                        candidate_index,
                                    }
                                }
                                None => ResolutionState::Exhausted(e),
                            }
                        }
                    }
                }
                ResolutionState::Succeeded(resolution) => {
                    tracing::info!(
                        revision = %resolution.revision,
                        model = %resolution.model,
                        attempts = resolution.attempts,
                        "resolved model"
                    );
                    return Ok(resolution);
                }
                ResolutionState::FatalAborted(ProviderError::Cancelled) => {
                    return Err(ResolutionError::Cancelled);
                }
                ResolutionState::FatalAborted(e) => {
                    tracing::warn!(error = %e, kind = e.telemetry_type(), "aborting resolution");
                    return Err(ResolutionError::Fatal(e));
                }
                ResolutionState::Exhausted(last_error) => {
                    tracing::warn!(attempts, error = %last_error, "no candidate model available");
                    let suggestions = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(ResolutionError::Cancelled),
                        suggestions = suggest_models(
                            self.api.as_ref(),
                            &self.catalog,
                            api_key,
                            requested_model,
                        ) => suggestions,
                    };
                    if cancel.is_cancelled() {
                        return Err(ResolutionError::Cancelled);
                    }
                    return Err(ResolutionError::Exhausted {
                        last_error,
                        suggestions,
                    });
                }
            };
        }
    }
}

/// Hands out one cancellation token per resolution and cancels the previous
/// one, so only the most recent caller-initiated resolution can complete.
#[derive(Debug, Default)]
pub struct LatestResolution {
    current: Mutex<Option<CancellationToken>>,
}

impl LatestResolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Cancels the most recent token without starting a new resolution.
    pub fn cancel(&self) {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = current.as_ref() {
            token.cancel();
        }
    }
}
