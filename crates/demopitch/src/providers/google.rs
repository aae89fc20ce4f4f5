use super::base::{ApiRevision, GenerativeApi};
use super::errors::ProviderError;
use super::formats::google::{create_request, error_message, model_names, response_text};
use crate::config::{Config, DEFAULT_TIMEOUT_SECS, HOST_KEY, TIMEOUT_KEY};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const GOOGLE_API_HOST: &str = "https://generativelanguage.googleapis.com";
pub const GOOGLE_DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const GOOGLE_DOC_URL: &str = "https://ai.google.dev/gemini-api/docs/models";

/// HTTP client for the Gemini REST API. The API key travels per call so one
/// client can serve several keys.
#[derive(Debug, Clone)]
pub struct GoogleClient {
    client: Client,
    host: String,
}

impl GoogleClient {
    pub fn new(host: impl Into<String>, timeout: Duration) -> Result<Self> {
        let host = host.into().trim_end_matches('/').to_string();
        Url::parse(&host).with_context(|| format!("Invalid Gemini host: {}", host))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, host })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let host: String = config
            .get_param(HOST_KEY)
            .unwrap_or_else(|_| GOOGLE_API_HOST.to_string());
        let timeout_secs: u64 = config
            .get_param(TIMEOUT_KEY)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(host, Duration::from_secs(timeout_secs))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, revision: ApiRevision, path: &str) -> String {
        format!("{}/{}/{}", self.host, revision, path)
    }

    async fn post(
        &self,
        api_key: &str,
        revision: ApiRevision,
        model: &str,
        payload: &Value,
    ) -> Result<String, ProviderError> {
        let url = self.url(revision, &format!("models/{}:generateContent", model));
        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(payload)
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(revision, model, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body, status.canonical_reason());
            return Err(ProviderError::from_message(
                revision,
                model,
                Some(status.as_u16()),
                message,
            ));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::from_transport(revision, model, e))?;

        response_text(&json).ok_or_else(|| ProviderError::EmptyResponse {
            revision,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl GenerativeApi for GoogleClient {
    #[tracing::instrument(skip(self, api_key, prompt, cancel), fields(prompt_len = prompt.len()))]
    async fn generate_content(
        &self,
        api_key: &str,
        revision: ApiRevision,
        model: &str,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        let payload = create_request(prompt);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProviderError::Cancelled),
            result = self.post(api_key, revision, model, &payload) => result,
        }
    }

    async fn list_models(
        &self,
        api_key: &str,
        revision: ApiRevision,
    ) -> Result<Vec<String>, ProviderError> {
        let catalog_error = |message: String| ProviderError::CatalogUnavailable { revision, message };

        let response = self
            .client
            .get(self.url(revision, "models"))
            .query(&[("key", api_key)])
            .send()
            .await
            .map_err(|e| catalog_error(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(catalog_error(error_message(&body, status.canonical_reason())));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| catalog_error(e.without_url().to_string()))?;
        Ok(model_names(&json))
    }
}
