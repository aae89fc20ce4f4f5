use super::base::ApiRevision;
use thiserror::Error;

/// Lower-cased fragments of provider messages that mean "this model name does
/// not exist on this revision". Anything else aborts resolution.
pub const RETRYABLE_MARKERS: &[&str] = &["not found", "not supported", "does not exist"];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Try the next candidate or revision.
    Retryable,
    /// Stop resolving and surface the error.
    Fatal,
}

/// Classify a provider error message by matching [`RETRYABLE_MARKERS`].
///
/// Tied to the provider's free-text phrasing. Timeouts and connection
/// failures match no marker, so they are Fatal too.
pub fn classify_error_message(message: &str) -> ErrorClass {
    let lowered = message.to_lowercase();
    if RETRYABLE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        ErrorClass::Retryable
    } else {
        ErrorClass::Fatal
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("{message}")]
    ModelUnavailable {
        revision: ApiRevision,
        model: String,
        message: String,
    },

    #[error("{message}")]
    RequestFailed {
        revision: ApiRevision,
        model: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Gemini returned an empty response")]
    EmptyResponse { revision: ApiRevision, model: String },

    #[error("Model catalog unavailable for {revision}: {message}")]
    CatalogUnavailable {
        revision: ApiRevision,
        message: String,
    },

    #[error("Request cancelled")]
    Cancelled,
}

impl ProviderError {
    /// Build a generate-content failure, classifying it by its message.
    pub fn from_message(
        revision: ApiRevision,
        model: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        let model = model.into();
        let message = message.into();
        match classify_error_message(&message) {
            ErrorClass::Retryable => ProviderError::ModelUnavailable {
                revision,
                model,
                message,
            },
            ErrorClass::Fatal => ProviderError::RequestFailed {
                revision,
                model,
                status,
                message,
            },
        }
    }

    /// Describe a transport-level reqwest failure, then classify it like any
    /// other message. The request URL is dropped from the text since it
    /// carries the API key.
    pub fn from_transport(
        revision: ApiRevision,
        model: impl Into<String>,
        error: reqwest::Error,
    ) -> Self {
        let mut details = vec![];

        if let Some(status) = error.status() {
            details.push(format!("status: {}", status));
        }
        if error.is_timeout() {
            details.push("timeout".to_string());
        }
        if error.is_connect() {
            match error.url().and_then(|url| url.host_str()) {
                Some(host) => details.push(format!("failed to connect to {}", host)),
                None => details.push("connection failed".to_string()),
            }
        }

        let status = error.status().map(|s| s.as_u16());
        let error = error.without_url();
        let message = if details.is_empty() {
            error.to_string()
        } else {
            format!("{} ({})", error, details.join(", "))
        };
        Self::from_message(revision, model, status, message)
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            ProviderError::ModelUnavailable { .. } => ErrorClass::Retryable,
            _ => ErrorClass::Fatal,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Retryable
    }

    /// The revision and model the failed call targeted, when there was one.
    pub fn target(&self) -> Option<(ApiRevision, &str)> {
        match self {
            ProviderError::ModelUnavailable {
                revision, model, ..
            }
            | ProviderError::RequestFailed {
                revision, model, ..
            }
            | ProviderError::EmptyResponse { revision, model } => Some((*revision, model.as_str())),
            ProviderError::CatalogUnavailable { .. } | ProviderError::Cancelled => None,
        }
    }

    pub fn telemetry_type(&self) -> &'static str {
        match self {
            ProviderError::ModelUnavailable { .. } => "model_unavailable",
            ProviderError::RequestFailed { .. } => "request",
            ProviderError::EmptyResponse { .. } => "empty_response",
            ProviderError::CatalogUnavailable { .. } => "catalog",
            ProviderError::Cancelled => "cancelled",
        }
    }
}
