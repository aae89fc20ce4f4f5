use super::errors::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio_util::sync::CancellationToken;

/// Provider API version namespace. Resolution always walks these in
/// [`ApiRevision::ALL`] order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiRevision {
    /// The generally available `v1` surface.
    Primary,
    /// The `v1beta` surface, where preview models usually appear first.
    Secondary,
}

impl ApiRevision {
    pub const ALL: [ApiRevision; 2] = [ApiRevision::Primary, ApiRevision::Secondary];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiRevision::Primary => "v1",
            ApiRevision::Secondary => "v1beta",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ApiRevision::Primary => 0,
            ApiRevision::Secondary => 1,
        }
    }
}

impl fmt::Display for ApiRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiRevision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v1" | "primary" => Ok(ApiRevision::Primary),
            "v1beta" | "secondary" => Ok(ApiRevision::Secondary),
            _ => Err(format!("invalid api revision: {}", s)),
        }
    }
}

/// The two provider endpoints the resolution engine needs.
#[async_trait]
pub trait GenerativeApi: Send + Sync {
    /// One generate-content call for a concrete revision and model name.
    ///
    /// Implementations must stop waiting on the network once `cancel` fires and
    /// report [`ProviderError::Cancelled`].
    async fn generate_content(
        &self,
        api_key: &str,
        revision: ApiRevision,
        model: &str,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ProviderError>;

    /// Model names exposed by `revision`, without the `models/` path prefix,
    /// in the order the provider returned them.
    async fn list_models(
        &self,
        api_key: &str,
        revision: ApiRevision,
    ) -> Result<Vec<String>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_order_is_primary_then_secondary() {
        assert_eq!(
            ApiRevision::ALL,
            [ApiRevision::Primary, ApiRevision::Secondary]
        );
        for (i, revision) in ApiRevision::ALL.iter().enumerate() {
            assert_eq!(revision.index(), i);
        }
    }

    #[test]
    fn test_revision_parses_path_segment() {
        assert_eq!("v1".parse::<ApiRevision>(), Ok(ApiRevision::Primary));
        assert_eq!("v1beta".parse::<ApiRevision>(), Ok(ApiRevision::Secondary));
        assert!("v2".parse::<ApiRevision>().is_err());
        assert_eq!(ApiRevision::Secondary.to_string(), "v1beta");
    }
}
