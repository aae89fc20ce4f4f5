use super::catalog::CatalogCache;
use crate::providers::canonical::model_families;
use crate::providers::{ApiRevision, GenerativeApi};

pub const MAX_SUGGESTIONS: usize = 3;

/// Up to [`MAX_SUGGESTIONS`] catalog names sharing a family with `requested_model`.
///
/// Revisions are searched in order and the first one with any match wins;
/// matches from different revisions are never merged. Catalog failures only
/// skip that revision.
pub async fn suggest_models(
    api: &dyn GenerativeApi,
    catalog: &CatalogCache,
    api_key: &str,
    requested_model: &str,
) -> Vec<String> {
    let families = model_families(requested_model);
    if families.is_empty() {
        return Vec::new();
    }

    for revision in ApiRevision::ALL {
        let models = match catalog.get_or_fetch(api, api_key, revision).await {
            Ok(models) => models,
            Err(e) => {
                tracing::warn!(%revision, error = %e, "skipping catalog for suggestions");
                continue;
            }
        };

        let matches: Vec<String> = models
            .iter()
            .filter(|name| families.iter().any(|family| name.starts_with(family.as_str())))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect();

        if !matches.is_empty() {
            tracing::debug!(%revision, ?matches, "found model suggestions");
            return matches;
        }
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio_util::sync::CancellationToken;

    struct FixedCatalogs {
        catalogs: HashMap<ApiRevision, Result<Vec<&'static str>, &'static str>>,
        listed: Mutex<Vec<ApiRevision>>,
    }

    impl FixedCatalogs {
        fn new(entries: Vec<(ApiRevision, Result<Vec<&'static str>, &'static str>)>) -> Self {
            Self {
                catalogs: entries.into_iter().collect(),
                listed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerativeApi for FixedCatalogs {
        async fn generate_content(
            &self,
            _api_key: &str,
            _revision: ApiRevision,
            _model: &str,
            _prompt: &str,
            _cancel: &CancellationToken,
        ) -> Result<String, ProviderError> {
            unreachable!("suggestions never generate")
        }

        async fn list_models(
            &self,
            _api_key: &str,
            revision: ApiRevision,
        ) -> Result<Vec<String>, ProviderError> {
            self.listed.lock().unwrap().push(revision);
            match self.catalogs.get(&revision) {
                Some(Ok(models)) => Ok(models.iter().map(|m| m.to_string()).collect()),
                Some(Err(message)) => Err(ProviderError::CatalogUnavailable {
                    revision,
                    message: message.to_string(),
                }),
                None => Ok(Vec::new()),
            }
        }
    }

    #[tokio::test]
    async fn test_first_matching_revision_wins() {
        let api = FixedCatalogs::new(vec![
            (
                ApiRevision::Primary,
                Ok(vec!["gemini-1.5-flash-001", "gemini-1.0-pro", "gemini-1.5-flash-002"]),
            ),
            (ApiRevision::Secondary, Ok(vec!["gemini-1.5-flash-8b"])),
        ]);
        let suggestions =
            suggest_models(&api, &CatalogCache::new(), "k", "gemini-1.5-flash-preview").await;

        assert_eq!(suggestions, vec!["gemini-1.5-flash-001", "gemini-1.5-flash-002"]);
        assert_eq!(*api.listed.lock().unwrap(), vec![ApiRevision::Primary]);
    }

    #[tokio::test]
    async fn test_at_most_three_in_catalog_order() {
        let api = FixedCatalogs::new(vec![(
            ApiRevision::Primary,
            Ok(vec![
                "gemini-1.5-pro-002",
                "gemini-1.5-pro-001",
                "gemini-1.5-pro",
                "gemini-1.5-pro-exp-0827",
            ]),
        )]);
        let suggestions = suggest_models(&api, &CatalogCache::new(), "k", "gemini-1.5-pro").await;
        assert_eq!(
            suggestions,
            vec!["gemini-1.5-pro-002", "gemini-1.5-pro-001", "gemini-1.5-pro"]
        );
    }

    #[tokio::test]
    async fn test_catalog_error_falls_through_to_next_revision() {
        let api = FixedCatalogs::new(vec![
            (ApiRevision::Primary, Err("quota exceeded")),
            (ApiRevision::Secondary, Ok(vec!["gemini-2.0-flash-exp"])),
        ]);
        let suggestions = suggest_models(&api, &CatalogCache::new(), "k", "gemini-2.0-flash").await;
        assert_eq!(suggestions, vec!["gemini-2.0-flash-exp"]);
    }

    #[tokio::test]
    async fn test_no_match_anywhere_is_empty() {
        let api = FixedCatalogs::new(vec![
            (ApiRevision::Primary, Ok(vec!["text-embedding-004"])),
            (ApiRevision::Secondary, Err("unavailable")),
        ]);
        let suggestions = suggest_models(&api, &CatalogCache::new(), "k", "gemini-1.5-pro").await;
        assert!(suggestions.is_empty());
        assert_eq!(
            *api.listed.lock().unwrap(),
            vec![ApiRevision::Primary, ApiRevision::Secondary]
        );
    }
}
