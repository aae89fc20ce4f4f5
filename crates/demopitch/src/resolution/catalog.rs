use crate::providers::{ApiRevision, GenerativeApi, ProviderError};
use tokio::sync::OnceCell;

/// Per-revision cache of the provider's model catalog.
///
/// Each revision is fetched at most once successfully for the lifetime of the
/// value and never refreshed. Concurrent first reads of the same revision wait
/// on a single in-flight fetch. A failed fetch leaves the slot empty so a later
/// call can try again. Callers normally keep one instance per process behind an
/// `Arc`.
#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: [OnceCell<Vec<String>>; 2],
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_fetch(
        &self,
        api: &dyn GenerativeApi,
        api_key: &str,
        revision: ApiRevision,
    ) -> Result<&[String], ProviderError> {
        let models = self.entries[revision.index()]
            .get_or_try_init(|| async move {
                tracing::debug!(%revision, "fetching model catalog");
                api.list_models(api_key, revision)
                    .await
                    .map_err(|e| match e {
                        ProviderError::CatalogUnavailable { .. } => e,
                        other => ProviderError::CatalogUnavailable {
                            revision,
                            message: other.to_string(),
                        },
                    })
            })
            .await?;
        Ok(models.as_slice())
    }

    /// The cached catalog for `revision`, if one has been fetched.
    pub fn cached(&self, revision: ApiRevision) -> Option<&[String]> {
        self.entries[revision.index()].get().map(Vec::as_slice)
    }
}
