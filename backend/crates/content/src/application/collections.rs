//! Collection Use Cases
//!
//! Pass-through reads of any collection and admin-authored creates.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::collection::CollectionName;
use crate::domain::repository::ContentSource;
use crate::error::{ContentError, ContentResult};

pub struct CollectionUseCase<S>
where
    S: ContentSource,
{
    source: Arc<S>,
}

impl<S> CollectionUseCase<S>
where
    S: ContentSource,
{
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub async fn list(
        &self,
        collection: &CollectionName,
        params: &[(String, String)],
    ) -> ContentResult<Vec<Value>> {
        Ok(self.source.list(collection, params).await?)
    }

    /// Create an entry with the admin bearer token
    pub async fn create(
        &self,
        collection: &CollectionName,
        entry: Value,
        token: &str,
    ) -> ContentResult<Value> {
        if !entry.is_object() {
            return Err(ContentError::InvalidInput(
                "entry must be a JSON object".into(),
            ));
        }

        let created = self.source.create(collection, &entry, token).await?;
        tracing::info!(collection = %collection, "Content entry created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::FakeCms;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_surfaces_upstream_failure() {
        let cms = FakeCms::default().failing("videos");
        let err = CollectionUseCase::new(Arc::new(cms))
            .list(&"videos".parse().unwrap(), &[])
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_create_forwards_token() {
        let cms = FakeCms::default();
        let use_case = CollectionUseCase::new(Arc::new(cms.clone()));

        let created = use_case
            .create(&"links".parse().unwrap(), json!({ "url": "https://x" }), "jwt")
            .await
            .unwrap();
        assert_eq!(created["url"], "https://x");
        assert_eq!(cms.created(), vec![("links".to_string(), json!({ "url": "https://x" }), "jwt".to_string())]);
    }

    #[tokio::test]
    async fn test_create_rejects_non_objects() {
        let use_case = CollectionUseCase::new(Arc::new(FakeCms::default()));
        let err = use_case
            .create(&"links".parse().unwrap(), json!([1, 2]), "jwt")
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::InvalidInput(_)));
    }
}
