//! Content source traits (interfaces)

use platform::http_client::UpstreamError;
use serde_json::Value;

use crate::domain::collection::CollectionName;

/// Query pairs passed through to the CMS
pub type QueryParams = [(String, String)];

/// Headless CMS collections
#[trait_variant::make(ContentSource: Send)]
pub trait LocalContentSource {
    /// Entries of a collection (envelope removed)
    async fn list(&self, collection: &CollectionName, params: &QueryParams)
    -> Result<Vec<Value>, UpstreamError>;

    /// Create an entry as the admin identified by `token`
    async fn create(
        &self,
        collection: &CollectionName,
        entry: &Value,
        token: &str,
    ) -> Result<Value, UpstreamError>;
}

/// Blog engine categories and posts
#[trait_variant::make(BlogSource: Send)]
pub trait LocalBlogSource {
    async fn category(&self, id: u64) -> Result<Value, UpstreamError>;

    async fn posts_in_category(&self, id: u64) -> Result<Vec<Value>, UpstreamError>;
}
