//! Fetch Common Data Use Case
//!
//! Articles and public tools, fetched together. Either section degrades to an
//! empty list on failure; the other is still returned.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::collection::{CollectionName, known};
use crate::domain::records::CommonData;
use crate::domain::repository::ContentSource;

pub struct FetchCommonDataUseCase<S>
where
    S: ContentSource,
{
    source: Arc<S>,
}

impl<S> FetchCommonDataUseCase<S>
where
    S: ContentSource,
{
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub async fn execute(&self) -> CommonData {
        let articles = CollectionName::known(known::ARTICLES);
        let tools = CollectionName::known(known::TOOLS);
        let public_only = [("filters[publicAccess][$eq]".to_string(), "true".to_string())];

        let (articles, tools) = tokio::join!(
            self.source.list(&articles, &[]),
            self.source.list(&tools, &public_only),
        );

        CommonData {
            articles: or_empty(articles, known::ARTICLES),
            tools: or_empty(tools, known::TOOLS),
        }
    }
}

fn or_empty<E: std::fmt::Display>(result: Result<Vec<Value>, E>, section: &str) -> Vec<Value> {
    result.unwrap_or_else(|e| {
        tracing::warn!(section, error = %e, "Section failed to load");
        Vec::new()
    })
}
