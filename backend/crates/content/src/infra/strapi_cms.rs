//! Strapi CMS client
//!
//! Collection reads always ask for `populate=*` unless the caller overrides it.
//! Responses come wrapped as `{ "data": ... }`; bare bodies are accepted too.

use std::time::Duration;

use platform::http_client::{UpstreamClient, UpstreamError};
use serde_json::{Value, json};

use crate::domain::collection::CollectionName;
use crate::domain::repository::{ContentSource, QueryParams};

#[derive(Debug, Clone)]
pub struct StrapiContentClient {
    http: UpstreamClient,
}

impl StrapiContentClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: UpstreamClient::new(base_url, Some(timeout))?,
        })
    }
}

/// `body.data` when present and non-null, else the body itself
fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(data) => {
                map.insert("data".into(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

fn with_populate(params: &QueryParams) -> Vec<(String, String)> {
    let mut query = Vec::with_capacity(params.len() + 1);
    if !params.iter().any(|(key, _)| key == "populate") {
        query.push(("populate".to_string(), "*".to_string()));
    }
    query.extend(params.iter().cloned());
    query
}

impl ContentSource for StrapiContentClient {
    async fn list(
        &self,
        collection: &CollectionName,
        params: &QueryParams,
    ) -> Result<Vec<Value>, UpstreamError> {
        let body: Value = self
            .http
            .get_json(collection.as_str(), &with_populate(params), None)
            .await?;

        match unwrap_envelope(body) {
            Value::Array(entries) => Ok(entries),
            _ => {
                tracing::debug!(collection = %collection, "Collection body is not a list");
                Ok(Vec::new())
            }
        }
    }

    async fn create(
        &self,
        collection: &CollectionName,
        entry: &Value,
        token: &str,
    ) -> Result<Value, UpstreamError> {
        let body: Value = self
            .http
            .post_json(collection.as_str(), &json!({ "data": entry }), Some(token))
            .await?;
        Ok(unwrap_envelope(body))
    }
}
