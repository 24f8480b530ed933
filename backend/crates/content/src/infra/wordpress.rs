//! WordPress REST client for blog categories

use std::time::Duration;

use platform::http_client::{UpstreamClient, UpstreamError};
use serde_json::Value;

use crate::domain::repository::BlogSource;

#[derive(Debug, Clone)]
pub struct WordPressBlogClient {
    http: UpstreamClient,
}

impl WordPressBlogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: UpstreamClient::new(base_url, Some(timeout))?,
        })
    }
}

impl BlogSource for WordPressBlogClient {
    async fn category(&self, id: u64) -> Result<Value, UpstreamError> {
        self.http.get_json(&format!("categories/{}", id), &[], None).await
    }

    async fn posts_in_category(&self, id: u64) -> Result<Vec<Value>, UpstreamError> {
        let query = [("categories".to_string(), id.to_string())];
        self.http.get_json("posts", &query, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn stub_blog() -> String {
        let router = Router::new()
            .route(
                "/categories/{id}",
                get(|Path(id): Path<u64>| async move {
                    if id == 4 {
                        Ok(Json(json!({ "id": 4, "name": "Generative AI" })))
                    } else {
                        Err(StatusCode::NOT_FOUND)
                    }
                }),
            )
            .route(
                "/posts",
                get(|Query(query): Query<HashMap<String, String>>| async move {
                    let category = query.get("categories").cloned().unwrap_or_default();
                    Json(json!([{ "id": 10, "categories": [category] }]))
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_category_and_posts() {
        let blog = WordPressBlogClient::new(stub_blog().await, Duration::from_secs(5)).unwrap();

        let category = blog.category(4).await.unwrap();
        assert_eq!(category["name"], "Generative AI");

        let posts = blog.posts_in_category(4).await.unwrap();
        assert_eq!(posts[0]["categories"][0], "4");

        assert_eq!(blog.category(9).await.unwrap_err().status(), Some(404));
    }
}
