//! Upstream HTTP client
//!
//! Thin wrapper over `reqwest` shared by the identity provider and the content
//! backends. Every failure is classified into [`UpstreamError`] so callers can
//! map it to a user-facing message without inspecting `reqwest` internals.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Classified upstream failure
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    /// The request did not finish within the client timeout
    #[error("Request timeout - please check your connection")]
    Timeout,

    /// The upstream answered with a non-success status
    #[error("HTTP {0}")]
    Status(u16),

    /// Nothing answered (connection refused, DNS, reset)
    #[error("No response from server: {0}")]
    NoResponse(String),

    /// The body could not be decoded
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The request could not be built or sent
    #[error("Request failed: {0}")]
    Request(String),
}

impl UpstreamError {
    /// HTTP status, when the upstream produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if let Some(status) = err.status() {
            UpstreamError::Status(status.as_u16())
        } else if err.is_connect() {
            UpstreamError::NoResponse(err.to_string())
        } else if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else if err.is_request() {
            UpstreamError::NoResponse(err.to_string())
        } else {
            UpstreamError::Request(err.to_string())
        }
    }
}

/// JSON client bound to one base URL
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    /// Build a client. `timeout = None` leaves requests unbounded.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a JSON document
    pub async fn get_json<T>(
        &self,
        path: &str,
        query: &[(String, String)],
        bearer: Option<&str>,
    ) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut request = self.client.get(&url).query(query);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.error_for_status()?;
        tracing::debug!(url = %url, status = response.status().as_u16(), "Upstream GET");
        Ok(response.json::<T>().await?)
    }

    /// GET and report only the status code; transport failures are errors
    pub async fn get_status(&self, path: &str, bearer: Option<&str>) -> Result<u16, UpstreamError> {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        Ok(response.status().as_u16())
    }

    /// POST a JSON body and decode a JSON answer
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, UpstreamError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut request = self.client.post(&url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.error_for_status()?;
        tracing::debug!(url = %url, status = response.status().as_u16(), "Upstream POST");
        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_url_join() {
        let client = UpstreamClient::new("https://cms.example/api/", None).unwrap();
        assert_eq!(client.base_url(), "https://cms.example/api");
        assert_eq!(client.url("/posts"), "https://cms.example/api/posts");
        assert_eq!(client.url("users/me"), "https://cms.example/api/users/me");
    }

    #[tokio::test]
    async fn test_get_json_ok() {
        let base = serve(Router::new().route(
            "/posts",
            get(|| async { Json(serde_json::json!({ "data": [1, 2] })) }),
        ))
        .await;

        let client = UpstreamClient::new(base, Some(Duration::from_secs(5))).unwrap();
        let value: serde_json::Value = client.get_json("posts", &[], None).await.unwrap();
        assert_eq!(value["data"], serde_json::json!([1, 2]));
    }

    #[tokio::test]
    async fn test_status_is_classified() {
        let base = serve(Router::new().route(
            "/users/me",
            get(|| async { StatusCode::UNAUTHORIZED }),
        ))
        .await;

        let client = UpstreamClient::new(base, None).unwrap();
        let err = client
            .get_json::<serde_json::Value>("users/me", &[], Some("jwt"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(client.get_status("users/me", Some("jwt")).await.unwrap(), 401);
    }

    #[tokio::test]
    async fn test_timeout_is_classified() {
        let base = serve(Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                "late"
            }),
        ))
        .await;

        let client = UpstreamClient::new(base, Some(Duration::from_millis(50))).unwrap();
        let err = client
            .get_json::<serde_json::Value>("slow", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Timeout));
        assert_eq!(
            err.to_string(),
            "Request timeout - please check your connection"
        );
    }

    #[tokio::test]
    async fn test_refused_connection_is_no_response() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = UpstreamClient::new(format!("http://{addr}"), None).unwrap();
        let err = client.get_status("users/me", None).await.unwrap_err();
        assert!(matches!(err, UpstreamError::NoResponse(_)));
    }
}
