//! Strapi identity provider
//!
//! `GET /users/me` validates an admin token, `POST /auth/local` exchanges
//! credentials for one. Neither call has a timeout beyond the HTTP defaults.

use platform::http_client::{UpstreamClient, UpstreamError};

use crate::domain::identity::{AdminCredentials, AdminGrant};
use crate::domain::repository::{AdminAuthenticator, IdentityVerifier};

pub const DEFAULT_CMS_BASE_URL: &str = "https://ai.mfu.ac.th/strapi/api";

#[derive(Debug, Clone)]
pub struct StrapiIdentityClient {
    http: UpstreamClient,
}

impl StrapiIdentityClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: UpstreamClient::new(base_url, None)?,
        })
    }
}

impl IdentityVerifier for StrapiIdentityClient {
    async fn verify(&self, token: &str) -> Result<(), UpstreamError> {
        match self.http.get_status("users/me", Some(token)).await? {
            200 => Ok(()),
            status => Err(UpstreamError::Status(status)),
        }
    }
}

impl AdminAuthenticator for StrapiIdentityClient {
    async fn authenticate(&self, credentials: &AdminCredentials) -> Result<AdminGrant, UpstreamError> {
        self.http.post_json("auth/local", credentials, None).await
    }
}
