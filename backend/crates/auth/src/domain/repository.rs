//! Upstream identity provider interfaces. Implementation is in infrastructure layer.

use platform::http_client::UpstreamError;

use crate::domain::identity::{AdminCredentials, AdminGrant};

/// Checks an admin bearer token against the "who am I" endpoint
#[trait_variant::make(IdentityVerifier: Send)]
pub trait LocalIdentityVerifier {
    /// `Ok` only for HTTP 200
    async fn verify(&self, token: &str) -> Result<(), UpstreamError>;
}

/// Exchanges admin credentials for a bearer token
#[trait_variant::make(AdminAuthenticator: Send)]
pub trait LocalAdminAuthenticator {
    async fn authenticate(&self, credentials: &AdminCredentials) -> Result<AdminGrant, UpstreamError>;
}
