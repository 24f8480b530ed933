//! Portal Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::PortalConfig;
use crate::domain::repository::{AdminAuthenticator, IdentityVerifier};
use crate::infra::strapi::StrapiIdentityClient;
use crate::presentation::handlers::{self, PortalAppState};

/// Create the portal router backed by the Strapi identity provider
pub fn portal_router(client: StrapiIdentityClient, config: PortalConfig) -> Router {
    portal_router_with_state(PortalAppState::new(client, config))
}

/// Create the portal router over existing state (share it with guarded routers)
pub fn portal_router_with_state<C>(state: PortalAppState<C>) -> Router
where
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    Router::new()
        .route("/session", get(handlers::session_status::<C>))
        .route("/session/init", post(handlers::init_session::<C>))
        .route("/session/google", post(handlers::google_login::<C>))
        .route("/session/logout", post(handlers::logout::<C>))
        .route("/routes", get(handlers::resolve_route::<C>))
        .route("/admin/login", post(handlers::admin_login::<C>))
        .route("/admin/login/status", get(handlers::admin_lockout_status::<C>))
        .with_state(state)
}
