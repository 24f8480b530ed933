//! Content Router

use axum::middleware::from_fn_with_state;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use auth::domain::repository::{AdminAuthenticator, IdentityVerifier};
use auth::presentation::handlers::PortalAppState;
use auth::presentation::middleware::{require_admin_token, require_portal_session};

use crate::application::config::ContentConfig;
use crate::domain::repository::{BlogSource, ContentSource};
use crate::error::ContentResult;
use crate::infra::{StrapiContentClient, WordPressBlogClient};
use crate::presentation::handlers::{self, ContentAppState};

/// Create the content router over the Strapi CMS and the WordPress blog
pub fn content_router<C>(config: ContentConfig, portal: PortalAppState<C>) -> ContentResult<Router>
where
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    let cms = StrapiContentClient::new(&config.cms_base_url, config.request_timeout)?;
    let blog = WordPressBlogClient::new(&config.blog_base_url, config.request_timeout)?;

    let state = ContentAppState {
        cms: Arc::new(cms),
        blog: Arc::new(blog),
        config: Arc::new(config),
        policy: Arc::new(portal.config.domain_policy.clone()),
        clock: portal.clock.clone(),
    };
    Ok(content_router_with_state(state, portal))
}

/// Create a content router for any sources; guards come from `portal`
pub fn content_router_with_state<S, B, C>(
    state: ContentAppState<S, B>,
    portal: PortalAppState<C>,
) -> Router
where
    S: ContentSource + Send + Sync + 'static,
    B: BlogSource + Send + Sync + 'static,
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    let user_guard = from_fn_with_state(portal.clone(), require_portal_session::<C>);
    let admin_guard = from_fn_with_state(portal, require_admin_token::<C>);

    Router::new()
        .route("/content/common", get(handlers::common_data::<S, B>))
        .route(
            "/content/me",
            get(handlers::my_data::<S, B>).route_layer(user_guard),
        )
        .route(
            "/content/{collection}",
            get(handlers::list_collection::<S, B>)
                .merge(post(handlers::create_entry::<S, B>).route_layer(admin_guard)),
        )
        .route("/blog/categories/{id}", get(handlers::blog_category::<S, B>))
        .with_state(state)
}
