//! Portal Middleware
//!
//! Route-guard predicates for routers outside this crate (content, uploads).

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::TabSessionId;

use crate::application::route_guard::{Authorization, INVALID_DOMAIN_MESSAGE, LOGIN_REQUIRED_MESSAGE};
use crate::domain::identity::IdentityRecord;
use crate::domain::repository::{AdminAuthenticator, IdentityVerifier};
use crate::domain::user_type::UserType;
use crate::error::AuthError;
use crate::presentation::handlers::PortalAppState;

/// Who passed [`require_portal_session`], stored in request extensions
#[derive(Debug, Clone)]
pub struct PortalPrincipal {
    pub tab_id: TabSessionId,
    pub identity: Option<IdentityRecord>,
    pub user_type: UserType,
    pub has_admin_token: bool,
}

/// Admin bearer token that passed [`require_admin_token`]
#[derive(Debug, Clone)]
pub struct AdminToken(pub String);

/// Middleware that requires what the generic route guard requires: an admin
/// token, or an identity from an allowed domain
pub async fn require_portal_session<C>(
    State(state): State<PortalAppState<C>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    let (tab_id, tab) = state
        .existing_tab(req.headers())
        .ok_or_else(|| AuthError::SessionRequired(LOGIN_REQUIRED_MESSAGE.into()))?;

    let principal = {
        let tab = tab.lock().await;
        let repo = tab.repository();
        match Authorization::evaluate(repo, tab.policy()) {
            Authorization::Missing => {
                return Err(AuthError::SessionRequired(LOGIN_REQUIRED_MESSAGE.into()));
            }
            Authorization::Disallowed => {
                return Err(AuthError::AccessDenied(INVALID_DOMAIN_MESSAGE.into()));
            }
            Authorization::Authorized => {}
        }

        let identity = repo.identity();
        let user_type = identity
            .as_ref()
            .map(|identity| tab.policy().user_type(&identity.email))
            .unwrap_or_default();
        PortalPrincipal {
            tab_id,
            identity,
            user_type,
            has_admin_token: repo.has_admin_token(),
        }
    };

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Middleware that validates the tab's admin token with the identity provider.
/// A rejected token is purged from the tab.
pub async fn require_admin_token<C>(
    State(state): State<PortalAppState<C>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    let (tab_id, tab) = state
        .existing_tab(req.headers())
        .ok_or(AuthError::AdminTokenInvalid)?;

    // validation runs without holding the tab
    let repo = tab.lock().await.repository().clone();
    let token = repo.admin_token().ok_or(AuthError::AdminTokenInvalid)?;

    if let Err(e) = state.client.verify(&token).await {
        tracing::warn!(tab_id = %tab_id, error = %e, "Admin token rejected");
        repo.purge_admin();
        return Err(AuthError::AdminTokenInvalid);
    }

    req.extensions_mut().insert(AdminToken(token));
    Ok(next.run(req).await)
}
