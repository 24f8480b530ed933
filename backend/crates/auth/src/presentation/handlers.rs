//! HTTP Handlers
//!
//! Every endpoint works on the tab named by the signed tab cookie. A request
//! without a valid cookie gets a fresh tab and a `Set-Cookie` for it.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::id::TabSessionId;
use platform::clock::{Clock, SystemClock};
use std::sync::Arc;

use crate::application::admin_login::AdminLoginInput;
use crate::application::config::PortalConfig;
use crate::application::portal_tab::PortalTab;
use crate::application::session_controller::LoginOutcome;
use crate::domain::repository::{AdminAuthenticator, IdentityVerifier};
use crate::error::{AuthError, AuthResult};
use crate::infra::google::GoogleCredentialDecoder;
use crate::infra::tab_registry::{SharedTab, TabRegistry};
use crate::presentation::dto::{
    AdminLoginRequest, AdminLoginResponse, GoogleLoginRequest, LockoutStatusResponse, RouteQuery,
    RouteResponse, SessionResponse, SessionView,
};

/// Shared state for portal handlers and middleware
pub struct PortalAppState<C> {
    pub config: Arc<PortalConfig>,
    pub client: Arc<C>,
    pub clock: Arc<dyn Clock>,
    pub tabs: Arc<TabRegistry<C>>,
    pub decoder: Arc<GoogleCredentialDecoder>,
}

impl<C> Clone for PortalAppState<C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            client: self.client.clone(),
            clock: self.clock.clone(),
            tabs: self.tabs.clone(),
            decoder: self.decoder.clone(),
        }
    }
}

/// Tab resolved for one request
pub struct TabHandle<C> {
    pub id: TabSessionId,
    pub tab: SharedTab<C>,
    /// Set when the tab was just opened
    pub set_cookie: Option<String>,
}

impl<C> PortalAppState<C>
where
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    pub fn new(client: C, config: PortalConfig) -> Self {
        Self::with_clock(client, config, Arc::new(SystemClock))
    }

    pub fn with_clock(client: C, config: PortalConfig, clock: Arc<dyn Clock>) -> Self {
        let decoder = GoogleCredentialDecoder::new(config.google_client_id.clone());
        Self {
            config: Arc::new(config),
            client: Arc::new(client),
            clock,
            tabs: Arc::new(TabRegistry::new()),
            decoder: Arc::new(decoder),
        }
    }

    /// Tab id from a correctly signed cookie
    pub fn tab_id(&self, headers: &HeaderMap) -> Option<TabSessionId> {
        platform::cookie::extract_signed_cookie(
            headers,
            &self.config.tab_cookie.name,
            &self.config.tab_secret,
        )?
        .parse()
        .ok()
    }

    /// Existing tab for this request, if any
    pub fn existing_tab(&self, headers: &HeaderMap) -> Option<(TabSessionId, SharedTab<C>)> {
        let id = self.tab_id(headers)?;
        let tab = self.tabs.get(&id, self.clock.now_ms())?;
        Some((id, tab))
    }

    /// Existing tab, or a freshly opened one
    pub fn open_tab(&self, headers: &HeaderMap) -> TabHandle<C> {
        if let Some((id, tab)) = self.existing_tab(headers) {
            return TabHandle {
                id,
                tab,
                set_cookie: None,
            };
        }

        let now_ms = self.clock.now_ms();
        self.tabs.prune_idle(now_ms, self.config.tab_idle_ttl_ms());

        let id = TabSessionId::new();
        let tab = PortalTab::open(self.client.clone(), self.clock.clone(), self.config.clone());
        let tab = self.tabs.insert(id, tab, now_ms);
        tracing::info!(tab_id = %id, open_tabs = self.tabs.len(), "Opened tab");

        let cookie = self
            .config
            .tab_cookie
            .build_signed_cookie(&self.config.tab_secret, &id.to_string());
        TabHandle {
            id,
            tab,
            set_cookie: Some(cookie),
        }
    }
}

/// Attach the tab cookie (if any) to a handler result
fn respond<T: IntoResponse>(set_cookie: Option<String>, result: AuthResult<T>) -> Response {
    let mut response = match result {
        Ok(body) => body.into_response(),
        Err(e) => e.into_response(),
    };
    if let Some(value) = set_cookie.as_deref().and_then(platform::cookie::set_cookie_header) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

fn snapshot<C>(tab: &PortalTab<C>) -> SessionResponse {
    SessionResponse {
        session: SessionView::of(tab),
        effects: tab.take_effects(),
    }
}

// ============================================================================
// Session
// ============================================================================

/// POST /api/session/init
pub async fn init_session<C>(State(state): State<PortalAppState<C>>, headers: HeaderMap) -> Response
where
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    let handle = state.open_tab(&headers);
    let mut tab = handle.tab.lock().await;
    tab.load();
    tracing::debug!(tab_id = %handle.id, phase = ?tab.controller().phase(), "Session initialized");

    let body = Json(snapshot(&tab));
    respond(handle.set_cookie, Ok(body))
}

/// POST /api/session/google
pub async fn google_login<C>(
    State(state): State<PortalAppState<C>>,
    headers: HeaderMap,
    Json(req): Json<GoogleLoginRequest>,
) -> Response
where
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    let handle = state.open_tab(&headers);
    let result = async {
        let identity = state
            .decoder
            .decode(&req.credential, state.clock.now().timestamp())?;

        let mut tab = handle.tab.lock().await;
        let status = match tab.login(identity) {
            LoginOutcome::Accepted(user_type) => {
                tracing::info!(tab_id = %handle.id, %user_type, "Google login accepted");
                StatusCode::OK
            }
            LoginOutcome::Denied => StatusCode::FORBIDDEN,
        };
        Ok::<_, AuthError>((status, Json(snapshot(&tab))))
    }
    .await;

    respond(handle.set_cookie, result)
}

/// POST /api/session/logout
pub async fn logout<C>(State(state): State<PortalAppState<C>>, headers: HeaderMap) -> Response
where
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    let handle = state.open_tab(&headers);
    let mut tab = handle.tab.lock().await;
    tab.logout();
    tracing::info!(tab_id = %handle.id, "Logged out");

    let body = Json(snapshot(&tab));
    respond(handle.set_cookie, Ok(body))
}

/// GET /api/session
pub async fn session_status<C>(
    State(state): State<PortalAppState<C>>,
    headers: HeaderMap,
) -> Response
where
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    let handle = state.open_tab(&headers);
    let tab = handle.tab.lock().await;

    let body = Json(snapshot(&tab));
    respond(handle.set_cookie, Ok(body))
}

// ============================================================================
// Routes
// ============================================================================

/// GET /api/routes?path=...
pub async fn resolve_route<C>(
    State(state): State<PortalAppState<C>>,
    headers: HeaderMap,
    Query(query): Query<RouteQuery>,
) -> Response
where
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    let handle = state.open_tab(&headers);
    let mut tab = handle.tab.lock().await;
    let resolution = tab.resolve(&query.path);

    let body = Json(RouteResponse::new(
        resolution,
        tab.current_path(),
        tab.take_effects(),
    ));
    respond(handle.set_cookie, Ok(body))
}

// ============================================================================
// Admin Login
// ============================================================================

/// POST /api/admin/login
pub async fn admin_login<C>(
    State(state): State<PortalAppState<C>>,
    headers: HeaderMap,
    Json(req): Json<AdminLoginRequest>,
) -> Response
where
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    let handle = state.open_tab(&headers);
    let input = AdminLoginInput {
        identifier: req.identifier,
        password: req.password,
    };

    // the credential exchange runs without holding the tab
    let use_case = handle.tab.lock().await.admin_login_use_case();
    let result = use_case.execute(input).await;

    let mut tab = handle.tab.lock().await;
    let result = result.map(|user| {
        tab.mark_admin_login(&user);
        tracing::info!(tab_id = %handle.id, username = %user.username, "Admin logged in");
        Json(AdminLoginResponse {
            user,
            effects: tab.take_effects(),
        })
    });

    respond(handle.set_cookie, result)
}

/// GET /api/admin/login/status
pub async fn admin_lockout_status<C>(
    State(state): State<PortalAppState<C>>,
    headers: HeaderMap,
) -> Response
where
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    let handle = state.open_tab(&headers);
    let tab = handle.tab.lock().await;

    let body = Json(LockoutStatusResponse::from(tab.admin_lockout_status()));
    respond(handle.set_cookie, Ok(body))
}
