//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::admin_login::LockoutStatus;
use crate::application::portal_tab::{PortalTab, RouteResolution};
use crate::application::route_guard::GuardState;
use crate::application::session_controller::SessionPhase;
use crate::domain::browser::ShellEffects;
use crate::domain::identity::{AdminProfile, IdentityRecord};
use crate::domain::route::{Access, RouteTarget, View};
use crate::domain::user_type::UserType;

// ============================================================================
// Session
// ============================================================================

/// Tab session as the shell sees it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    #[serde(flatten)]
    pub phase: SessionPhase,
    pub logged_in: bool,
    pub logging_out: bool,
    pub initialized: bool,
    pub user: Option<IdentityRecord>,
    pub user_type: UserType,
    pub admin: Option<AdminProfile>,
    pub route_target: RouteTarget,
}

impl SessionView {
    pub fn of<C>(tab: &PortalTab<C>) -> Self {
        let controller = tab.controller();
        let repo = tab.repository();
        let user = controller.identity().cloned();
        let user_type = user
            .as_ref()
            .map(|identity| tab.policy().user_type(&identity.email))
            .unwrap_or_default();

        Self {
            phase: controller.phase(),
            logged_in: controller.is_logged_in(),
            logging_out: controller.is_logging_out(),
            initialized: controller.is_initialized(),
            user,
            user_type,
            admin: repo.admin_profile(),
            route_target: controller.route_target(),
        }
    }
}

/// Session snapshot plus the effects the shell must apply
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session: SessionView,
    pub effects: ShellEffects,
}

/// Google sign-in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    /// Google ID token (JWT) from the sign-in button
    pub credential: String,
}

// ============================================================================
// Routes
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RouteQuery {
    pub path: String,
}

/// Route resolution response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub path: String,
    pub view: Option<View>,
    pub access: Access,
    pub guard: Option<GuardState>,
    pub loading: bool,
    /// Path the tab ended up on after this resolution
    pub current_path: String,
    pub effects: ShellEffects,
}

impl RouteResponse {
    pub fn new(resolution: RouteResolution, current_path: String, effects: ShellEffects) -> Self {
        Self {
            path: resolution.path,
            view: resolution.view,
            access: resolution.access,
            guard: resolution.guard,
            loading: resolution.loading,
            current_path,
            effects,
        }
    }
}

// ============================================================================
// Admin Login
// ============================================================================

/// Admin login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginRequest {
    /// Username or email
    pub identifier: String,
    pub password: String,
}

/// Admin login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginResponse {
    pub user: AdminProfile,
    pub effects: ShellEffects,
}

/// Lockout banner state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockoutStatusResponse {
    pub attempts: u32,
    pub locked: bool,
    pub remaining_minutes: i64,
}

impl From<LockoutStatus> for LockoutStatusResponse {
    fn from(status: LockoutStatus) -> Self {
        Self {
            attempts: status.attempts,
            locked: status.locked,
            remaining_minutes: status.remaining_minutes,
        }
    }
}
