//! Admin Login Use Case
//!
//! Exchanges admin credentials for a bearer token. Failed attempts are counted
//! in the tab's session store; reaching the limit locks the form for a fixed
//! window. The lock is a client-side courtesy, not a security boundary.

use std::sync::Arc;

use platform::clock::Clock;
use platform::http_client::UpstreamError;
use platform::lockout::{FailureOutcome, LockoutState};
use serde_json::Value;

use crate::application::config::PortalConfig;
use crate::domain::browser::{Browser, Navigation};
use crate::domain::identity::{AdminCredentials, AdminGrant, AdminProfile};
use crate::domain::repository::AdminAuthenticator;
use crate::domain::session_store::SessionRepository;
use crate::error::{AuthError, AuthResult};

/// Form fields accept at most this many characters
const FIELD_MAX_LENGTH: usize = 100;

pub const ADMIN_DASHBOARD_PATH: &str = "/admin-dashboard";

/// Admin login input
pub struct AdminLoginInput {
    /// Username or email
    pub identifier: String,
    pub password: String,
}

/// Lockout as seen when the login form opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutStatus {
    pub attempts: u32,
    pub locked: bool,
    pub remaining_minutes: i64,
}

/// Admin login use case
pub struct AdminLoginUseCase<A>
where
    A: AdminAuthenticator,
{
    authenticator: Arc<A>,
    repo: SessionRepository,
    browser: Arc<dyn Browser>,
    clock: Arc<dyn Clock>,
    config: Arc<PortalConfig>,
}

impl<A> AdminLoginUseCase<A>
where
    A: AdminAuthenticator,
{
    pub fn new(
        authenticator: Arc<A>,
        repo: SessionRepository,
        browser: Arc<dyn Browser>,
        clock: Arc<dyn Clock>,
        config: Arc<PortalConfig>,
    ) -> Self {
        Self {
            authenticator,
            repo,
            browser,
            clock,
            config,
        }
    }

    /// Read the lockout, dropping a deadline that has passed
    pub fn lockout_status(&self) -> LockoutStatus {
        let now = self.clock.now_ms();
        let state = self.current_lockout(now);
        LockoutStatus {
            attempts: state.attempts,
            locked: state.is_locked(now),
            remaining_minutes: state.remaining_minutes(now),
        }
    }

    pub async fn execute(&self, input: AdminLoginInput) -> AuthResult<AdminProfile> {
        let now = self.clock.now_ms();
        let mut lockout = self.current_lockout(now);

        if lockout.is_locked(now) {
            let minutes = lockout.remaining_minutes(now);
            tracing::warn!(remaining_minutes = minutes, "Admin login blocked by lockout");
            return Err(AuthError::AccountLocked(format!(
                "Account is locked. Please try again in {} minutes.",
                minutes
            )));
        }

        let credentials = AdminCredentials {
            identifier: sanitize_identifier(&input.identifier),
            password: input.password.trim().to_string(),
            timestamp: now,
        };
        validate_field("Username or email", &credentials.identifier)?;
        validate_field("Password", &credentials.password)?;

        tracing::info!(identifier = %credentials.identifier, "Admin login attempt");

        match self.authenticator.authenticate(&credentials).await {
            Ok(AdminGrant {
                jwt: Some(jwt),
                user,
            }) if !jwt.is_empty() => {
                self.repo.clear_lockout();
                let profile = AdminProfile::from_upstream(&user.unwrap_or(Value::Null));
                self.repo.save_admin(&jwt, &profile);
                tracing::info!(username = %profile.username, role = %profile.role, "Admin logged in");

                tokio::time::sleep(self.config.admin_redirect_delay).await;
                self.browser
                    .navigate(Navigation::replace(ADMIN_DASHBOARD_PATH));
                Ok(profile)
            }
            Ok(_) => {
                tracing::warn!("Admin login answered without a token");
                Err(match self.record_failure(&mut lockout, now) {
                    FailureOutcome::LockedUntil(_) => AuthError::AccountLocked(format!(
                        "Too many failed attempts. Account locked for {} minutes.",
                        self.config.lockout.lockout_minutes()
                    )),
                    FailureOutcome::Counted { .. } => AuthError::Upstream(
                        "Error connecting to server. Please try again.".into(),
                    ),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Admin login failed");
                // the lock still applies; the form shows why this attempt failed
                self.record_failure(&mut lockout, now);
                Err(login_error(&e))
            }
        }
    }

    fn current_lockout(&self, now: i64) -> LockoutState {
        let mut state = self.repo.lockout_state();
        if state.is_expired_lock(now) {
            self.repo.clear_lock_deadline();
            state.clear_lock();
        }
        state
    }

    /// Count the failure and persist the counter and any new lock
    fn record_failure(&self, lockout: &mut LockoutState, now: i64) -> FailureOutcome {
        let outcome = lockout.record_failure(&self.config.lockout, now);
        self.repo.save_lockout_state(lockout);

        if let FailureOutcome::LockedUntil(until) = outcome {
            tracing::warn!(
                attempts = lockout.attempts,
                locked_until_ms = until,
                "Admin login locked"
            );
        }
        outcome
    }
}

/// Map an upstream failure to the message shown on the form
fn login_error(err: &UpstreamError) -> AuthError {
    match err {
        UpstreamError::Status(429) => {
            AuthError::RateLimited("Too many login attempts. Please try again later.".into())
        }
        UpstreamError::Status(401) => {
            AuthError::InvalidCredentials("Invalid username or password.".into())
        }
        UpstreamError::Status(403) => {
            AuthError::InvalidCredentials("Access denied. Please try again.".into())
        }
        UpstreamError::Status(status) => {
            AuthError::Upstream(format!("Server error ({}). Please try again.", status))
        }
        UpstreamError::Timeout | UpstreamError::NoResponse(_) => AuthError::Upstream(
            "No response from server. Please check your connection.".into(),
        ),
        UpstreamError::Decode(_) | UpstreamError::Request(_) => {
            AuthError::Upstream("Error connecting to server. Please try again.".into())
        }
    }
}

fn validate_field(label: &str, value: &str) -> AuthResult<()> {
    if value.is_empty() {
        return Err(AuthError::InvalidInput(format!("{} is required", label)));
    }
    if value.chars().count() > FIELD_MAX_LENGTH {
        return Err(AuthError::InvalidInput(format!(
            "{} must be at most {} characters",
            label, FIELD_MAX_LENGTH
        )));
    }
    Ok(())
}

/// HTML-escape then trim
pub fn sanitize_identifier(raw: &str) -> String {
    escape_html(raw).trim().to_string()
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}
