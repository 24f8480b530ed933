//! Session Controller
//!
//! Owns a tab's top-level login state: initialization from the session store,
//! Google login, logout, and the one automatic redirect to a landing view.
//!
//! ## State machine
//! `Uninitialized -> {Anonymous, Authenticated(role)}`. `Admin` is reached only
//! through the admin credential login, never through Google.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::domain::browser::{Browser, Navigation};
use crate::domain::domain_policy::DomainPolicy;
use crate::domain::identity::IdentityRecord;
use crate::domain::route::RouteTarget;
use crate::domain::session_store::SessionRepository;
use crate::domain::user_type::UserType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "role", rename_all = "camelCase")]
pub enum SessionPhase {
    Uninitialized,
    Anonymous,
    Authenticated(UserType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted(UserType),
    /// Email outside the allow-list; nothing changed
    Denied,
}

pub struct SessionController {
    repo: SessionRepository,
    policy: Arc<DomainPolicy>,
    browser: Arc<dyn Browser>,
    logout_grace: Duration,
    logged_in: bool,
    identity: Option<IdentityRecord>,
    logging_out: Arc<AtomicBool>,
    initialized: bool,
    has_redirected: bool,
    logout_timer: Option<JoinHandle<()>>,
}

impl SessionController {
    pub fn new(
        repo: SessionRepository,
        policy: Arc<DomainPolicy>,
        browser: Arc<dyn Browser>,
        logout_grace: Duration,
    ) -> Self {
        Self {
            repo,
            policy,
            browser,
            logout_grace,
            logged_in: false,
            identity: None,
            logging_out: Arc::new(AtomicBool::new(false)),
            initialized: false,
            has_redirected: false,
            logout_timer: None,
        }
    }

    /// Restore login state from the session store
    pub fn initialize(&mut self) {
        let stored = self.repo.identity();
        let has_admin_token = self.repo.has_admin_token();
        let identity_allowed = stored
            .as_ref()
            .is_some_and(|identity| self.policy.is_email_allowed(&identity.email));

        if identity_allowed || has_admin_token {
            self.logged_in = true;
            self.identity = stored;

            if self.identity.is_some() && !has_admin_token && !self.has_redirected {
                self.redirect_to_landing();
            }
        }

        self.initialized = true;
        tracing::debug!(
            logged_in = self.logged_in,
            admin = has_admin_token,
            "Session initialized"
        );
    }

    /// Google login with a decoded identity claim
    pub fn login(&mut self, identity: IdentityRecord) -> LoginOutcome {
        if !self.policy.is_email_allowed(&identity.email) {
            tracing::warn!(email = %identity.email, "Login denied for email domain");
            self.browser.alert(&self.policy.denial_message());
            return LoginOutcome::Denied;
        }

        let user_type = self.policy.user_type(&identity.email);
        self.repo.save_identity(&identity);
        self.logged_in = true;
        self.identity = Some(identity);
        self.has_redirected = false;
        self.redirect_to_landing();

        tracing::info!(user_type = %user_type, "User logged in");
        LoginOutcome::Accepted(user_type)
    }

    /// Admin credential login completed elsewhere
    pub fn mark_admin_login(&mut self) {
        self.logged_in = true;
    }

    /// Clear the session and return to the login view.
    ///
    /// Guards see the logging-out flag for `logout_grace` so they do not
    /// alert while the navigation settles. Must be called inside a Tokio runtime.
    pub fn logout(&mut self) {
        self.logging_out.store(true, Ordering::SeqCst);

        self.repo.clear_session();
        self.logged_in = false;
        self.identity = None;
        self.has_redirected = false;
        self.browser.navigate(Navigation::replace("/login"));

        if let Some(timer) = self.logout_timer.take() {
            timer.abort();
        }
        let flag = Arc::clone(&self.logging_out);
        let grace = self.logout_grace;
        self.logout_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            flag.store(false, Ordering::SeqCst);
        }));

        tracing::info!("User logged out");
    }

    /// Pending automatic redirect, computed once from current state
    pub fn route_target(&self) -> RouteTarget {
        if self.logged_in && !self.has_redirected {
            RouteTarget::for_user_type(self.identity_type())
        } else {
            RouteTarget::Anonymous
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.initialized {
            SessionPhase::Uninitialized
        } else if !self.logged_in {
            SessionPhase::Anonymous
        } else if self.repo.has_admin_token() {
            SessionPhase::Authenticated(UserType::Admin)
        } else {
            SessionPhase::Authenticated(self.identity_type())
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn is_logging_out(&self) -> bool {
        self.logging_out.load(Ordering::SeqCst)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn has_redirected(&self) -> bool {
        self.has_redirected
    }

    pub fn identity(&self) -> Option<&IdentityRecord> {
        self.identity.as_ref()
    }

    fn identity_type(&self) -> UserType {
        self.identity
            .as_ref()
            .map(|identity| self.policy.user_type(&identity.email))
            .unwrap_or(UserType::Unknown)
    }

    /// Navigate to a student/staff landing view once
    fn redirect_to_landing(&mut self) {
        let target = RouteTarget::for_user_type(self.identity_type());
        if matches!(target, RouteTarget::StudentLanding | RouteTarget::StaffLanding) {
            self.browser.navigate(Navigation::push(target.landing_path()));
            self.has_redirected = true;
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(timer) = self.logout_timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::AdminProfile;
    use crate::domain::session_store::{ADMIN_JWT_KEY, ADMIN_USER_KEY, USER_KEY};
    use crate::infra::memory_store::MemorySessionStore;
    use crate::infra::recording_browser::RecordingBrowser;

    struct Harness {
        repo: SessionRepository,
        browser: Arc<RecordingBrowser>,
        controller: SessionController,
    }

    fn harness() -> Harness {
        let repo = SessionRepository::new(Arc::new(MemorySessionStore::new()));
        let browser = Arc::new(RecordingBrowser::new("/"));
        let controller = SessionController::new(
            repo.clone(),
            Arc::new(DomainPolicy::default()),
            browser.clone(),
            Duration::from_millis(500),
        );
        Harness {
            repo,
            browser,
            controller,
        }
    }

    #[test]
    fn test_initialize_empty_store() {
        let mut h = harness();
        assert_eq!(h.controller.phase(), SessionPhase::Uninitialized);

        h.controller.initialize();

        assert!(h.controller.is_initialized());
        assert!(!h.controller.is_logged_in());
        assert_eq!(h.controller.phase(), SessionPhase::Anonymous);
        assert!(h.browser.drain().is_empty());
    }

    #[test]
    fn test_initialize_redirects_stored_student_once() {
        let mut h = harness();
        h.repo
            .save_identity(&IdentityRecord::new("S", "s@lamduan.mfu.ac.th"));

        h.controller.initialize();
        h.controller.initialize();

        assert_eq!(
            h.controller.phase(),
            SessionPhase::Authenticated(UserType::Student)
        );
        let effects = h.browser.drain();
        assert_eq!(effects.navigations, vec![Navigation::push("/student-dash")]);
        assert_eq!(h.controller.route_target(), RouteTarget::Anonymous);
    }

    #[test]
    fn test_initialize_admin_token_does_not_redirect() {
        let mut h = harness();
        h.repo.save_identity(&IdentityRecord::new("T", "t@mfu.ac.th"));
        h.repo.save_admin(
            "jwt",
            &AdminProfile::from_upstream(&serde_json::json!({ "id": 1 })),
        );

        h.controller.initialize();

        assert!(h.controller.is_logged_in());
        assert_eq!(h.controller.phase(), SessionPhase::Authenticated(UserType::Admin));
        assert!(h.browser.drain().navigations.is_empty());
        assert_eq!(h.controller.route_target(), RouteTarget::StaffLanding);
    }

    #[test]
    fn test_initialize_ignores_disallowed_identity() {
        let mut h = harness();
        h.repo.save_identity(&IdentityRecord::new("G", "g@gmail.com"));

        h.controller.initialize();

        assert!(!h.controller.is_logged_in());
        assert!(h.controller.identity().is_none());
    }

    #[test]
    fn test_login_student_navigates_once() {
        let mut h = harness();
        h.controller.initialize();

        let outcome = h
            .controller
            .login(IdentityRecord::new("S", "s@lamduan.mfu.ac.th"));

        assert_eq!(outcome, LoginOutcome::Accepted(UserType::Student));
        assert!(h.repo.raw(USER_KEY).is_some());
        assert!(h.controller.is_logged_in());
        assert!(h.controller.has_redirected());
        assert_eq!(
            h.browser.drain().navigations,
            vec![Navigation::push("/student-dash")]
        );
    }

    #[test]
    fn test_login_staff_lands_on_staff_dash() {
        let mut h = harness();
        h.controller.login(IdentityRecord::new("T", "t@mfu.ac.th"));
        assert_eq!(h.browser.current_path(), "/staff-dash");
    }

    #[test]
    fn test_login_denied_changes_nothing() {
        let mut h = harness();
        h.controller.initialize();

        let outcome = h.controller.login(IdentityRecord::new("G", "g@gmail.com"));

        assert_eq!(outcome, LoginOutcome::Denied);
        assert!(h.repo.raw(USER_KEY).is_none());
        assert!(!h.controller.is_logged_in());
        let effects = h.browser.drain();
        assert_eq!(
            effects.alerts,
            vec!["Access Denied: Only @lamduan.mfu.ac.th or @mfu.ac.th emails can log in."]
        );
        assert!(effects.navigations.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_clears_everything() {
        let mut h = harness();
        h.controller.login(IdentityRecord::new("T", "t@mfu.ac.th"));
        h.repo.save_admin(
            "jwt",
            &AdminProfile::from_upstream(&serde_json::json!({ "id": 1 })),
        );
        h.browser.drain();

        h.controller.logout();

        assert!(h.repo.raw(USER_KEY).is_none());
        assert!(h.repo.raw(ADMIN_JWT_KEY).is_none());
        assert!(h.repo.raw(ADMIN_USER_KEY).is_none());
        assert!(!h.controller.is_logged_in());
        assert!(!h.controller.has_redirected());
        assert_eq!(h.browser.current_path(), "/login");
        assert_eq!(
            h.browser.drain().navigations,
            vec![Navigation::replace("/login")]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_logging_out_flag_clears_after_grace() {
        let mut h = harness();
        h.controller.logout();
        assert!(h.controller.is_logging_out());

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(h.controller.is_logging_out());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!h.controller.is_logging_out());
    }

    #[test]
    fn test_route_target_after_login_then_consumed() {
        let mut h = harness();
        h.controller.login(IdentityRecord::new("T", "t@mfu.ac.th"));
        // login already performed the redirect
        assert_eq!(h.controller.route_target(), RouteTarget::Anonymous);
    }

    #[test]
    fn test_route_target_admin_only_is_home() {
        let mut h = harness();
        h.controller.initialize();
        h.controller.mark_admin_login();
        assert_eq!(h.controller.route_target(), RouteTarget::Home);
        assert_eq!(h.controller.phase(), SessionPhase::Authenticated(UserType::Unknown));
    }
}
