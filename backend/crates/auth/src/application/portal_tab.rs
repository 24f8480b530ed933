//! Portal Tab
//!
//! One browser tab: its session store, controller, browser effects and the
//! guard mounted for the current route. Callers serialize access (one event
//! at a time per tab). Nothing here awaits the network: admin token checks run
//! in the guard's task, and admin login runs through [`PortalTab::admin_login_use_case`]
//! outside the tab's lock.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::admin_guard::AdminRouteGuard;
use crate::application::admin_login::{AdminLoginUseCase, LockoutStatus};
use crate::application::config::PortalConfig;
use crate::application::route_guard::{GuardState, RouteGuard};
use crate::application::session_controller::{LoginOutcome, SessionController};
use crate::domain::browser::{Browser, Navigation, ShellEffects};
use crate::domain::domain_policy::DomainPolicy;
use crate::domain::identity::{AdminProfile, IdentityRecord};
use crate::domain::repository::{AdminAuthenticator, IdentityVerifier};
use crate::domain::route::{Access, RouteEntry, View, normalize_path, route_table};
use crate::domain::session_store::SessionRepository;
use crate::infra::memory_store::MemorySessionStore;
use crate::infra::recording_browser::RecordingBrowser;

/// Guard currently wrapping the rendered route
enum MountedGuard {
    User(RouteGuard),
    Admin(AdminRouteGuard),
}

/// Outcome of showing a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteResolution {
    pub path: String,
    /// Rendered view; `None` while redirecting, gated or unauthorized
    pub view: Option<View>,
    pub access: Access,
    pub guard: Option<GuardState>,
    /// Session not initialized yet, or the first admin token check is in flight
    pub loading: bool,
}

pub struct PortalTab<C> {
    client: Arc<C>,
    clock: Arc<dyn Clock>,
    config: Arc<PortalConfig>,
    policy: Arc<DomainPolicy>,
    repo: SessionRepository,
    browser: Arc<RecordingBrowser>,
    controller: SessionController,
    guard: Option<MountedGuard>,
}

impl<C> PortalTab<C> {
    /// Collect pending navigations and alerts
    pub fn take_effects(&self) -> ShellEffects {
        self.browser.drain()
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn repository(&self) -> &SessionRepository {
        &self.repo
    }

    pub fn policy(&self) -> &DomainPolicy {
        &self.policy
    }

    pub fn current_path(&self) -> String {
        self.browser.current_path()
    }
}

impl<C> PortalTab<C>
where
    C: IdentityVerifier + AdminAuthenticator + Send + Sync + 'static,
{
    /// Open a tab with an empty session store
    pub fn open(client: Arc<C>, clock: Arc<dyn Clock>, config: Arc<PortalConfig>) -> Self {
        let repo = SessionRepository::new(Arc::new(MemorySessionStore::new()));
        let browser = Arc::new(RecordingBrowser::default());
        let policy = Arc::new(config.domain_policy.clone());
        let controller =
            SessionController::new(repo.clone(), policy.clone(), browser.clone(), config.logout_grace);

        Self {
            client,
            clock,
            config,
            policy,
            repo,
            browser,
            controller,
            guard: None,
        }
    }

    /// Page (re)load: in-memory state starts over, the session store survives
    pub fn load(&mut self) {
        self.guard = None;
        self.controller = SessionController::new(
            self.repo.clone(),
            self.policy.clone(),
            self.browser.clone(),
            self.config.logout_grace,
        );
        self.controller.initialize();
    }

    pub fn login(&mut self, identity: IdentityRecord) -> LoginOutcome {
        self.controller.login(identity)
    }

    pub fn logout(&mut self) {
        self.controller.logout();
        // the login view replaces whatever was mounted
        self.guard = None;
    }

    /// Admin login bound to this tab's store and browser. Run it without
    /// holding the tab, then report success with [`PortalTab::mark_admin_login`].
    pub fn admin_login_use_case(&self) -> AdminLoginUseCase<C> {
        AdminLoginUseCase::new(
            self.client.clone(),
            self.repo.clone(),
            self.browser.clone(),
            self.clock.clone(),
            self.config.clone(),
        )
    }

    pub fn mark_admin_login(&mut self, profile: &AdminProfile) {
        tracing::debug!(username = %profile.username, "Tab marked as admin");
        self.controller.mark_admin_login();
    }

    pub fn admin_lockout_status(&self) -> LockoutStatus {
        self.admin_login_use_case().lockout_status()
    }

    /// Show `path`: run it through the route table and mount, reuse or
    /// unmount guards as needed
    pub fn resolve(&mut self, path: &str) -> RouteResolution {
        let path = normalize_path(path).to_string();
        self.browser.set_current_path(path.clone());

        if !self.controller.is_initialized() {
            return RouteResolution {
                path,
                view: None,
                access: Access::Public,
                guard: None,
                loading: true,
            };
        }

        let view = match route_table(&path, self.controller.route_target()) {
            RouteEntry::Redirect(to) => {
                self.guard = None;
                self.browser.navigate(Navigation::replace(to));
                return RouteResolution {
                    path,
                    view: None,
                    access: Access::Public,
                    guard: None,
                    loading: false,
                };
            }
            RouteEntry::Render(view) => view,
        };

        let access = view.access();
        let (rendered, guard) = match access {
            Access::Public => {
                self.guard = None;
                (true, None)
            }
            Access::User => {
                let (rendered, state) = self.user_guard_check();
                (rendered, Some(state))
            }
            Access::Admin => {
                let state = self.admin_guard_state(&path);
                (state == GuardState::Authorized, Some(state))
            }
        };

        tracing::debug!(path = %path, ?access, rendered, "Route resolved");
        RouteResolution {
            path,
            view: rendered.then_some(view),
            access,
            guard,
            loading: guard == Some(GuardState::Checking),
        }
    }

    /// Check with the mounted user guard, mounting one if another kind (or none) is there
    fn user_guard_check(&mut self) -> (bool, GuardState) {
        let mut guard = match self.guard.take() {
            Some(MountedGuard::User(guard)) => guard,
            _ => RouteGuard::mount(self.repo.clone(), self.policy.clone(), self.browser.clone()),
        };
        let state = guard.check(self.controller.is_logging_out());
        let rendered = guard.renders_content();
        self.guard = Some(MountedGuard::User(guard));
        (rendered, state)
    }

    /// Latest admin check for `path`, mounting the admin guard if needed.
    /// A guard that already redirected to the login view is replaced.
    fn admin_guard_state(&mut self, path: &str) -> GuardState {
        if let Some(MountedGuard::Admin(guard)) = &mut self.guard {
            if guard.is_active() {
                guard.navigate(path);
                return guard.state();
            }
        }

        // drop the previous guard before mounting the next
        self.guard = None;
        let guard = AdminRouteGuard::mount(
            self.client.clone(),
            self.repo.clone(),
            self.browser.clone(),
            self.config.token_check_interval,
            path,
        );
        let state = guard.state();
        self.guard = Some(MountedGuard::Admin(guard));
        state
    }
}
